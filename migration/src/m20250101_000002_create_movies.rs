use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(big_integer(Movies::Id).primary_key())
                    .col(string(Movies::Title))
                    .col(string_null(Movies::PosterPath))
                    .col(text_null(Movies::Overview))
                    .col(string_null(Movies::ReleaseDate))
                    .col(double(Movies::Rating))
                    .col(big_integer(Movies::ViewedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_viewed_at")
                    .table(Movies::Table)
                    .col(Movies::ViewedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    PosterPath,
    Overview,
    ReleaseDate,
    Rating,
    ViewedAt,
}
