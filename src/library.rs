use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::{
    entities::movies,
    models::{MovieDetail, StoredMovie},
};

/// Local copy of the movies the site has shown, newest view first.
#[derive(Clone)]
pub struct Library {
    db: DatabaseConnection,
}

impl Library {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn record_movie(&self, movie: &MovieDetail) -> Result<(), DbErr> {
        let model = movies::ActiveModel {
            id: Set(movie.id),
            title: Set(movie.title.clone()),
            poster_path: Set(movie.poster_path.clone()),
            overview: Set((!movie.overview.is_empty()).then(|| movie.overview.clone())),
            release_date: Set(movie.release_date.clone()),
            rating: Set(movie.rating),
            viewed_at: Set(jiff::Timestamp::now().as_second()),
        };

        movies::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(movies::Column::Id)
                    .update_columns([
                        movies::Column::Title,
                        movies::Column::PosterPath,
                        movies::Column::Overview,
                        movies::Column::ReleaseDate,
                        movies::Column::Rating,
                        movies::Column::ViewedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        tracing::debug!(movie_id = movie.id, "recorded movie");
        Ok(())
    }

    pub async fn movies(&self) -> Result<Vec<StoredMovie>, DbErr> {
        let rows = movies::Entity::find()
            .order_by_desc(movies::Column::ViewedAt)
            .order_by_asc(movies::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(StoredMovie::from).collect())
    }
}
