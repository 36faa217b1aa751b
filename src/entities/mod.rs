pub mod movies;
pub mod users;
