pub mod actor;
pub mod actor_movie;
pub mod comment;
pub mod genre;
pub mod genre_movie;
pub mod movie;
