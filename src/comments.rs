use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    entities::{comment, movie},
    error::{AppError, AppResult},
};

/// Comments are owned by a movie; every operation requires the movie to
/// exist.
#[derive(Clone)]
pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_movie(&self, movie_id: i32) -> AppResult<()> {
        let found = movie::Entity::find_by_id(movie_id).count(&self.db).await? > 0;
        if !found {
            return Err(AppError::NotFound("movie"));
        }
        Ok(())
    }

    pub async fn get_all(&self, movie_id: i32) -> AppResult<Vec<comment::Model>> {
        self.require_movie(movie_id).await?;
        Ok(comment::Entity::find()
            .filter(comment::Column::MovieId.eq(movie_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, movie_id: i32, id: i32) -> AppResult<Option<comment::Model>> {
        self.require_movie(movie_id).await?;
        Ok(comment::Entity::find_by_id(id)
            .filter(comment::Column::MovieId.eq(movie_id))
            .one(&self.db)
            .await?)
    }

    pub async fn create(&self, movie_id: i32, body: String) -> AppResult<i32> {
        self.require_movie(movie_id).await?;
        let model = comment::ActiveModel {
            movie_id: Set(movie_id),
            body: Set(body),
            ..Default::default()
        };
        let res = comment::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update(&self, movie_id: i32, id: i32, body: String) -> AppResult<()> {
        if self.get_by_id(movie_id, id).await?.is_none() {
            return Err(AppError::NotFound("comment"));
        }
        let model = comment::ActiveModel { id: Set(id), movie_id: Set(movie_id), body: Set(body) };
        match comment::Entity::update(model).exec(&self.db).await {
            Ok(_) => Ok(()),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(AppError::NotFound("comment")),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete(&self, movie_id: i32, id: i32) -> AppResult<()> {
        if self.get_by_id(movie_id, id).await?.is_none() {
            return Err(AppError::NotFound("comment"));
        }
        comment::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db, movies::MovieStore};

    #[tokio::test]
    async fn comments_are_scoped_to_their_movie() {
        let db = db::connect_for_tests().await;
        let movies = MovieStore::new(db.clone());
        let comments = CommentStore::new(db);

        let first =
            movies.create("Se7en".to_string(), "1995-09-22".to_string(), None).await.unwrap();
        let second =
            movies.create("Zodiac".to_string(), "2007-03-02".to_string(), None).await.unwrap();

        let comment_id = comments.create(first, "what's in the box".to_string()).await.unwrap();

        assert_eq!(comments.get_all(first).await.unwrap().len(), 1);
        assert!(comments.get_all(second).await.unwrap().is_empty());
        // Wrong movie scope behaves like a missing comment.
        assert!(comments.get_by_id(second, comment_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn operations_on_missing_movie_are_not_found() {
        let db = db::connect_for_tests().await;
        let comments = CommentStore::new(db);

        let err = comments.get_all(123).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = comments.create(123, "nope".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
