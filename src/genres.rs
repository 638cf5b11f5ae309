use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::{
    entities::genre,
    error::{AppError, AppResult},
};

/// Genres are a small bounded set; the listing is unpaginated.
#[derive(Clone)]
pub struct GenreStore {
    db: DatabaseConnection,
}

impl GenreStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> AppResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Name).all(&self.db).await?)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<genre::Model>> {
        Ok(genre::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, name: String) -> AppResult<i32> {
        let model = genre::ActiveModel { name: Set(name), ..Default::default() };
        let res = genre::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update(&self, id: i32, name: String) -> AppResult<()> {
        let model = genre::ActiveModel { id: Set(id), name: Set(name) };
        match genre::Entity::update(model).exec(&self.db).await {
            Ok(_) => Ok(()),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(AppError::NotFound("genre")),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = genre::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("genre"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[tokio::test]
    async fn listing_is_name_ascending_and_unpaginated() {
        let store = GenreStore::new(db::connect_for_tests().await);

        store.create("Thriller".to_string()).await.unwrap();
        store.create("Action".to_string()).await.unwrap();
        store.create("SciFi".to_string()).await.unwrap();

        let all = store.get_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Action", "SciFi", "Thriller"]);
    }

    #[tokio::test]
    async fn update_and_delete_report_not_found() {
        let store = GenreStore::new(db::connect_for_tests().await);

        let err = store.update(99, "Western".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = store.delete(99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let id = store.create("Western".to_string()).await.unwrap();
        store.update(id, "Neo-Western".to_string()).await.unwrap();
        assert_eq!(store.get_by_id(id).await.unwrap().unwrap().name, "Neo-Western");
        store.delete(id).await.unwrap();
        assert!(store.get_by_id(id).await.unwrap().is_none());
    }
}
