use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    entities::actor,
    error::{AppError, AppResult},
    pagination::{Page, Pagination, paged},
};

#[derive(Clone)]
pub struct ActorStore {
    db: DatabaseConnection,
}

impl ActorStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self, pagination: Pagination) -> AppResult<Page<actor::Model>> {
        let select = actor::Entity::find().order_by_asc(actor::Column::Name);
        paged(select, pagination, &self.db).await
    }

    /// Name substring search, name ascending, unpaged.
    pub async fn get_by_name(&self, name: &str) -> AppResult<Vec<actor::Model>> {
        Ok(actor::Entity::find()
            .filter(actor::Column::Name.contains(name))
            .order_by_asc(actor::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<actor::Model>> {
        Ok(actor::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, name: String, picture: Option<String>) -> AppResult<i32> {
        let model = actor::ActiveModel {
            name: Set(name),
            picture: Set(picture),
            ..Default::default()
        };
        let res = actor::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update(&self, id: i32, name: String, picture: Option<String>) -> AppResult<()> {
        let model = actor::ActiveModel { id: Set(id), name: Set(name), picture: Set(picture) };
        match actor::Entity::update(model).exec(&self.db).await {
            Ok(_) => Ok(()),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(AppError::NotFound("actor")),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = actor::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("actor"));
        }
        Ok(())
    }
}
