use sea_orm::entity::prelude::*;

// release_date is an ISO-8601 date string, parsed at the DTO boundary.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub release_date: String,
    pub poster: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::genre_movie::Entity")]
    GenreMovie,
    #[sea_orm(has_many = "super::actor_movie::Entity")]
    ActorMovie,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::genre_movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenreMovie.def()
    }
}

impl Related<super::actor_movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActorMovie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
