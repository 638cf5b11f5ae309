use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string(Genre::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_genre_name")
                    .table(Genre::Table)
                    .col(Genre::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Actor::Table)
                    .if_not_exists()
                    .col(pk_auto(Actor::Id))
                    .col(string(Actor::Name))
                    .col(string_null(Actor::Picture))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actor_name")
                    .table(Actor::Table)
                    .col(Actor::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movie::Table)
                    .if_not_exists()
                    .col(pk_auto(Movie::Id))
                    .col(string(Movie::Title))
                    .col(string(Movie::ReleaseDate))
                    .col(string_null(Movie::Poster))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movie_title")
                    .table(Movie::Table)
                    .col(Movie::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(pk_auto(Comment::Id))
                    .col(integer(Comment::MovieId))
                    .col(string(Comment::Body))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_movie")
                            .from(Comment::Table, Comment::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_movie_id")
                    .table(Comment::Table)
                    .col(Comment::MovieId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GenreMovie::Table)
                    .if_not_exists()
                    .col(integer(GenreMovie::MovieId))
                    .col(integer(GenreMovie::GenreId))
                    .primary_key(
                        Index::create()
                            .col(GenreMovie::MovieId)
                            .col(GenreMovie::GenreId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_movie_movie")
                            .from(GenreMovie::Table, GenreMovie::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_movie_genre")
                            .from(GenreMovie::Table, GenreMovie::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ActorMovie::Table)
                    .if_not_exists()
                    .col(integer(ActorMovie::MovieId))
                    .col(integer(ActorMovie::ActorId))
                    .col(integer(ActorMovie::CastOrder))
                    .col(string(ActorMovie::Character))
                    .primary_key(
                        Index::create()
                            .col(ActorMovie::MovieId)
                            .col(ActorMovie::ActorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actor_movie_movie")
                            .from(ActorMovie::Table, ActorMovie::MovieId)
                            .to(Movie::Table, Movie::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_actor_movie_actor")
                            .from(ActorMovie::Table, ActorMovie::ActorId)
                            .to(Actor::Table, Actor::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_actor_movie_cast_order")
                    .table(ActorMovie::Table)
                    .col(ActorMovie::MovieId)
                    .col(ActorMovie::CastOrder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ActorMovie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(GenreMovie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Comment::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movie::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Actor::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Actor {
    Table,
    Id,
    Name,
    Picture,
}

#[derive(DeriveIden)]
enum Movie {
    Table,
    Id,
    Title,
    ReleaseDate,
    Poster,
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    Id,
    MovieId,
    Body,
}

#[derive(DeriveIden)]
enum GenreMovie {
    Table,
    MovieId,
    GenreId,
}

#[derive(DeriveIden)]
enum ActorMovie {
    Table,
    MovieId,
    ActorId,
    CastOrder,
    Character,
}
