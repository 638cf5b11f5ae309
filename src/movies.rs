use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::{
    entities::{actor, actor_movie, comment, genre, genre_movie, movie},
    error::{AppError, AppResult},
    pagination::{Page, Pagination, paged},
    sync::{self, CastMember, RankedCastMember},
};

/// A movie with all three related collections resolved.
#[derive(Clone, Debug)]
pub struct MovieDetails {
    pub movie: movie::Model,
    pub comments: Vec<comment::Model>,
    pub genres: Vec<genre::Model>,
    pub cast: Vec<(actor_movie::Model, actor::Model)>,
}

/// Owns the movie row together with its genre set and ordered cast.
/// Stateless; safe to clone per request. Racing assignment calls on the
/// same movie are last-write-wins.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts the scalar row only; associations require a separate
    /// assignment call.
    pub async fn create(
        &self,
        title: String,
        release_date: String,
        poster: Option<String>,
    ) -> AppResult<i32> {
        let model = movie::ActiveModel {
            title: Set(title),
            release_date: Set(release_date),
            poster: Set(poster),
            ..Default::default()
        };
        let res = movie::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    /// Detail read: movie plus comments, genre details and the cast in
    /// ascending order, in a constant number of queries.
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<MovieDetails>> {
        let Some(movie) = movie::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let comments = comment::Entity::find()
            .filter(comment::Column::MovieId.eq(id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await?;

        let genres = genre_movie::Entity::find()
            .filter(genre_movie::Column::MovieId.eq(id))
            .find_also_related(genre::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|(_, genre)| genre)
            .collect();

        let cast = actor_movie::Entity::find()
            .filter(actor_movie::Column::MovieId.eq(id))
            .order_by_asc(actor_movie::Column::CastOrder)
            .find_also_related(actor::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|(pairing, actor)| actor.map(|actor| (pairing, actor)))
            .collect();

        Ok(Some(MovieDetails { movie, comments, genres, cast }))
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(movie::Entity::find_by_id(id).count(&self.db).await? > 0)
    }

    /// Title-ascending window without association loading.
    pub async fn get_all(&self, pagination: Pagination) -> AppResult<Page<movie::Model>> {
        let select = movie::Entity::find().order_by_asc(movie::Column::Title);
        paged(select, pagination, &self.db).await
    }

    /// Full replace of the scalar fields; association collections are
    /// never touched here.
    pub async fn update(
        &self,
        id: i32,
        title: String,
        release_date: String,
        poster: Option<String>,
    ) -> AppResult<()> {
        let model = movie::ActiveModel {
            id: Set(id),
            title: Set(title),
            release_date: Set(release_date),
            poster: Set(poster),
        };
        match movie::Entity::update(model).exec(&self.db).await {
            Ok(_) => Ok(()),
            Err(sea_orm::DbErr::RecordNotUpdated) => Err(AppError::NotFound("movie")),
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes the row; comments and both association collections go with
    /// it via the schema's cascade rules.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound("movie"));
        }
        Ok(())
    }

    /// Replaces the movie's genre set with `genre_ids`. Loads the current
    /// pairs, reconciles, and applies the difference in one transaction.
    pub async fn assign_genres(&self, movie_id: i32, genre_ids: &[i32]) -> AppResult<()> {
        if !self.exists(movie_id).await? {
            return Err(AppError::NotFound("movie"));
        }

        let current: Vec<i32> = genre_movie::Entity::find()
            .filter(genre_movie::Column::MovieId.eq(movie_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| row.genre_id)
            .collect();

        let changes = sync::reconcile_genres(&current, genre_ids);
        if changes.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;

        if !changes.delete.is_empty() {
            genre_movie::Entity::delete_many()
                .filter(genre_movie::Column::MovieId.eq(movie_id))
                .filter(genre_movie::Column::GenreId.is_in(changes.delete))
                .exec(&txn)
                .await?;
        }

        if !changes.insert.is_empty() {
            let rows = changes.insert.into_iter().map(|genre_id| genre_movie::ActiveModel {
                movie_id: Set(movie_id),
                genre_id: Set(genre_id),
            });
            genre_movie::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Replaces the movie's cast with `cast`, ranked by list position.
    /// Callers must deduplicate actor ids; the last position wins
    /// otherwise. Retained members keep their row, with rank and
    /// character updated when they moved or changed role.
    pub async fn assign_actors(&self, movie_id: i32, cast: &[CastMember]) -> AppResult<()> {
        if !self.exists(movie_id).await? {
            return Err(AppError::NotFound("movie"));
        }

        let current: Vec<RankedCastMember> = actor_movie::Entity::find()
            .filter(actor_movie::Column::MovieId.eq(movie_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|row| RankedCastMember {
                actor_id: row.actor_id,
                character: row.character,
                cast_order: row.cast_order,
            })
            .collect();

        let desired = sync::assign_ranks(cast);
        let changes = sync::reconcile_cast(&current, &desired);
        if changes.is_empty() {
            return Ok(());
        }

        let txn = self.db.begin().await?;

        if !changes.delete.is_empty() {
            actor_movie::Entity::delete_many()
                .filter(actor_movie::Column::MovieId.eq(movie_id))
                .filter(actor_movie::Column::ActorId.is_in(changes.delete))
                .exec(&txn)
                .await?;
        }

        for member in &changes.update {
            actor_movie::Entity::update_many()
                .set(actor_movie::ActiveModel {
                    cast_order: Set(member.cast_order),
                    character: Set(member.character.clone()),
                    ..Default::default()
                })
                .filter(actor_movie::Column::MovieId.eq(movie_id))
                .filter(actor_movie::Column::ActorId.eq(member.actor_id))
                .exec(&txn)
                .await?;
        }

        if !changes.insert.is_empty() {
            let rows = changes.insert.iter().map(|member| actor_movie::ActiveModel {
                movie_id: Set(movie_id),
                actor_id: Set(member.actor_id),
                cast_order: Set(member.cast_order),
                character: Set(member.character.clone()),
            });
            actor_movie::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ActiveModelTrait;

    use super::*;
    use crate::{actors::ActorStore, db, genres::GenreStore};

    async fn setup() -> (MovieStore, GenreStore, ActorStore, DatabaseConnection) {
        let db = db::connect_for_tests().await;
        (MovieStore::new(db.clone()), GenreStore::new(db.clone()), ActorStore::new(db.clone()), db)
    }

    fn cast_member(actor_id: i32, character: &str) -> CastMember {
        CastMember { actor_id, character: character.to_string() }
    }

    #[tokio::test]
    async fn create_then_assign_genres_then_read_back() {
        let (movies, genres, _, _) = setup().await;

        let movie_id =
            movies.create("Inception".to_string(), "2010-07-16".to_string(), None).await.unwrap();
        let scifi = genres.create("SciFi".to_string()).await.unwrap();
        let thriller = genres.create("Thriller".to_string()).await.unwrap();

        movies.assign_genres(movie_id, &[scifi, thriller]).await.unwrap();

        let details = movies.get_by_id(movie_id).await.unwrap().unwrap();
        let mut ids: Vec<i32> = details.genres.iter().map(|g| g.id).collect();
        ids.sort();
        assert_eq!(ids, vec![scifi, thriller]);
    }

    #[tokio::test]
    async fn assign_genres_twice_is_idempotent() {
        let (movies, genres, _, db) = setup().await;

        let movie_id =
            movies.create("Memento".to_string(), "2000-10-11".to_string(), None).await.unwrap();
        let noir = genres.create("Noir".to_string()).await.unwrap();
        let thriller = genres.create("Thriller".to_string()).await.unwrap();

        movies.assign_genres(movie_id, &[noir, thriller]).await.unwrap();
        movies.assign_genres(movie_id, &[noir, thriller]).await.unwrap();

        let pairs = genre_movie::Entity::find()
            .filter(genre_movie::Column::MovieId.eq(movie_id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[tokio::test]
    async fn assign_actors_orders_cast_by_list_position() {
        let (movies, _, actors, _) = setup().await;

        let movie_id =
            movies.create("Inception".to_string(), "2010-07-16".to_string(), None).await.unwrap();
        let a1 = actors.create("Leonardo DiCaprio".to_string(), None).await.unwrap();
        let a2 = actors.create("Joseph Gordon-Levitt".to_string(), None).await.unwrap();
        let a3 = actors.create("Marion Cotillard".to_string(), None).await.unwrap();

        movies
            .assign_actors(
                movie_id,
                &[cast_member(a1, "Cobb"), cast_member(a2, "Arthur"), cast_member(a3, "Mal")],
            )
            .await
            .unwrap();

        let details = movies.get_by_id(movie_id).await.unwrap().unwrap();
        let readback: Vec<(i32, i32, String)> = details
            .cast
            .iter()
            .map(|(pairing, _)| (pairing.actor_id, pairing.cast_order, pairing.character.clone()))
            .collect();
        assert_eq!(
            readback,
            vec![
                (a1, 1, "Cobb".to_string()),
                (a2, 2, "Arthur".to_string()),
                (a3, 3, "Mal".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn dropping_an_actor_reranks_the_rest() {
        let (movies, _, actors, db) = setup().await;

        let movie_id =
            movies.create("Inception".to_string(), "2010-07-16".to_string(), None).await.unwrap();
        let a1 = actors.create("A1".to_string(), None).await.unwrap();
        let a2 = actors.create("A2".to_string(), None).await.unwrap();
        let a3 = actors.create("A3".to_string(), None).await.unwrap();

        movies
            .assign_actors(
                movie_id,
                &[cast_member(a1, "Cobb"), cast_member(a2, "Arthur"), cast_member(a3, "Mal")],
            )
            .await
            .unwrap();
        movies
            .assign_actors(movie_id, &[cast_member(a2, "Arthur"), cast_member(a3, "Mal")])
            .await
            .unwrap();

        let rows = actor_movie::Entity::find()
            .filter(actor_movie::Column::MovieId.eq(movie_id))
            .order_by_asc(actor_movie::Column::CastOrder)
            .all(&db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].actor_id, rows[0].cast_order), (a2, 1));
        assert_eq!((rows[1].actor_id, rows[1].cast_order), (a3, 2));
    }

    #[tokio::test]
    async fn assignment_on_missing_movie_is_not_found_and_writes_nothing() {
        let (movies, genres, _, db) = setup().await;
        let genre_id = genres.create("Drama".to_string()).await.unwrap();

        let err = movies.assign_genres(9999, &[genre_id]).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = movies.assign_actors(9999, &[cast_member(1, "Nobody")]).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert_eq!(genre_movie::Entity::find().all(&db).await.unwrap().len(), 0);
        assert_eq!(actor_movie::Entity::find().all(&db).await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn deleting_a_movie_cascades_comments_and_associations() {
        let (movies, genres, actors, db) = setup().await;

        let movie_id =
            movies.create("Heat".to_string(), "1995-12-15".to_string(), None).await.unwrap();
        let genre_id = genres.create("Crime".to_string()).await.unwrap();
        let actor_id = actors.create("Al Pacino".to_string(), None).await.unwrap();

        movies.assign_genres(movie_id, &[genre_id]).await.unwrap();
        movies.assign_actors(movie_id, &[cast_member(actor_id, "Vincent Hanna")]).await.unwrap();
        comment::ActiveModel {
            movie_id: Set(movie_id),
            body: Set("classic".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        movies.delete(movie_id).await.unwrap();

        assert!(movies.get_by_id(movie_id).await.unwrap().is_none());
        assert!(genre_movie::Entity::find().all(&db).await.unwrap().is_empty());
        assert!(actor_movie::Entity::find().all(&db).await.unwrap().is_empty());
        assert!(comment::Entity::find().all(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_is_windowed_with_total() {
        let (movies, _, _, _) = setup().await;

        // Insert out of alphabetical order; listing sorts by title.
        movies.create("M3".to_string(), "2003-01-01".to_string(), None).await.unwrap();
        movies.create("M1".to_string(), "2001-01-01".to_string(), None).await.unwrap();
        movies.create("M2".to_string(), "2002-01-01".to_string(), None).await.unwrap();

        let page = movies.get_all(Pagination { page: 2, records_per_page: 1 }).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "M2");

        let past_the_end =
            movies.get_all(Pagination { page: 9, records_per_page: 1 }).await.unwrap();
        assert_eq!(past_the_end.total, 3);
        assert!(past_the_end.items.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_scalars_only() {
        let (movies, genres, _, _) = setup().await;

        let movie_id =
            movies.create("Alien".to_string(), "1979-05-25".to_string(), None).await.unwrap();
        let genre_id = genres.create("Horror".to_string()).await.unwrap();
        movies.assign_genres(movie_id, &[genre_id]).await.unwrap();

        movies
            .update(movie_id, "Aliens".to_string(), "1986-07-18".to_string(), None)
            .await
            .unwrap();

        let details = movies.get_by_id(movie_id).await.unwrap().unwrap();
        assert_eq!(details.movie.title, "Aliens");
        assert_eq!(details.genres.len(), 1);

        let err = movies
            .update(4242, "Nope".to_string(), "2022-07-22".to_string(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
