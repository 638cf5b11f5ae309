use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{actor, comment, genre, movie},
    movies::MovieDetails,
    sync::CastMember,
};

#[derive(Clone, Debug, Serialize)]
pub struct GenreDto {
    pub id: i32,
    pub name: String,
}

impl From<genre::Model> for GenreDto {
    fn from(model: genre::Model) -> Self {
        Self { id: model.id, name: model.name }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ActorDto {
    pub id: i32,
    pub name: String,
    pub picture: Option<String>,
}

impl From<actor::Model> for ActorDto {
    fn from(model: actor::Model) -> Self {
        Self { id: model.id, name: model.name, picture: model.picture }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDto {
    pub id: i32,
    pub title: String,
    pub release_date: String,
    pub poster: Option<String>,
}

impl From<movie::Model> for MovieDto {
    fn from(model: movie::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            release_date: model.release_date,
            poster: model.poster,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CommentDto {
    pub id: i32,
    pub body: String,
}

impl From<comment::Model> for CommentDto {
    fn from(model: comment::Model) -> Self {
        Self { id: model.id, body: model.body }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CastMemberDto {
    pub actor_id: i32,
    pub name: String,
    pub character: String,
    pub cast_order: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDetailsDto {
    pub id: i32,
    pub title: String,
    pub release_date: String,
    pub poster: Option<String>,
    pub comments: Vec<CommentDto>,
    pub genres: Vec<GenreDto>,
    pub cast: Vec<CastMemberDto>,
}

impl From<MovieDetails> for MovieDetailsDto {
    fn from(details: MovieDetails) -> Self {
        Self {
            id: details.movie.id,
            title: details.movie.title,
            release_date: details.movie.release_date,
            poster: details.movie.poster,
            comments: details.comments.into_iter().map(Into::into).collect(),
            genres: details.genres.into_iter().map(Into::into).collect(),
            cast: details
                .cast
                .into_iter()
                .map(|(pairing, actor)| CastMemberDto {
                    actor_id: actor.id,
                    name: actor.name,
                    character: pairing.character,
                    cast_order: pairing.cast_order,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateGenreRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// One desired cast entry; the list position in the request body decides
/// the rank.
#[derive(Debug, Deserialize)]
pub struct AssignActorRequest {
    pub actor_id: i32,
    pub character: String,
}

impl From<AssignActorRequest> for CastMember {
    fn from(req: AssignActorRequest) -> Self {
        Self { actor_id: req.actor_id, character: req.character }
    }
}

/// Parses and normalizes a multipart date field.
pub fn parse_release_date(raw: &str) -> Option<String> {
    raw.trim().parse::<Date>().ok().map(|date| date.to_string())
}
