//! Provider response shapes.
//!
//! Fields the provider may omit or null out default to empty so a sparse
//! record still decodes.

use serde::Deserialize;

use catalog::{Genre, MovieSummary, null_as_default};

// ---------------------------------------------------------------------------
// Envelopes (private -- callers only see the unwrapped lists)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DiscoverResponse {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

// ---------------------------------------------------------------------------
// Public payloads
// ---------------------------------------------------------------------------

/// `movie/{id}?append_to_response=credits`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetailsPayload {
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub credits: Credits,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Cast entries arrive in billing order
#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrewMember {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job: String,
}

/// One entry of `movie/{id}/videos`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
}
