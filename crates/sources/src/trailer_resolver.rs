//! TrailerResolver - movie id → embeddable YouTube trailer URL
//!
//! The first "Trailer" on "YouTube" in the provider's own order wins; there
//! is no further tie-break.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, instrument, warn};

use catalog::MovieId;
use tmdb_client::{MetadataProvider, Video};

use crate::DEFAULT_CALL_TIMEOUT;
use crate::outcome::{Outcome, with_deadline};

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Finds a playable trailer for a movie
#[derive(Clone)]
pub struct TrailerResolver {
    provider: Arc<dyn MetadataProvider>,
    timeout: Duration,
}

impl TrailerResolver {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Deadline for the videos call (default: 10s)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Embed URL with autoplay, `Missing` when the movie has no YouTube trailer
    #[instrument(skip(self))]
    pub async fn resolve(&self, movie_id: MovieId) -> Outcome<String> {
        let videos = match with_deadline(self.timeout, self.provider.movie_videos(movie_id)).await {
            Ok(videos) => videos,
            Err(e) => {
                error!("Error fetching trailer for movie {}: {}", movie_id, e);
                return Outcome::Failed(e);
            }
        };

        match pick_trailer(&videos) {
            Some(video) => {
                debug!("Movie {} trailer key {}", movie_id, video.key);
                Outcome::Found(embed_url(&video.key))
            }
            None => {
                warn!("No trailers found for movie ID {}", movie_id);
                Outcome::Missing
            }
        }
    }
}

/// First YouTube trailer in response order that has a key to embed
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|video| {
            video.kind == "Trailer" && video.site == "YouTube" && !video.key.is_empty()
        })
}

/// Player URL for a YouTube video key
pub fn embed_url(key: &str) -> String {
    format!("{}{}?autoplay=1", YOUTUBE_EMBED_BASE, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Endpoint, FakeProvider};

    fn video(kind: &str, site: &str, key: &str) -> Video {
        Video {
            kind: kind.to_string(),
            site: site.to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn test_teaser_is_skipped() {
        let videos = vec![
            video("Teaser", "YouTube", "a"),
            video("Trailer", "YouTube", "b"),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("b"));
    }

    #[test]
    fn test_other_sites_are_skipped() {
        let videos = vec![
            video("Trailer", "Vimeo", "v"),
            video("Trailer", "YouTube", "y1"),
            video("Trailer", "YouTube", "y2"),
        ];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("y1"));
    }

    #[test]
    fn test_keyless_trailer_is_skipped() {
        let videos = vec![video("Trailer", "YouTube", ""), video("Trailer", "YouTube", "k")];
        assert_eq!(pick_trailer(&videos).map(|v| v.key.as_str()), Some("k"));
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(embed_url("b"), "https://www.youtube.com/embed/b?autoplay=1");
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let provider = Arc::new(FakeProvider::new().with_videos(
            7,
            vec![video("Teaser", "YouTube", "a"), video("Trailer", "YouTube", "b")],
        ));

        let outcome = TrailerResolver::new(provider).resolve(7).await;
        assert_eq!(
            outcome,
            Outcome::Found("https://www.youtube.com/embed/b?autoplay=1".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_without_trailer_is_missing() {
        let provider = Arc::new(
            FakeProvider::new().with_videos(7, vec![video("Featurette", "YouTube", "f")]),
        );

        let outcome = TrailerResolver::new(provider).resolve(7).await;
        assert_eq!(outcome, Outcome::Missing);
        assert_eq!(outcome.found(), None);
    }

    #[tokio::test]
    async fn test_resolve_failure_is_none() {
        let provider = Arc::new(FakeProvider::new().failing(Endpoint::Videos));

        let outcome = TrailerResolver::new(provider).resolve(7).await;
        assert!(outcome.is_failed());
        assert_eq!(outcome.found(), None);
    }
}
