//! Typed results for the leaf operations.
//!
//! No leaf lets an error escape. Each returns an [`Outcome`] that says what
//! happened, and the caller picks the fallback value. Logging is a side
//! channel, not the only record of a failure.

use std::future::Future;
use std::time::Duration;

use tmdb_client::ProviderError;

/// What a leaf operation produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The provider answered and the value exists
    Found(T),
    /// The provider answered but had nothing matching (unknown genre, no trailer)
    Missing,
    /// The call failed: transport, status, decoding or timeout
    Failed(ProviderError),
}

impl<T> Outcome<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The value, collapsing `Missing` and `Failed` to `None`
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Missing | Self::Failed(_) => None,
        }
    }
}

impl<T: Default> Outcome<T> {
    /// The value, or the type's empty fallback
    pub fn unwrap_or_default(self) -> T {
        self.found().unwrap_or_default()
    }
}

/// Run a provider call under a hard deadline.
///
/// The HTTP client has its own timeout; this one also bounds providers that
/// never touch the network.
pub(crate) async fn with_deadline<T, F>(timeout: Duration, call: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallbacks() {
        assert_eq!(Outcome::Found(vec![1, 2]).unwrap_or_default(), vec![1, 2]);
        assert_eq!(Outcome::<Vec<u8>>::Missing.unwrap_or_default(), Vec::<u8>::new());
        let failed: Outcome<Vec<u8>> = Outcome::Failed(ProviderError::Transport("down".into()));
        assert!(failed.is_failed());
        assert!(failed.unwrap_or_default().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cuts_off_stalled_call() {
        let timeout = Duration::from_secs(3);
        let result: Result<(), _> = with_deadline(timeout, std::future::pending()).await;
        assert_eq!(result, Err(ProviderError::Timeout(timeout)));
    }

    #[tokio::test]
    async fn test_deadline_passes_result_through() {
        let call = async { Ok::<_, ProviderError>(7) };
        let result = with_deadline(Duration::from_secs(1), call).await;
        assert_eq!(result, Ok(7));
    }
}
