use crate::domain::Place;

#[mockall::automock]
#[async_trait::async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn fetch_places(&self) -> Result<Vec<Place>, Error>;
}

/// Errors while fetching the list of places
///
/// This is the only failure shape that crosses the repository boundary: transport errors are
/// classified into one of these variants by the adapter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Connectivity failure, non-success status or an empty response
    #[error("network unavailable")]
    NetworkUnavailable,

    /// The response could not be understood
    #[error("invalid data")]
    InvalidData,

    #[error("unknown error")]
    Unknown,
}
