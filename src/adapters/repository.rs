use tracing::warn;

use crate::{
    adapters::remote::{PlaceRecord, PlaceSource, TransportError},
    domain::Place,
    ports::places::{Error, PlaceRepository},
};

/// Place repository backed by a remote `PlaceSource`
///
/// This is the last layer where a `TransportError` may appear.
#[derive(Clone, Debug)]
pub struct RemotePlaceRepository<S> {
    source: S,
}

impl<S> RemotePlaceRepository<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl<S> PlaceRepository for RemotePlaceRepository<S>
where
    S: PlaceSource,
{
    async fn fetch_places(&self) -> Result<Vec<Place>, Error> {
        let records = self.source.fetch_places().await.map_err(|err| {
            let mapped = Error::from(&err);
            warn!(error = %err, ?mapped, "failed to fetch places");
            mapped
        })?;

        Ok(records.into_iter().map(Place::from).collect())
    }
}

impl From<PlaceRecord> for Place {
    /// Every record gets a fresh identity
    fn from(record: PlaceRecord) -> Self {
        Place::new(record.name, record.lat, record.long)
    }
}

impl From<&TransportError> for Error {
    fn from(err: &TransportError) -> Self {
        match err {
            TransportError::NoData
            | TransportError::NetworkFailure(_)
            | TransportError::HttpStatus(_) => Error::NetworkUnavailable,
            TransportError::InvalidUrl | TransportError::Decoding(_) => Error::InvalidData,
            TransportError::Unknown => Error::Unknown,
        }
    }
}
