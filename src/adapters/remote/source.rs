use serde::{Deserialize, Serialize};

use super::client::{Endpoint, HttpClient, TransportError};

/// A place as it appears on the wire
///
/// Records carry no identity: the repository assigns one when mapping to a `Place`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub long: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacesPayload {
    pub locations: Vec<PlaceRecord>,
}

/// Reader for the list-of-places resource
///
/// Returns raw records unchanged, or the transport error unchanged.
#[mockall::automock]
#[async_trait::async_trait]
pub trait PlaceSource: Send + Sync {
    async fn fetch_places(&self) -> Result<Vec<PlaceRecord>, TransportError>;
}

#[derive(Clone, Debug)]
pub struct RemotePlaceSource {
    client: HttpClient,
}

impl RemotePlaceSource {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl PlaceSource for RemotePlaceSource {
    async fn fetch_places(&self) -> Result<Vec<PlaceRecord>, TransportError> {
        let payload: PlacesPayload = self.client.request(Endpoint::Places).await?;
        Ok(payload.locations)
    }
}
