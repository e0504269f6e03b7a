//! Remote place list: HTTP transport and the source reader built on it

pub mod client;
pub mod source;

pub use client::{Endpoint, HttpClient, NetworkConfig, TransportError};
pub use source::{PlaceRecord, PlaceSource, RemotePlaceSource};
