use std::sync::Arc;

pub mod fetch_places;
pub mod open_place;

pub use fetch_places::FetchPlacesRequest;
pub use open_place::OpenPlaceRequest;

/// Use cases over the place repository and the open-at-location port
///
/// Each use case is a `tower::Service` on this type, so callers depend on the service
/// signature rather than on the ports behind it.
pub struct DomainLogic<R, P> {
    repository: Arc<R>,
    opener: Arc<P>,
}

impl<R, P> DomainLogic<R, P> {
    pub fn new(repository: R, opener: P) -> Self {
        Self {
            repository: Arc::new(repository),
            opener: Arc::new(opener),
        }
    }
}

impl<R, P> Clone for DomainLogic<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            opener: self.opener.clone(),
        }
    }
}
