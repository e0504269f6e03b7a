use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;

use crate::{
    domain::Place,
    ports::{
        open_location::OpenAtLocationPort,
        places::{Error, PlaceRepository},
    },
};

use super::DomainLogic;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchPlacesRequest;

impl<R, P> Service<FetchPlacesRequest> for DomainLogic<R, P>
where
    R: PlaceRepository + 'static,
    P: OpenAtLocationPort + 'static,
{
    type Response = Vec<Place>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: FetchPlacesRequest) -> Self::Future {
        let repository = self.repository.clone();
        Box::pin(async move { repository.fetch_places().await })
    }
}
