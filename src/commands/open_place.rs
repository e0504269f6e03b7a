use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower::Service;

use crate::{
    domain::Place,
    ports::{
        open_location::{Error, OpenAtLocationPort},
        places::PlaceRepository,
    },
};

use super::DomainLogic;

#[derive(Clone, Debug)]
pub struct OpenPlaceRequest {
    pub place: Place,
}

impl<R, P> Service<OpenPlaceRequest> for DomainLogic<R, P>
where
    R: PlaceRepository + 'static,
    P: OpenAtLocationPort + 'static,
{
    type Response = ();
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: OpenPlaceRequest) -> Self::Future {
        let opener = self.opener.clone();
        Box::pin(async move { opener.open_at(&req.place).await })
    }
}
