use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{oneshot, watch};
use tower::{Service, ServiceExt};
use tracing::{debug, warn};

use super::{add_place::Completion, state::ViewState};
use crate::{
    commands::{FetchPlacesRequest, OpenPlaceRequest},
    domain::Place,
    ports::{open_location, places},
};

pub type PlacesState = ViewState<Vec<Place>, places::Error>;

const NETWORK_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";
const FALLBACK_MESSAGE: &str = "Something went wrong while loading places. Please try again.";

/// User-facing message for a failed load
pub fn load_failure_message(err: &places::Error) -> &'static str {
    match err {
        places::Error::NetworkUnavailable => NETWORK_MESSAGE,
        places::Error::InvalidData | places::Error::Unknown => FALLBACK_MESSAGE,
    }
}

/// State behind the place list screen
///
/// Owns the view state and the in-memory place sets. Only the most recently started load may
/// write state: starting a load signals the previous one and any result it still produces is
/// discarded.
pub struct PlaceListModel<F, O> {
    fetch: F,
    open: O,
    state: watch::Sender<PlacesState>,
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    fetched: Vec<Place>,
    /// Survives reloads
    user_added: Vec<Place>,
    current_load: Option<CurrentLoad>,
    generation: u64,
    open_error: Option<open_location::Error>,
}

impl Inner {
    fn merged(&self) -> Vec<Place> {
        self.fetched
            .iter()
            .chain(self.user_added.iter())
            .cloned()
            .collect()
    }
}

struct CurrentLoad {
    generation: u64,
    /// Dropping or firing this signals the load that it was superseded
    _cancel: oneshot::Sender<()>,
}

impl<F, O> PlaceListModel<F, O>
where
    F: Service<FetchPlacesRequest, Response = Vec<Place>, Error = places::Error> + Clone,
    O: Service<OpenPlaceRequest, Response = (), Error = open_location::Error> + Clone,
{
    pub fn new(fetch: F, open: O) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);
        Self {
            fetch,
            open,
            state,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn state(&self) -> PlacesState {
        self.state.borrow().clone()
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<PlacesState> {
        self.state.subscribe()
    }

    /// Fetched places followed by user-added ones
    pub fn places(&self) -> Vec<Place> {
        self.lock().merged()
    }

    pub fn open_error(&self) -> Option<open_location::Error> {
        self.lock().open_error.clone()
    }

    pub fn dismiss_open_error(&self) {
        self.lock().open_error = None;
    }

    /// Load the place list, superseding any load already in flight
    ///
    /// A superseded load returns without touching state. Failures end in
    /// [`ViewState::Error`]; retrying means calling this again.
    pub async fn load_places(&self) {
        let (generation, superseded) = self.begin_load();

        let result = tokio::select! {
            biased;
            _ = superseded => {
                debug!(generation, "load superseded");
                return;
            }
            result = self.fetch.clone().oneshot(FetchPlacesRequest) => result,
        };

        self.finish_load(generation, result);
    }

    fn begin_load(&self) -> (u64, oneshot::Receiver<()>) {
        let (cancel, superseded) = oneshot::channel();
        let mut inner = self.lock();
        inner.generation += 1;
        let generation = inner.generation;
        // Dropping the previous marker's sender cancels that load
        inner.current_load = Some(CurrentLoad {
            generation,
            _cancel: cancel,
        });
        debug!(generation, "loading places");
        self.state.send_replace(ViewState::Loading);
        (generation, superseded)
    }

    fn finish_load(&self, generation: u64, result: Result<Vec<Place>, places::Error>) {
        let mut inner = self.lock();
        let is_current = inner
            .current_load
            .as_ref()
            .is_some_and(|current| current.generation == generation);
        if !is_current {
            debug!(generation, "discarding stale load result");
            return;
        }
        inner.current_load = None;

        let state = match result {
            Ok(fetched) => {
                debug!(generation, count = fetched.len(), "places loaded");
                inner.fetched = fetched;
                ViewState::Loaded(inner.merged())
            }
            Err(cause) => {
                warn!(generation, error = %cause, "failed to load places");
                ViewState::Error {
                    message: load_failure_message(&cause).to_string(),
                    cause,
                }
            }
        };
        self.state.send_replace(state);
    }

    /// Append a user-added place and show the merged list
    ///
    /// Succeeds from any state, including after a failed load.
    pub fn add_place(&self, place: Place) {
        let mut inner = self.lock();
        debug!(id = %place.id(), "adding place");
        inner.user_added.push(place);
        self.state.send_replace(ViewState::Loaded(inner.merged()));
    }

    /// Wait for an add-place flow and add its place if one was submitted
    pub async fn add_from(&self, completion: Completion<Place>) -> bool {
        match completion.await {
            Some(place) => {
                self.add_place(place);
                true
            }
            None => false,
        }
    }

    /// Open the external viewer at `place`
    ///
    /// Failures are kept in [`Self::open_error`] and leave the view state untouched.
    pub async fn open_place(&self, place: Place) {
        let id = place.id();
        if let Err(err) = self.open.clone().oneshot(OpenPlaceRequest { place }).await {
            warn!(%id, error = %err, "failed to open place");
            self.lock().open_error = Some(err);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
