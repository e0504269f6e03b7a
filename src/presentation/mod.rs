//! Screen-level state driven by the use cases

pub mod add_place;
pub mod place_list;
pub mod state;

pub use add_place::{AddPlaceForm, AddPlaceSheet, Completion, CompletionToken};
pub use place_list::{PlaceListModel, PlacesState};
pub use state::ViewState;
