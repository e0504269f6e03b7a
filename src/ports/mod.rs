pub mod open_location;
pub mod places;
