use std::hash::{Hash, Hasher};

use uuid::Uuid;

/// Geographic coordinate in decimal degrees
///
/// Out-of-range values are clamped at construction, never rejected: latitude to `[-90, 90]`
/// and longitude to `[-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: clamp(latitude, Self::LATITUDE_RANGE),
            longitude: clamp(longitude, Self::LONGITUDE_RANGE),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    // NaN has no meaningful position in the range
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(min, max)
}

/// A named or unnamed geographic place
///
/// Two places are the same entity when their `id` matches, even if the display fields differ.
#[derive(Clone, Debug)]
pub struct Place {
    /// Unique identifier for the `Place`
    ///
    /// Assigned once at creation and never reassigned.
    id: Uuid,
    name: Option<String>,
    coordinate: Coordinate,
}

impl Place {
    /// Create a place with a fresh identity
    pub fn new(name: Option<String>, latitude: f64, longitude: f64) -> Self {
        Self::with_id(Uuid::new_v4(), name, latitude, longitude)
    }

    pub fn with_id(id: Uuid, name: Option<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name,
            coordinate: Coordinate::new(latitude, longitude),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Name to show in a list, falling back to "Unknown" for unnamed places
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("Unknown")
    }

    pub fn formatted_coordinates(&self) -> String {
        format!(
            "{:.4}, {:.4}",
            self.coordinate.latitude, self.coordinate.longitude
        )
    }
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Place {}

impl Hash for Place {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use speculoos::prelude::*;

    #[rstest]
    #[case(100.0, 200.0, 90.0, 180.0)]
    #[case(-100.0, -200.0, -90.0, -180.0)]
    #[case(52.37, 4.89, 52.37, 4.89)]
    #[case(90.0, -180.0, 90.0, -180.0)]
    #[case(f64::NAN, f64::INFINITY, 0.0, 180.0)]
    fn test_coordinate_clamps(
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected_latitude: f64,
        #[case] expected_longitude: f64,
    ) {
        // WHEN creating a coordinate
        let coordinate = Coordinate::new(latitude, longitude);

        // THEN it is clamped into range
        assert_that!(coordinate.latitude()).is_equal_to(expected_latitude);
        assert_that!(coordinate.longitude()).is_equal_to(expected_longitude);
    }

    #[test]
    fn test_place_clamps_latitude() {
        let place = Place::new(None, 100.0, 4.0);

        assert_that!(place.coordinate().latitude()).is_equal_to(90.0);
    }

    #[test]
    fn test_equality_is_identity() {
        // GIVEN two places with the same id but different fields
        let id = Uuid::new_v4();
        let a = Place::with_id(id, Some("A".to_string()), 1.0, 2.0);
        let b = Place::with_id(id, Some("B".to_string()), 3.0, 4.0);

        // THEN they are the same entity
        assert_that!(a).is_equal_to(&b);

        // AND places with equal fields but fresh ids are not
        let c = Place::new(Some("A".to_string()), 1.0, 2.0);
        let d = Place::new(Some("A".to_string()), 1.0, 2.0);
        assert_that!(c).is_not_equal_to(&d);
    }

    #[test]
    fn test_display_helpers() {
        let named = Place::new(Some("Amsterdam".to_string()), 52.3676, 4.9041);
        let unnamed = Place::new(None, -33.8688, 151.20929);

        assert_that!(named.display_name()).is_equal_to("Amsterdam");
        assert_that!(unnamed.display_name()).is_equal_to("Unknown");
        assert_that!(unnamed.formatted_coordinates()).is_equal_to("-33.8688, 151.2093".to_string());
    }
}
