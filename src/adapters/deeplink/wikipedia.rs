use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::warn;
use url::Url;

use super::{DeepLinkError, DeepLinkService};
use crate::{
    domain::Place,
    ports::open_location::{Error, OpenAtLocationPort},
};

pub const APP_NAME: &str = "Wikipedia";
const SCHEME: &str = "wikipedia";
const HOST: &str = "places";

/// Everything but RFC 3986 unreserved characters, so a space becomes `%20` rather than `+`
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build `wikipedia://places?lat=..&long=..[&name=..]` for a place
pub fn places_url(place: &Place) -> Result<Url, DeepLinkError> {
    let mut url = Url::parse(&format!("{SCHEME}://{HOST}"))
        .map_err(|_| DeepLinkError::UrlCreationFailed)?;

    let coordinate = place.coordinate();
    let mut query = format!(
        "lat={}&long={}",
        coordinate.latitude(),
        coordinate.longitude()
    );
    if let Some(name) = place.name() {
        query.push_str("&name=");
        query.extend(utf8_percent_encode(name, QUERY_VALUE));
    }
    url.set_query(Some(&query));

    match url.host_str() {
        Some(HOST) => Ok(url),
        _ => Err(DeepLinkError::UrlCreationFailed),
    }
}

/// Opens the Wikipedia app's Places view
///
/// Implements the domain's [`OpenAtLocationPort`] on top of a generic [`DeepLinkService`]. Any
/// failure to open is reported as Wikipedia not being installed; the deep-link vocabulary never
/// leaves this type.
#[derive(Clone, Debug)]
pub struct WikipediaAdapter<D> {
    deep_links: D,
}

impl<D> WikipediaAdapter<D> {
    pub fn new(deep_links: D) -> Self {
        Self { deep_links }
    }
}

impl<D> WikipediaAdapter<D>
where
    D: DeepLinkService,
{
    async fn open_places(&self, place: &Place) -> Result<(), DeepLinkError> {
        let url = places_url(place)?;
        self.deep_links.open(&url).await.map_err(|err| {
            warn!(%url, error = %err, "failed to open wikipedia");
            DeepLinkError::AppNotInstalled {
                app_name: Some(APP_NAME.to_string()),
            }
        })
    }
}

#[async_trait::async_trait]
impl<D> OpenAtLocationPort for WikipediaAdapter<D>
where
    D: DeepLinkService,
{
    async fn open_at(&self, place: &Place) -> Result<(), Error> {
        Ok(self.open_places(place).await?)
    }
}

impl From<DeepLinkError> for Error {
    fn from(err: DeepLinkError) -> Self {
        match err {
            DeepLinkError::UrlCreationFailed => Error::UrlCreationFailed,
            DeepLinkError::CannotOpenUrl => Error::CannotOpenUrl,
            DeepLinkError::AppNotInstalled { app_name } => Error::AppNotInstalled { app_name },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::deeplink::MockDeepLinkService;
    use rstest::*;
    use speculoos::prelude::*;
    use std::collections::HashMap;

    fn query(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_places_url_with_name() {
        let place = Place::new(Some("New York".to_string()), 40.7128, -74.006);

        let url = places_url(&place).unwrap();

        assert_that!(url.scheme()).is_equal_to("wikipedia");
        assert_that!(url.host_str()).is_equal_to(Some("places"));
        let query = query(&url);
        assert_that!(query.get("lat")).is_equal_to(Some(&"40.7128".to_string()));
        assert_that!(query.get("long")).is_equal_to(Some(&"-74.006".to_string()));
        assert_that!(query.get("name")).is_equal_to(Some(&"New York".to_string()));
    }

    #[rstest]
    #[case("New York", "New%20York")]
    #[case("São Paulo", "S%C3%A3o%20Paulo")]
    #[case("A&B=C+D", "A%26B%3DC%2BD")]
    #[case("Rock_n-roll.~", "Rock_n-roll.~")]
    fn test_places_url_percent_encodes_name(#[case] name: &str, #[case] encoded: &str) {
        let place = Place::new(Some(name.to_string()), 40.7128, -74.006);

        let url = places_url(&place).unwrap();

        // THEN the name is percent-encoded, never form-encoded
        assert_that!(url.as_str().to_string()).is_equal_to(format!(
            "wikipedia://places?lat=40.7128&long=-74.006&name={encoded}"
        ));
    }

    #[test]
    fn test_places_url_without_name() {
        let place = Place::new(None, 52.37, 4.89);

        let url = places_url(&place).unwrap();

        // THEN no empty name parameter is added
        assert_that!(url.as_str()).is_equal_to("wikipedia://places?lat=52.37&long=4.89");
    }

    #[tokio::test]
    async fn test_open_at_success() {
        // GIVEN a deep-link service that opens the places URL
        let mut deep_links = MockDeepLinkService::new();
        deep_links
            .expect_open()
            .times(1)
            .withf(|url| url.host_str() == Some("places"))
            .returning(|_| Ok(()));
        let adapter = WikipediaAdapter::new(deep_links);

        // WHEN opening a place
        let res = adapter.open_at(&Place::new(None, 1.0, 2.0)).await;

        // THEN it succeeds
        assert_that!(res).is_ok();
    }

    #[rstest]
    #[case(DeepLinkError::AppNotInstalled { app_name: None })]
    #[case(DeepLinkError::CannotOpenUrl)]
    #[tokio::test]
    async fn test_open_at_failure_is_not_installed(#[case] failure: DeepLinkError) {
        // GIVEN a deep-link service that cannot open the URL
        let mut deep_links = MockDeepLinkService::new();
        deep_links
            .expect_open()
            .times(1)
            .returning(move |_| Err(failure.clone()));
        let adapter = WikipediaAdapter::new(deep_links);

        // WHEN opening a place
        let res = adapter.open_at(&Place::new(Some("Amsterdam".to_string()), 52.37, 4.89)).await;

        // THEN the failure names Wikipedia
        assert_that!(res).is_err().is_equal_to(Error::AppNotInstalled {
            app_name: Some("Wikipedia".to_string()),
        });
    }

    #[rstest]
    #[case(DeepLinkError::UrlCreationFailed, Error::UrlCreationFailed)]
    #[case(DeepLinkError::CannotOpenUrl, Error::CannotOpenUrl)]
    #[case(DeepLinkError::AppNotInstalled { app_name: None }, Error::AppNotInstalled { app_name: None })]
    #[case(
        DeepLinkError::AppNotInstalled { app_name: Some("Maps".to_string()) },
        Error::AppNotInstalled { app_name: Some("Maps".to_string()) }
    )]
    fn test_error_translation(#[case] err: DeepLinkError, #[case] expected: Error) {
        assert_that!(Error::from(err)).is_equal_to(expected);
    }
}
