//! Add-place flow
//!
//! Presenting the form creates a [`CompletionToken`] and a [`Completion`] future. The token is
//! resolved exactly once: with the new place on a valid submit, or with `None` on cancel. The
//! sheet cancels on drop, so a dismissal that bypasses both still resolves the flow.

use std::{
    future::Future,
    ops::RangeInclusive,
    pin::Pin,
    task::{Context, Poll},
};

use tokio::sync::oneshot;
use tracing::debug;

use crate::domain::Place;

const LATITUDE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE: RangeInclusive<f64> = -180.0..=180.0;

/// Single-resolution handle for the outcome of a modal flow
#[derive(Debug)]
pub struct CompletionToken<T> {
    resolver: Option<oneshot::Sender<Option<T>>>,
    resolved: bool,
}

impl<T> CompletionToken<T> {
    pub fn new() -> (Self, Completion<T>) {
        let (tx, rx) = oneshot::channel();
        let token = Self {
            resolver: Some(tx),
            resolved: false,
        };
        (token, Completion(rx))
    }

    /// Deliver the outcome
    ///
    /// Returns `false` without doing anything if the token was already resolved.
    pub fn resolve(&mut self, value: Option<T>) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        match self.resolver.take() {
            // The receiver may be gone already; the token is consumed either way.
            Some(resolver) => resolver.send(value).is_ok(),
            None => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

/// Receiving side of a [`CompletionToken`]
///
/// Resolves to the submitted value, or `None` when the flow was cancelled or its token was
/// dropped unresolved.
#[derive(Debug)]
pub struct Completion<T>(oneshot::Receiver<Option<T>>);

impl<T> Future for Completion<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0)
            .poll(cx)
            .map(|res| res.ok().flatten())
    }
}

/// Form state for adding a place
#[derive(Debug)]
pub struct AddPlaceForm {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    show_error: bool,
    token: CompletionToken<Place>,
}

impl AddPlaceForm {
    pub fn new(token: CompletionToken<Place>) -> Self {
        Self {
            name: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            show_error: false,
            token,
        }
    }

    /// Whether the invalid-input notice should be shown
    pub fn show_error(&self) -> bool {
        self.show_error
    }

    pub fn dismiss_error(&mut self) {
        self.show_error = false;
    }

    pub fn is_resolved(&self) -> bool {
        self.token.is_resolved()
    }

    /// Validate the input and resolve with the new place
    ///
    /// Out-of-range coordinates are rejected here rather than clamped. On invalid input the
    /// error flag is raised and the flow stays open.
    pub fn submit(&mut self) {
        let coordinates = parse_in(&self.latitude, LATITUDE).zip(parse_in(&self.longitude, LONGITUDE));
        let Some((latitude, longitude)) = coordinates else {
            debug!(latitude = %self.latitude, longitude = %self.longitude, "invalid coordinates");
            self.show_error = true;
            return;
        };

        let name = self.name.trim();
        let name = (!name.is_empty()).then(|| name.to_string());
        self.token.resolve(Some(Place::new(name, latitude, longitude)));
    }

    pub fn cancel(&mut self) {
        self.token.resolve(None);
    }
}

fn parse_in(input: &str, range: RangeInclusive<f64>) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| range.contains(value))
}

/// Host of a presented [`AddPlaceForm`]
///
/// Tearing the sheet down cancels the form, which is a no-op when it already resolved.
#[derive(Debug)]
pub struct AddPlaceSheet {
    form: AddPlaceForm,
}

impl AddPlaceSheet {
    pub fn present() -> (Self, Completion<Place>) {
        let (token, completion) = CompletionToken::new();
        let sheet = Self {
            form: AddPlaceForm::new(token),
        };
        (sheet, completion)
    }

    pub fn form(&self) -> &AddPlaceForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AddPlaceForm {
        &mut self.form
    }
}

impl Drop for AddPlaceSheet {
    fn drop(&mut self) {
        if !self.form.is_resolved() {
            debug!("add place sheet dismissed without completing");
            self.form.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use speculoos::prelude::*;

    fn filled(latitude: &str, longitude: &str, name: &str) -> (AddPlaceSheet, Completion<Place>) {
        let (mut sheet, completion) = AddPlaceSheet::present();
        let form = sheet.form_mut();
        form.latitude = latitude.to_string();
        form.longitude = longitude.to_string();
        form.name = name.to_string();
        (sheet, completion)
    }

    #[rstest]
    #[case("100", "4")]
    #[case("-90.5", "4")]
    #[case("52", "180.1")]
    #[case("52", "-181")]
    #[case("abc", "4")]
    #[case("52", "")]
    #[case("NaN", "4")]
    #[case("inf", "4")]
    fn test_submit_rejects_invalid(#[case] latitude: &str, #[case] longitude: &str) {
        // GIVEN a form with invalid coordinates
        let (mut sheet, _completion) = filled(latitude, longitude, "Somewhere");

        // WHEN submitting
        sheet.form_mut().submit();

        // THEN it shows an error and stays unresolved
        assert_that!(sheet.form().show_error()).is_true();
        assert_that!(sheet.form().is_resolved()).is_false();
    }

    #[rstest]
    #[case("90", "180", 90.0, 180.0)]
    #[case("-90", "-180", -90.0, -180.0)]
    #[case("52.37", "4.89", 52.37, 4.89)]
    #[case(" 0 ", "0", 0.0, 0.0)]
    #[tokio::test]
    async fn test_submit_resolves_place(
        #[case] latitude: &str,
        #[case] longitude: &str,
        #[case] expected_latitude: f64,
        #[case] expected_longitude: f64,
    ) {
        let (mut sheet, completion) = filled(latitude, longitude, "  Amsterdam  ");

        sheet.form_mut().submit();
        drop(sheet);

        let place = completion.await;
        assert_that!(place).is_some().matches(|place| {
            place.name() == Some("Amsterdam")
                && place.coordinate().latitude() == expected_latitude
                && place.coordinate().longitude() == expected_longitude
        });
    }

    #[tokio::test]
    async fn test_blank_name_is_none() {
        let (mut sheet, completion) = filled("1", "2", "   ");

        sheet.form_mut().submit();

        assert_that!(completion.await)
            .is_some()
            .matches(|place| place.name().is_none());
    }

    #[tokio::test]
    async fn test_cancel_resolves_none() {
        let (mut sheet, completion) = AddPlaceSheet::present();

        sheet.form_mut().cancel();

        assert_that!(sheet.form().is_resolved()).is_true();
        assert_that!(completion.await).is_none();
    }

    #[tokio::test]
    async fn test_dismissal_resolves_none() {
        // GIVEN a sheet that is torn down without submit or cancel
        let (sheet, completion) = AddPlaceSheet::present();

        drop(sheet);

        // THEN the flow still completes
        assert_that!(completion.await).is_none();
    }

    #[tokio::test]
    async fn test_first_resolution_wins() {
        // GIVEN a submitted form
        let (mut sheet, completion) = filled("10", "20", "First");
        sheet.form_mut().submit();

        // WHEN cancelling and dismissing afterwards
        sheet.form_mut().cancel();
        sheet.form_mut().cancel();
        drop(sheet);

        // THEN the submitted place is delivered
        assert_that!(completion.await)
            .is_some()
            .matches(|place| place.name() == Some("First"));
    }

    #[test]
    fn test_token_resolves_once() {
        let (mut token, _completion) = CompletionToken::new();

        assert_that!(token.resolve(Some(1))).is_true();
        assert_that!(token.resolve(Some(2))).is_false();
        assert_that!(token.resolve(None)).is_false();
        assert_that!(token.is_resolved()).is_true();
    }

    #[test]
    fn test_submit_after_error_recovers() {
        let (mut sheet, _completion) = filled("100", "4", "");
        sheet.form_mut().submit();
        assert_that!(sheet.form().show_error()).is_true();

        let form = sheet.form_mut();
        form.dismiss_error();
        form.latitude = "45".to_string();
        form.submit();

        assert_that!(sheet.form().show_error()).is_false();
        assert_that!(sheet.form().is_resolved()).is_true();
    }
}
