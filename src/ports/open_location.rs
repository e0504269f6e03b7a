use crate::domain::Place;

/// Capability to open an external place viewer at a `Place`
#[mockall::automock]
#[async_trait::async_trait]
pub trait OpenAtLocationPort: Send + Sync {
    async fn open_at(&self, place: &Place) -> Result<(), Error>;
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The link for the place could not be built
    #[error("Failed to create URL")]
    UrlCreationFailed,

    /// The link was built but could not be opened
    #[error("Cannot open URL")]
    CannotOpenUrl,

    /// The target application is not installed
    ///
    /// The adapter does not know why opening failed, so this is also the generic "could not
    /// open" outcome when it targets a known application.
    #[error("{}", not_installed_message(.app_name))]
    AppNotInstalled { app_name: Option<String> },
}

fn not_installed_message(app_name: &Option<String>) -> String {
    match app_name {
        Some(name) => format!("{name} is not installed"),
        None => "App is not installed".to_string(),
    }
}
