//! Generic deep-link handling
//!
//! Nothing in here knows about places: `wikipedia` builds the links and translates
//! [`DeepLinkError`] into the domain's open-error taxonomy.

use tracing::debug;
use url::Url;

pub mod system;
pub mod wikipedia;

pub use system::SystemUrlOpener;
pub use wikipedia::WikipediaAdapter;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DeepLinkError {
    #[error("Failed to create URL")]
    UrlCreationFailed,

    #[error("Cannot open URL")]
    CannotOpenUrl,

    #[error("{} is not installed", .app_name.as_deref().unwrap_or("App"))]
    AppNotInstalled { app_name: Option<String> },
}

/// Low-level capability to hand a URL to the operating system
#[mockall::automock]
#[async_trait::async_trait]
pub trait UrlOpener: Send + Sync {
    /// Returns `true` when the URL was opened
    async fn open(&self, url: &Url) -> bool;
}

#[mockall::automock]
#[async_trait::async_trait]
pub trait DeepLinkService: Send + Sync {
    async fn open(&self, url: &Url) -> Result<(), DeepLinkError>;
}

/// Deep-link service on top of a [`UrlOpener`]
///
/// The opener only reports success or failure, so a failure is surfaced as an application that
/// is not installed, without a name.
#[derive(Clone, Debug)]
pub struct OpenerDeepLinks<U> {
    opener: U,
}

impl<U> OpenerDeepLinks<U> {
    pub fn new(opener: U) -> Self {
        Self { opener }
    }
}

#[async_trait::async_trait]
impl<U> DeepLinkService for OpenerDeepLinks<U>
where
    U: UrlOpener,
{
    async fn open(&self, url: &Url) -> Result<(), DeepLinkError> {
        if self.opener.open(url).await {
            Ok(())
        } else {
            debug!(%url, "url opener declined");
            Err(DeepLinkError::AppNotInstalled { app_name: None })
        }
    }
}
