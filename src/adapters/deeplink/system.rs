use tokio::process::Command;
use tracing::warn;
use url::Url;

use super::UrlOpener;

/// Opens URLs with the platform's default handler
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemUrlOpener;

impl SystemUrlOpener {
    fn command(url: &Url) -> Command {
        let mut command = if cfg!(target_os = "macos") {
            Command::new("open")
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            // `start` treats the first quoted argument as a window title
            command.args(["/C", "start", ""]);
            command
        } else {
            Command::new("xdg-open")
        };
        command.arg(url.as_str());
        command
    }
}

#[async_trait::async_trait]
impl UrlOpener for SystemUrlOpener {
    async fn open(&self, url: &Url) -> bool {
        match Self::command(url).status().await {
            Ok(status) => status.success(),
            Err(err) => {
                warn!(%url, error = %err, "failed to launch url handler");
                false
            }
        }
    }
}
