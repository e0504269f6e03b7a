use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid log filter: {0}")]
    Filter(String),

    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) -> Result<(), Error> {
    let filter = env_filter(default_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| Error::Init(err.to_string()))
}

fn env_filter(default_level: &str) -> Result<EnvFilter, Error> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| Error::Filter(err.to_string()))
}
