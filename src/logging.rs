use anyhow::{anyhow, Error};
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

const TIME_FORMAT: &str = "%H:%M:%S";

/// `--debug` turns on debug output for this crate; `RUST_LOG` wins when set.
pub fn init(debug: bool) -> Result<(), Error> {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("failed to install the logger: {err}"))
}
