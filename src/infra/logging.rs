//! stderr tracing subscriber.
//!
//! `RUST_LOG` wins when set; otherwise `warn`, or `error` under `--quiet`.

use tracing_subscriber::EnvFilter;

use crate::cli::AppContext;

pub fn init(ctx: &AppContext)
{
    let fallback = if ctx.quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!ctx.no_color)
        .with_target(false)
        .try_init();
}
