use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

static INIT: OnceLock<()> = OnceLock::new();

/// Initialize `tracing` output on stderr. `RUST_LOG` wins over the `-v` count.
pub fn init(verbose: u8) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
        let subscriber = Registry::default().with(filter).with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        );
        if tracing::subscriber::set_global_default(subscriber).is_err() {
            // Ignore error if a subscriber is already set (e.g., tests).
        }
    });
}

// stdout carries the console listing, so stay quiet unless asked.
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(7), "trace");
    }

    #[test]
    fn init_is_idempotent() {
        init(0);
        init(3);
    }
}
