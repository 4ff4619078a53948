//! Log output for the `numisma` binary and other programs embedding the SDK.
//!
//! The library only emits `tracing` events: quote fetches and cache hits at
//! debug, FX corrections and skipped articles at warn. Nothing is printed
//! until a subscriber is installed with [`init_tracing`].

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a global subscriber writing to stderr, so stdout stays free for
/// command output.
///
/// Without `RUST_LOG`, SDK events are shown from `level` up while HTTP client
/// internals stay at warn. With `json`, each event is one JSON object per
/// line. Only the first call in a process has any effect.
pub fn init_tracing(json: bool, level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    // A subscriber set earlier (e.g. by a test harness) wins.
    installed.ok();
}

fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("warn,numisma_sdk={level},numisma={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdk_targets_follow_requested_level() {
        assert_eq!(
            default_directives(Level::DEBUG),
            "warn,numisma_sdk=debug,numisma=debug"
        );
    }

    #[test]
    fn directives_parse() {
        assert!(EnvFilter::try_new(default_directives(Level::INFO)).is_ok());
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
    }
}
