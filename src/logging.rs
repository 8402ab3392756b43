//! Log filter construction for the stderr and JSON file layers.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Filter read from the environment variable `var`, falling back to
/// `default` when the variable is unset or blank.
pub fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    filter_from(std::env::var(var).ok().as_deref(), default)
}

/// Filter from directives such as `debug` or `openaq_report=trace,warn`.
/// Invalid directives are skipped.
pub fn filter_from(directives: Option<&str>, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::{Layer, Registry};

    fn max_level(filter: &EnvFilter) -> Option<LevelFilter> {
        <EnvFilter as Layer<Registry>>::max_level_hint(filter)
    }

    #[test]
    fn test_default_applies_when_unset() {
        assert_eq!(max_level(&filter_from(None, LevelFilter::INFO)), Some(LevelFilter::INFO));
        assert_eq!(max_level(&filter_from(Some(""), LevelFilter::DEBUG)), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_level_from_environment_wins_over_default() {
        assert_eq!(
            max_level(&filter_from(Some("debug"), LevelFilter::INFO)),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            max_level(&filter_from(Some("warn"), LevelFilter::INFO)),
            Some(LevelFilter::WARN)
        );
    }
}
