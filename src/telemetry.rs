use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "dishcraft=info";

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter; calling this twice is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
        tracing::info!("still logging after a second init");
    }
}
