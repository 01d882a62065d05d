use std::env;
use std::time::Duration;

/// Bundled config for builds that ship without a `.env` (mobile, wasm)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Which tab receives a generated dish image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageTarget {
    /// The tab that was active when the image request was sent.
    #[default]
    CapturedAtRequest,
    /// Whichever tab is active when the response arrives.
    ActiveAtCompletion,
}

impl ImageTarget {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "request" | "captured" => Some(Self::CapturedAtRequest),
            "active" | "completion" => Some(Self::ActiveAtCompletion),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub reply_delay: Duration,
    pub image_target: ImageTarget,
    /// `None` leaves timeouts to the transport.
    pub http_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            reply_delay: DEFAULT_REPLY_DELAY,
            image_target: ImageTarget::default(),
            http_timeout: None,
        }
    }
}

impl AppConfig {
    /// Build the config from `DISHCRAFT_*` environment variables, falling back
    /// to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base_url = lookup("DISHCRAFT_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let reply_delay = lookup("DISHCRAFT_REPLY_DELAY_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.reply_delay);

        let image_target = match lookup("DISHCRAFT_IMAGE_TARGET") {
            Some(raw) => ImageTarget::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "unknown DISHCRAFT_IMAGE_TARGET, using default");
                defaults.image_target
            }),
            None => defaults.image_target,
        };

        let http_timeout = lookup("DISHCRAFT_HTTP_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            api_base_url,
            reply_delay,
            image_target,
            http_timeout,
        }
    }
}

/// Populate the process environment: `.env` first, then the bundled defaults
/// for anything still unset.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_env() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: called from main before any threads are spawned
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

fn parse_env_lines(source: &str) -> impl Iterator<Item = (&str, &str)> {
    source.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        line.split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
    })
}
