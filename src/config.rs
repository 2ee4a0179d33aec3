/// API endpoint and timing configuration, resolved once at startup
use crate::lifecycle::RetryPolicy;

pub const LOCAL_API_URL: &str = "http://localhost:5000";
pub const PRODUCTION_API_URL: &str = "https://visionflow-backend.onrender.com";

/// Build-time override, e.g. `VISIONFLOW_API_URL=https://api.example.com wasm-pack build`
const API_URL_OVERRIDE: Option<&str> = option_env!("VISIONFLOW_API_URL");

const LOCAL_HOSTNAMES: [&str; 2] = ["localhost", "127.0.0.1"];

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    /// Applied to every request; generous to ride out backend cold starts
    pub timeout_ms: u32,
    pub poll_interval_ms: u32,
    /// Passed to `GET /data?limit=`
    pub record_limit: u32,
    pub retry: RetryPolicy,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Self {
        ApiConfig {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout_ms: 30_000,
            poll_interval_ms: 8_000,
            record_limit: 50,
            retry: RetryPolicy::default(),
        }
    }

    /// Resolve from the build-time override and the page's hostname
    pub fn from_environment() -> Self {
        let hostname = web_sys::window().and_then(|window| window.location().hostname().ok());
        let config = Self::resolve(API_URL_OVERRIDE, hostname.as_deref());
        log::info!("Using extraction API at {}", config.base_url);
        config
    }

    /// Precedence: explicit override, then localhost when served locally, then production
    pub fn resolve(explicit: Option<&str>, hostname: Option<&str>) -> Self {
        if let Some(url) = explicit.map(str::trim).filter(|url| !url.is_empty()) {
            return Self::new(url);
        }

        let is_local = hostname.is_some_and(|host| LOCAL_HOSTNAMES.contains(&host));
        if is_local {
            Self::new(LOCAL_API_URL)
        } else {
            Self::new(PRODUCTION_API_URL)
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(PRODUCTION_API_URL)
    }
}
