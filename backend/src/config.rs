use rocket::http::uri::Origin;
use tracing::warn;

pub const BASE_PATH_KEY: &str = "API_BASE_PATH";
pub const ALLOWED_ORIGINS_KEY: &str = "CORS_ALLOWED_ORIGINS";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedOrigins {
    #[default]
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw.split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        match self {
            AllowedOrigins::Any => true,
            AllowedOrigins::List(list) => list.iter().any(|o| o == origin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_path: String,
    pub allowed_origins: AllowedOrigins,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: "/".into(),
            allowed_origins: AllowedOrigins::Any,
        }
    }
}

impl AppConfig {
    /// Builds the config from a key lookup, e.g. the deployment's secret store.
    /// Missing keys keep their defaults; malformed ones are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(BASE_PATH_KEY) {
            match normalize_base_path(&raw) {
                Some(path) => config.base_path = path,
                None => warn!("Ignoring invalid {} {:?}, using {}", BASE_PATH_KEY, raw, config.base_path),
            }
        }

        if let Some(raw) = lookup(ALLOWED_ORIGINS_KEY) {
            config.allowed_origins = AllowedOrigins::parse(&raw);
        }

        config
    }
}

fn normalize_base_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let path = match trimmed.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    let origin = Origin::parse(path).ok()?;
    if origin.query().is_some() || !path.starts_with('/') {
        return None;
    }
    Some(path.to_string())
}
