//! Runtime Configuration
//!
//! Everything is read from the environment once at startup. Values are
//! trimmed; an empty variable counts as unset.

use std::time::Duration;

use anyhow::{Context, bail};
use magic_auth::AuthConfig;
use magic_auth::config::{DEV_TOKEN_SECRET, Environment};

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_WEB_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_COOKIE_NAME: &str = "lumen_session";
const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);
const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 3600);

/// Outbound mail provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendSettings {
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub environment: Environment,
    pub addr: String,
    pub web_origins: Vec<String>,
    /// `None` selects the in-memory backend
    pub database_url: Option<String>,
    pub app_url: String,
    pub token_ttl: Duration,
    pub session_ttl: Duration,
    pub token_secret: String,
    pub cookie_name: String,
    /// `None` selects console delivery
    pub resend: Option<ResendSettings>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = Environment::parse(&get("APP_ENV").unwrap_or_else(|| "development".into()));

        let mut web_origins = split_csv(&get("WEB_ORIGINS").unwrap_or_default());
        if web_origins.is_empty() {
            web_origins.push(get("WEB_ORIGIN").unwrap_or_else(|| DEFAULT_WEB_ORIGIN.into()));
        }

        let app_url = get("APP_URL").unwrap_or_else(|| web_origins[0].clone());

        let token_secret = get("AUTH_TOKEN_SECRET").unwrap_or_else(|| DEV_TOKEN_SECRET.into());
        if !environment.is_development() && token_secret == DEV_TOKEN_SECRET {
            bail!(
                "AUTH_TOKEN_SECRET must be set to a non-default value when APP_ENV={}",
                environment.as_str()
            );
        }

        let resend = match get("RESEND_API_KEY") {
            Some(api_key) => Some(ResendSettings {
                api_key,
                from: get("RESEND_FROM_EMAIL")
                    .context("RESEND_FROM_EMAIL is required when RESEND_API_KEY is set")?,
            }),
            None => None,
        };

        Ok(Self {
            environment,
            addr: normalize_addr(&get("API_ADDR").unwrap_or_else(|| DEFAULT_ADDR.into())),
            web_origins,
            database_url: get("DATABASE_URL"),
            app_url,
            token_ttl: duration_or(get("AUTH_TOKEN_TTL"), "AUTH_TOKEN_TTL", DEFAULT_TOKEN_TTL),
            session_ttl: duration_or(get("SESSION_TTL"), "SESSION_TTL", DEFAULT_SESSION_TTL),
            token_secret,
            cookie_name: get("AUTH_COOKIE_NAME").unwrap_or_else(|| DEFAULT_COOKIE_NAME.into()),
            resend,
        })
    }

    /// Auth subset handed to `magic_auth`
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            session_cookie_name: self.cookie_name.clone(),
            token_secret: self.token_secret.as_bytes().to_vec(),
            token_ttl: self.token_ttl,
            session_ttl: self.session_ttl,
            app_url: self.app_url.clone(),
            environment: self.environment,
            ..AuthConfig::default()
        }
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `:8080` binds every interface
fn normalize_addr(addr: &str) -> String {
    match addr.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{port}"),
        None => addr.to_string(),
    }
}

fn duration_or(value: Option<String>, key: &str, default: Duration) -> Duration {
    let Some(value) = value else {
        return default;
    };
    match parse_duration(&value) {
        Some(d) => d,
        None => {
            tracing::warn!(key, value = %value, "Unparsable duration, using default");
            default
        }
    }
}

/// Bare seconds (`120`) or a sequence of `<n><unit>` parts such as `1h30m`
/// or `500ms`. Units: `ms`, `s`, `m`, `h`, `d`.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse().ok().map(Duration::from_secs);
    }

    let mut total = Duration::ZERO;
    let mut rest = value;
    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return None;
        }
        let n: u64 = rest[..digits].parse().ok()?;
        rest = &rest[digits..];

        let unit = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let part = match &rest[..unit] {
            "ms" => Duration::from_millis(n),
            "s" => Duration::from_secs(n),
            "m" => Duration::from_secs(n.checked_mul(60)?),
            "h" => Duration::from_secs(n.checked_mul(3600)?),
            "d" => Duration::from_secs(n.checked_mul(86_400)?),
            _ => return None,
        };
        rest = &rest[unit..];
        total = total.checked_add(part)?;
    }
    Some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<ApiConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.web_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.app_url, "http://localhost:3000");
        assert!(config.database_url.is_none());
        assert_eq!(config.token_ttl, Duration::from_secs(900));
        assert_eq!(config.session_ttl, Duration::from_secs(86_400));
        assert_eq!(config.cookie_name, "lumen_session");
        assert!(config.resend.is_none());
    }

    #[test]
    fn test_origins_and_app_url() {
        let config = load(&[("WEB_ORIGINS", " https://a.test , ,https://b.test")]).unwrap();
        assert_eq!(config.web_origins, vec!["https://a.test", "https://b.test"]);
        assert_eq!(config.app_url, "https://a.test");

        let config = load(&[("WEB_ORIGIN", "https://c.test"), ("APP_URL", "https://app.test")]).unwrap();
        assert_eq!(config.web_origins, vec!["https://c.test"]);
        assert_eq!(config.app_url, "https://app.test");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = load(&[("DATABASE_URL", "   "), ("AUTH_COOKIE_NAME", "")]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.cookie_name, "lumen_session");
    }

    #[test]
    fn test_production_rejects_dev_secret() {
        assert!(load(&[("APP_ENV", "production")]).is_err());
        assert!(
            load(&[
                ("APP_ENV", "production"),
                ("AUTH_TOKEN_SECRET", "dev-secret-change-me")
            ])
            .is_err()
        );

        let config = load(&[("APP_ENV", "production"), ("AUTH_TOKEN_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(config.auth_config().cookie_config().secure);
    }

    #[test]
    fn test_resend_requires_sender() {
        assert!(load(&[("RESEND_API_KEY", "re_123")]).is_err());

        let config = load(&[
            ("RESEND_API_KEY", "re_123"),
            ("RESEND_FROM_EMAIL", "Lumen <hi@lumen.test>"),
        ])
        .unwrap();
        assert_eq!(
            config.resend,
            Some(ResendSettings {
                api_key: "re_123".into(),
                from: "Lumen <hi@lumen.test>".into(),
            })
        );
    }

    #[test]
    fn test_go_style_addr() {
        let config = load(&[("API_ADDR", ":9090")]).unwrap();
        assert_eq!(config.addr, "0.0.0.0:9090");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("15m"), Some(Duration::from_secs(900)));
        assert_eq!(parse_duration("24h"), Some(Duration::from_secs(86_400)));
        assert_eq!(parse_duration("2d"), Some(Duration::from_secs(172_800)));
        assert_eq!(parse_duration("120"), Some(Duration::from_secs(120)));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("m"), None);
        assert_eq!(parse_duration("10w"), None);
        assert_eq!(parse_duration("-5m"), None);
    }

    #[test]
    fn test_parse_compound_duration() {
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("1m30s250ms"), Some(Duration::from_millis(90_250)));
        assert_eq!(parse_duration("1h 30m"), None);
        assert_eq!(parse_duration("1h30"), None);
        assert_eq!(parse_duration("h30m"), None);
    }

    #[test]
    fn test_bad_duration_falls_back() {
        let config = load(&[("AUTH_TOKEN_TTL", "soon"), ("SESSION_TTL", "1h")]).unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(900));
        assert_eq!(config.session_ttl, Duration::from_secs(3600));
        assert_eq!(config.auth_config().session_ttl, Duration::from_secs(3600));
    }
}
