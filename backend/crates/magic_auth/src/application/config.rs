//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::rate_limit::RateLimitConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Secret shipped for local development only
pub const DEV_TOKEN_SECRET: &str = "dev-secret-change-me";

/// Deployment environment
///
/// Anything other than `development` is treated as production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("development") {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Request-link thresholds, applied per IP and per email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub per_minute: u32,
    pub per_hour: u32,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            per_minute: 5,
            per_hour: 20,
        }
    }
}

impl RateLimitPolicy {
    /// Checks in evaluation order: ip/minute, ip/hour, email/minute, email/hour.
    ///
    /// Each dimension gets its own counter key so the minute and hour
    /// windows never share a count.
    pub fn checks(&self, ip: &str, email: &str) -> Vec<(String, RateLimitConfig)> {
        vec![
            (format!("ip:{ip}:minute"), RateLimitConfig::per_minute(self.per_minute)),
            (format!("ip:{ip}:hour"), RateLimitConfig::per_hour(self.per_hour)),
            (format!("email:{email}:minute"), RateLimitConfig::per_minute(self.per_minute)),
            (format!("email:{email}:hour"), RateLimitConfig::per_hour(self.per_hour)),
        ]
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// HMAC key for token hashes
    pub token_secret: Vec<u8>,
    /// Magic link lifetime
    pub token_ttl: Duration,
    /// Session lifetime
    pub session_ttl: Duration,
    /// Web app base URL the magic link points at
    pub app_url: String,
    pub environment: Environment,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    pub rate_limit: RateLimitPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "lumen_session".to_string(),
            token_secret: DEV_TOKEN_SECRET.as_bytes().to_vec(),
            token_ttl: Duration::from_secs(15 * 60),  // 15 minutes
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            app_url: "http://localhost:3000".to_string(),
            environment: Environment::Production,
            cookie_same_site: SameSite::Lax,
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie, link echoed back)
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            ..Default::default()
        }
    }

    /// Session cookie attributes; `Secure` everywhere but development
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: !self.environment.is_development(),
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }

    /// Whether the request-link response may include the link itself
    pub fn exposes_magic_link(&self) -> bool {
        self.environment.is_development()
    }

    /// `<app_url>/login/callback?token=<raw>`
    pub fn magic_link(&self, raw_token: &str) -> String {
        format!(
            "{}/login/callback?token={}",
            self.app_url.trim_end_matches('/'),
            raw_token
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse(" Development "), Environment::Development);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Production);
        assert_eq!(Environment::parse(""), Environment::Production);
    }

    #[test]
    fn test_magic_link_trims_trailing_slash() {
        let config = AuthConfig {
            app_url: "https://app.example.com///".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.magic_link("abc"),
            "https://app.example.com/login/callback?token=abc"
        );
    }

    #[test]
    fn test_cookie_secure_outside_development() {
        assert!(AuthConfig::default().cookie_config().secure);
        assert!(!AuthConfig::development().cookie_config().secure);
    }

    #[test]
    fn test_rate_limit_check_order() {
        let checks = RateLimitPolicy::default().checks("1.2.3.4", "a@x.com");
        let keys: Vec<_> = checks.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            [
                "ip:1.2.3.4:minute",
                "ip:1.2.3.4:hour",
                "email:a@x.com:minute",
                "email:a@x.com:hour"
            ]
        );
        assert_eq!(checks[0].1.max_requests, 5);
        assert_eq!(checks[1].1.max_requests, 20);
        assert_eq!(checks[1].1.window, Duration::from_secs(3600));
    }
}
