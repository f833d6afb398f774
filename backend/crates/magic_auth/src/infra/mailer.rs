//! Mailer Implementations
//!
//! - [`ConsoleMailer`]: development delivery, writes the link to the log
//! - [`ResendMailer`]: Resend HTTP API

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::mailer::{MagicLinkMailer, MailerError};
use crate::domain::value_object::Email;

pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

const SUBJECT: &str = "Sign in to Lumen";

const DEFAULT_LINK_TTL: Duration = Duration::from_secs(15 * 60);

// ============================================================================
// Console
// ============================================================================

/// Logs the link instead of sending mail. The address is redacted; the link
/// itself only shows up at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMailer;

#[async_trait]
impl MagicLinkMailer for ConsoleMailer {
    async fn send(&self, email: &Email, link: &str) -> Result<(), MailerError> {
        tracing::info!(email = %email.redacted(), "Magic link issued (console delivery)");
        tracing::debug!(link = %link, "Magic link");
        Ok(())
    }
}

// ============================================================================
// Resend
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    from: String,
    endpoint: String,
    link_ttl: Duration,
}

#[derive(Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

impl ResendMailer {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            from: from.into(),
            endpoint: RESEND_API_URL.to_string(),
            link_ttl: DEFAULT_LINK_TTL,
        }
    }

    /// Lifetime quoted in the email body; should match the token TTL
    pub fn with_link_ttl(mut self, ttl: Duration) -> Self {
        self.link_ttl = ttl;
        self
    }

    /// Point at a different API endpoint (tests, regional hosts)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl MagicLinkMailer for ResendMailer {
    async fn send(&self, email: &Email, link: &str) -> Result<(), MailerError> {
        let payload = ResendPayload {
            from: &self.from,
            to: [email.as_str()],
            subject: SUBJECT,
            html: magic_link_html(link, self.link_ttl),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(email = %email.redacted(), "Magic link delivered via Resend");
        Ok(())
    }
}

fn magic_link_html(link: &str, ttl: Duration) -> String {
    let link = escape_html(link);
    let expires_in = describe_ttl(ttl);
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="margin:0;padding:40px 20px;background-color:#faf9f7;font-family:Helvetica,Arial,sans-serif;">
  <div style="max-width:480px;margin:0 auto;background-color:#ffffff;border-radius:12px;padding:48px 40px;text-align:center;">
    <h1 style="margin:0 0 24px;font-size:28px;color:#2d2926;">Lumen</h1>
    <p style="margin:0 0 24px;font-size:16px;color:#5a524b;">
      Click the button below to sign in. This link expires in {expires_in}.
    </p>
    <a href="{link}" style="display:inline-block;background-color:#5b8a72;color:#ffffff;text-decoration:none;padding:14px 32px;border-radius:8px;">
      Sign in to Lumen
    </a>
    <p style="margin:32px 0 0;font-size:13px;color:#9a918a;">
      If you didn't request this email, you can safely ignore it.
    </p>
  </div>
</body>
</html>"#
    )
}

/// `15 minutes`, `1 hour`, `90 seconds`
fn describe_ttl(ttl: Duration) -> String {
    let secs = ttl.as_secs();
    let (n, unit) = if secs >= 3600 && secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
