use std::time::Duration;
use thiserror::Error;

use super::client::Endpoint;
use super::models::{Breach, ErrorBody, Paste};
use super::patterns;
use crate::report::finding::Finding;

/// Delay used when a 429 message carries no digit.
pub const RATE_LIMIT_FALLBACK: Duration = Duration::from_secs(2);

/// Run-ending API conditions.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("API key was not valid (HTTP 401)")]
    InvalidApiKey,

    #[error("User agent '{user_agent}' was not valid (HTTP 403)")]
    InvalidUserAgent { user_agent: String },

    #[error("Service currently unavailable (HTTP 503)")]
    ServiceUnavailable,

    #[error("Could not decode {endpoint} response for {email}: {source}")]
    Decode {
        endpoint: Endpoint,
        email: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Base URL '{0}' cannot be used for lookups")]
    BadBaseUrl(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Recoverable result of one lookup.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Found(Vec<Finding>),
    NoMatch,
    BadRequest,
    RateLimited(Duration),
    Unexpected(u16),
}

/// Raw status and body of one GET.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    #[cfg(test)]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Map a response to an outcome. 401, 403 and 503 end the run.
pub fn classify(
    endpoint: Endpoint,
    email: &str,
    user_agent: &str,
    response: &ApiResponse,
) -> Result<Outcome, FatalError> {
    match response.status {
        200 => parse_matches(endpoint, email, &response.body).map(Outcome::Found),
        400 => Ok(Outcome::BadRequest),
        401 => Err(FatalError::InvalidApiKey),
        403 => Err(FatalError::InvalidUserAgent {
            user_agent: user_agent.to_string(),
        }),
        404 => Ok(Outcome::NoMatch),
        429 => Ok(Outcome::RateLimited(rate_limit_delay(&response.body))),
        503 => Err(FatalError::ServiceUnavailable),
        other => Ok(Outcome::Unexpected(other)),
    }
}

/// Seconds to wait after a 429, read from the first digit of the message.
pub fn rate_limit_delay(body: &str) -> Duration {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|err| patterns::first_digit(&err.message))
        .map(Duration::from_secs)
        .unwrap_or(RATE_LIMIT_FALLBACK)
}

fn parse_matches(endpoint: Endpoint, email: &str, body: &str) -> Result<Vec<Finding>, FatalError> {
    let decode = |source: serde_json::Error| FatalError::Decode {
        endpoint,
        email: email.to_string(),
        source,
    };

    match endpoint {
        Endpoint::Breaches => {
            let breaches: Vec<Breach> = serde_json::from_str(body).map_err(decode)?;
            Ok(breaches
                .iter()
                .map(|b| Finding::from_breach(email, b))
                .collect())
        }
        Endpoint::Pastes => {
            let pastes: Vec<Paste> = serde_json::from_str(body).map_err(decode)?;
            Ok(pastes.iter().map(|p| Finding::from_paste(email, p)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::finding::FindingKind;

    fn classify_status(status: u16, body: &str) -> Result<Outcome, FatalError> {
        classify(
            Endpoint::Breaches,
            "a@example.com",
            "breachcheck-test",
            &ApiResponse::new(status, body),
        )
    }

    #[test]
    fn recoverable_statuses_continue() {
        assert_eq!(classify_status(400, "").unwrap(), Outcome::BadRequest);
        assert_eq!(classify_status(404, "").unwrap(), Outcome::NoMatch);
        assert_eq!(classify_status(418, "").unwrap(), Outcome::Unexpected(418));
    }

    #[test]
    fn fatal_statuses_abort() {
        assert!(matches!(classify_status(401, ""), Err(FatalError::InvalidApiKey)));
        assert!(matches!(
            classify_status(403, ""),
            Err(FatalError::InvalidUserAgent { user_agent }) if user_agent == "breachcheck-test"
        ));
        assert!(matches!(classify_status(503, ""), Err(FatalError::ServiceUnavailable)));
    }

    #[test]
    fn rate_limit_uses_first_digit_of_message() {
        let body = r#"{"statusCode":429,"message":"Rate limit is exceeded. Try again in 5 seconds."}"#;
        assert_eq!(
            classify_status(429, body).unwrap(),
            Outcome::RateLimited(Duration::from_secs(5))
        );
    }

    #[test]
    fn rate_limit_falls_back_without_digit() {
        let body = r#"{"statusCode":429,"message":"Rate limit is exceeded."}"#;
        assert_eq!(
            classify_status(429, body).unwrap(),
            Outcome::RateLimited(RATE_LIMIT_FALLBACK)
        );
        assert_eq!(rate_limit_delay("not json"), RATE_LIMIT_FALLBACK);
        assert_eq!(RATE_LIMIT_FALLBACK, Duration::from_secs(2));
    }

    #[test]
    fn success_body_becomes_findings() {
        let body = r#"[
            {"Name":"Adobe","Title":"Adobe","Domain":"adobe.com","BreachDate":"2013-10-04",
             "Description":"See https://example.com/adobe","DataClasses":["Email addresses","Passwords"]},
            {"Name":"Dropbox","Title":"Dropbox","Domain":"dropbox.com","BreachDate":"2012-07-01",
             "Description":"No link","DataClasses":["Email addresses"]}
        ]"#;
        let Outcome::Found(findings) = classify_status(200, body).unwrap() else {
            panic!("expected findings");
        };
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].kind, FindingKind::Breach);
        assert_eq!(findings[0].url_or_id, "https://example.com/adobe");
        assert_eq!(findings[1].url_or_id, "");
    }

    #[test]
    fn paste_body_keeps_only_the_day() {
        let body = r#"[{"Source":"Pastebin","Id":"8Q0BvKD8","Title":"syslog","Date":"2014-03-04T19:14:54Z","EmailCount":139}]"#;
        let outcome = classify(
            Endpoint::Pastes,
            "a@example.com",
            "ua",
            &ApiResponse::new(200, body),
        )
        .unwrap();
        let Outcome::Found(findings) = outcome else {
            panic!("expected findings");
        };
        assert_eq!(findings[0].date, "2014-03-04");
        assert_eq!(findings[0].url_or_id, "8Q0BvKD8");
    }

    #[test]
    fn malformed_success_body_is_fatal() {
        assert!(matches!(
            classify_status(200, "<html>"),
            Err(FatalError::Decode { .. })
        ));
    }
}
