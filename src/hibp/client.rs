use reqwest::{Client, Request, Url};
use std::fmt;

use super::outcome::{ApiResponse, FatalError};

pub const HIBP_API_BASE: &str = "https://haveibeenpwned.com/api/v3";
pub const DEFAULT_USER_AGENT: &str = "breachcheck";

/// The two account lookups the tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Breaches,
    Pastes,
}

impl Endpoint {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::Breaches => "breachedaccount",
            Endpoint::Pastes => "pasteaccount",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Breaches => write!(f, "breach"),
            Endpoint::Pastes => write!(f, "paste"),
        }
    }
}

/// Transport seam between the run loop and the network.
pub trait BreachApi {
    fn user_agent(&self) -> &str;

    async fn lookup(&self, endpoint: Endpoint, email: &str) -> Result<ApiResponse, FatalError>;
}

/// Have I Been Pwned v3 REST client
pub struct HibpClient {
    client: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
}

impl HibpClient {
    pub fn new(base_url: String, api_key: String, user_agent: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            user_agent,
        }
    }

    /// Build the lookup URL with the email as a single encoded path segment.
    pub fn lookup_url(&self, endpoint: Endpoint, email: &str) -> Result<Url, FatalError> {
        let bad_base = || FatalError::BadBaseUrl(self.base_url.clone());

        let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint.path()))
            .map_err(|_| bad_base())?;

        url.path_segments_mut().map_err(|_| bad_base())?.push(email);

        if endpoint == Endpoint::Breaches {
            url.query_pairs_mut().append_pair("truncateResponse", "false");
        }

        Ok(url)
    }

    /// Authenticated GET for one lookup.
    pub fn request(&self, endpoint: Endpoint, email: &str) -> Result<Request, FatalError> {
        let url = self.lookup_url(endpoint, email)?;

        let request = self
            .client
            .get(url)
            .header("hibp-api-key", &self.api_key)
            .header("User-Agent", &self.user_agent)
            .build()?;

        Ok(request)
    }
}

impl BreachApi for HibpClient {
    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    async fn lookup(&self, endpoint: Endpoint, email: &str) -> Result<ApiResponse, FatalError> {
        let request = self.request(endpoint, email)?;

        tracing::debug!(%endpoint, url = %request.url(), "sending lookup");

        let response = self.client.execute(request).await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}
