use reqwest::Url;
use secrecy::SecretString;
use std::time::Duration;

use super::Client;
use crate::error::{ReportError, Result};

// -------------------------------------------------------------------------------------------------
// ClientBuilder
// -------------------------------------------------------------------------------------------------
pub struct ClientBuilder {
    base_url: Result<Url>,
    token: Option<SecretString>,
    timeout: Duration,
}

impl ClientBuilder {
    const USER_AGENT: &'static str = concat!("adocommits/", env!("CARGO_PKG_VERSION"));
    pub const DEFAULT_BASE_URL: &'static str = "https://dev.azure.com";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Self {
        ClientBuilder {
            base_url: Url::parse(Self::DEFAULT_BASE_URL)
                .map_err(|e| ReportError::InvalidUrl(e.to_string())),
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Url::parse(url).map_err(|e| ReportError::InvalidUrl(format!("{url}: {e}")));
        self
    }

    /// Personal Access Token, sent as HTTP Basic credentials with an empty user name.
    pub fn token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    /// Timeout applied to each request independently.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = self.base_url?;
        let inner = reqwest::blocking::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(self.timeout)
            .build()?;
        Ok(Client {
            base_url,
            token: self.token,
            inner,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
