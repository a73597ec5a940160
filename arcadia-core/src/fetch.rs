use std::time::Duration;

use ureq::Agent;

use crate::{error::Error, util::default_ureq_agent_builder};

/// Source of remote documents.  The catalog, embeddable content and the
/// not-found page are all fetched through it.
pub trait Fetch: Send + Sync {
    fn fetch_text(&self, url: &str) -> Result<String, Error>;
}

pub struct HttpClient {
    agent: Agent,
}

impl HttpClient {
    pub fn new(proxy_url: Option<&str>, timeout: Duration) -> Self {
        Self {
            agent: default_ureq_agent_builder(proxy_url, timeout).build().into(),
        }
    }
}

impl Fetch for HttpClient {
    fn fetch_text(&self, url: &str) -> Result<String, Error> {
        log::debug!("fetching {}", url);
        let mut response = self.agent.get(url).call()?;
        let body = response.body_mut().read_to_string()?;
        Ok(body)
    }
}
