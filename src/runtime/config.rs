use crate::fetch::preview::DEFAULT_PREVIEW_CHARS;
use crate::fetch::FetchRequest;
use anyhow::{bail, Context, Result};
use std::env;

/// Endpoints fetched when no URL list is configured. The last entry has an
/// empty authority and always fails.
pub const DEFAULT_URLS: [&str; 4] = [
    "https://www.wikipedia.org/",
    "http://www.yahoo.com",
    "http://httpstat.us/200",
    "http://",
];

pub const ENV_URLS: &str = "FETCHJOIN_URLS";
pub const ENV_PREVIEW_CHARS: &str = "FETCHJOIN_PREVIEW_CHARS";
pub const ENV_USER_AGENT: &str = "FETCHJOIN_USER_AGENT";

const DEFAULT_USER_AGENT: &str = concat!("fetchjoin/", env!("CARGO_PKG_VERSION"));

/// Runtime configuration for one fan-out run.
///
/// All instances must be constructed via [`OrchestratorConfig::builder`] or
/// [`OrchestratorConfig::new`] so invariants are validated before any consumer observes
/// the values. URLs are deliberately not validated here; malformed entries are expected
/// to reach the fetch task and fail there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    urls: Vec<String>,
    preview_chars: usize,
    user_agent: String,
}

pub struct OrchestratorConfigParams {
    pub urls: Vec<String>,
    pub preview_chars: usize,
    pub user_agent: String,
}

impl OrchestratorConfig {
    /// Returns a builder to incrementally construct and validate a configuration.
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }

    /// Constructs a configuration directly from the provided values.
    pub fn new(params: OrchestratorConfigParams) -> Result<Self> {
        let OrchestratorConfigParams {
            urls,
            preview_chars,
            user_agent,
        } = params;

        let config = Self {
            urls: urls.into_iter().map(trimmed_string).collect(),
            preview_chars,
            user_agent: trimmed_string(user_agent),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads `FETCHJOIN_URLS` (comma separated), `FETCHJOIN_PREVIEW_CHARS` and
    /// `FETCHJOIN_USER_AGENT`, falling back to [`DEFAULT_URLS`] and the builder defaults.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        match env::var(ENV_URLS) {
            Ok(raw) => builder = builder.urls(split_url_list(&raw)),
            Err(_) => builder = builder.urls(DEFAULT_URLS),
        }

        if let Ok(raw) = env::var(ENV_PREVIEW_CHARS) {
            let chars = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_PREVIEW_CHARS} must be an integer, got {raw:?}"))?;
            builder = builder.preview_chars(chars);
        }

        if let Ok(agent) = env::var(ENV_USER_AGENT) {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }

    /// URLs to fetch, in spawn order.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// The URLs wrapped as fetch requests, in spawn order.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.urls.iter().cloned().map(FetchRequest::new).collect()
    }

    /// Maximum characters kept in body previews.
    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    /// User agent sent by the bundled HTTP client.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Performs validation on an existing configuration instance.
    pub fn validate(&self) -> Result<()> {
        if self.preview_chars == 0 {
            bail!("preview_chars must be greater than 0");
        }

        if self.user_agent.is_empty() {
            bail!("user_agent cannot be empty");
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct OrchestratorConfigBuilder {
    urls: Option<Vec<String>>,
    preview_chars: Option<usize>,
    user_agent: Option<String>,
}

impl OrchestratorConfigBuilder {
    pub fn urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.urls = Some(urls.into_iter().map(Into::into).collect());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.urls.get_or_insert_with(Vec::new).push(url.into());
        self
    }

    pub fn preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = Some(chars);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<OrchestratorConfig> {
        let params = OrchestratorConfigParams {
            urls: self.urls.unwrap_or_default(),
            preview_chars: self.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
        };

        OrchestratorConfig::new(params)
    }
}

fn trimmed_string(value: String) -> String {
    value.trim().to_owned()
}

fn split_url_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .collect()
}
