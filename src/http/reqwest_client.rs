use super::client::{HttpClient, HttpFuture, HttpMethod, ScopedResponse};
use crate::fetch::FetchError;
use crate::runtime::config::OrchestratorConfig;
use anyhow::{Context, Result};
use reqwest::{Client, Method, Response, Url};
use std::error::Error as StdError;

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }

    pub fn from_config(config: &OrchestratorConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.user_agent())
    }
}

impl HttpClient for ReqwestHttpClient {
    fn request<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
    ) -> HttpFuture<'a, Box<dyn ScopedResponse>> {
        Box::pin(async move {
            let parsed = parse_url(url)?;
            let response = self
                .client
                .request(reqwest_method(method), parsed)
                .send()
                .await
                .map_err(|err| classify_send_error(&err))?;

            tracing::trace!(
                url,
                method = %method,
                status = response.status().as_u16(),
                "response head received"
            );
            Ok(Box::new(ReqwestResponse { response }) as Box<dyn ScopedResponse>)
        })
    }
}

struct ReqwestResponse {
    response: Response,
}

impl ScopedResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    fn text(self: Box<Self>) -> HttpFuture<'static, String> {
        Box::pin(async move {
            self.response
                .text()
                .await
                .map_err(|err| FetchError::protocol(format!("failed to read body: {}", chain(&err))))
        })
    }
}

fn reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url)
        .map_err(|err| FetchError::host_resolution(format!("{url}: {err}")))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(FetchError::host_resolution(format!(
            "{url}: host could not be detected"
        ))),
    }
}

fn classify_send_error(err: &reqwest::Error) -> FetchError {
    let detail = chain(err);
    if err.is_connect() {
        // The resolver failure is only visible through the error message of
        // the connector source.
        if detail.contains("dns error") || detail.contains("failed to lookup address") {
            return FetchError::host_resolution(detail);
        }
        return FetchError::connection(detail);
    }
    FetchError::protocol(detail)
}

fn chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
