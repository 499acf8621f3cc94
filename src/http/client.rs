//! Abstractions over the transport used by fetch tasks. A task suspends twice
//! through these traits: once in [`HttpClient::request`] while waiting for the
//! response head, and once in [`ScopedResponse::text`] while the body is read.

use crate::fetch::FetchError;
use futures::future::BoxFuture;
use std::fmt;

pub type HttpFuture<'a, T> = BoxFuture<'a, Result<T, FetchError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait HttpClient: Send + Sync {
    /// Opens a request and resolves once the response head is available.
    ///
    /// The URL is passed through untouched; implementations report malformed
    /// input as [`FetchError::HostResolution`].
    fn request<'a>(
        &'a self,
        method: HttpMethod,
        url: &'a str,
    ) -> HttpFuture<'a, Box<dyn ScopedResponse>>;
}

/// A response whose underlying connection is held until the value is dropped
/// or its body has been consumed by [`ScopedResponse::text`].
pub trait ScopedResponse: Send {
    fn status(&self) -> u16;

    fn text(self: Box<Self>) -> HttpFuture<'static, String>;
}
