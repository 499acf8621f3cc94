//! HTTP capability consumed by fetch tasks: the transport-agnostic traits and
//! the `reqwest`-backed implementation shipped with the crate.

pub mod client;
pub mod reqwest_client;

pub use client::{HttpClient, HttpFuture, HttpMethod, ScopedResponse};
pub use reqwest_client::ReqwestHttpClient;
