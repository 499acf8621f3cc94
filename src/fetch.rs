//! Single fetch operations: the request value, the terminal result sum type,
//! the failure taxonomy, and the task that drives one URL to completion.

pub mod error;
pub mod preview;
pub mod request;
pub mod result;
pub mod task;

pub use error::{FetchError, FetchErrorKind};
pub use preview::{body_prefix, body_preview};
pub use request::FetchRequest;
pub use result::FetchResult;
pub use task::FetchTask;
