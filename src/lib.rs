pub mod coordinator;
pub mod fetch;
pub mod http;
pub mod runtime;

pub use coordinator::{CompletedTask, JoinCoordinator, ResultSet, TaskHandle, TaskState};
pub use fetch::task::TaskId;
pub use fetch::{body_prefix, body_preview, FetchError, FetchErrorKind, FetchRequest, FetchResult, FetchTask};
pub use http::{HttpClient, HttpFuture, HttpMethod, ReqwestHttpClient, ScopedResponse};
pub use runtime::config::{
    OrchestratorConfig, OrchestratorConfigBuilder, OrchestratorConfigParams, DEFAULT_URLS,
};
pub use runtime::runner::{ReportedResult, RunReport, Runner};
pub use runtime::sink::{MemorySink, TraceEvent, TraceSink, TracingSink};
pub use runtime::telemetry::{init_tracing, Telemetry, TelemetrySnapshot};
