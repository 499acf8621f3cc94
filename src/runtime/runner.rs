use crate::coordinator::{JoinCoordinator, ResultSet};
use crate::fetch::body_prefix;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::runtime::config::OrchestratorConfig;
use crate::runtime::sink::{TraceEvent, TraceSink, TracingSink};
use crate::runtime::telemetry::{Telemetry, TelemetrySnapshot};
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;

/// One reported success: the URL and the untrimmed leading characters of its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportedResult {
    pub url: String,
    pub preview: String,
}

/// Everything a run produced: the full result set, the reported previews, and
/// the final counters.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub results: ResultSet,
    pub reported: Vec<ReportedResult>,
    pub telemetry: TelemetrySnapshot,
}

impl RunReport {
    /// One JSON object per task in completion order, then the telemetry snapshot.
    pub fn json_lines(&self) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.results.done().len() + 1);
        for task in self.results.done() {
            lines.push(
                serde_json::to_string(task.outcome()).context("failed to serialize fetch result")?,
            );
        }
        lines.push(serde_json::to_string(&self.telemetry).context("failed to serialize telemetry")?);
        Ok(lines)
    }
}

/// Wires configuration, HTTP client and sink into a single fan-out run.
pub struct Runner {
    config: OrchestratorConfig,
    coordinator: JoinCoordinator,
    sink: Arc<dyn TraceSink>,
    telemetry: Arc<Telemetry>,
}

impl Runner {
    /// Builds a runner backed by the bundled `reqwest` client that logs through `tracing`.
    pub fn new(config: OrchestratorConfig) -> Result<Self> {
        let client = Arc::new(ReqwestHttpClient::from_config(&config)?);
        Ok(Self::with_parts(config, client, Arc::new(TracingSink)))
    }

    pub fn with_parts(
        config: OrchestratorConfig,
        client: Arc<dyn HttpClient>,
        sink: Arc<dyn TraceSink>,
    ) -> Self {
        let telemetry = Arc::new(Telemetry::default());
        let coordinator = JoinCoordinator::from_config(&config, client, sink.clone())
            .with_telemetry(telemetry.clone());
        Self {
            config,
            coordinator,
            sink,
            telemetry,
        }
    }

    pub fn telemetry(&self) -> Arc<Telemetry> {
        self.telemetry.clone()
    }

    /// Fetches every configured URL, waits for all of them, and reports the
    /// successful ones in completion order.
    pub async fn run(&self) -> RunReport {
        let requests = self.config.requests();
        self.sink.emit(TraceEvent::OrchestrationStarted {
            requests: requests.len(),
        });

        let results = self.coordinator.join_all(requests).await;
        let reported = self.report(&results);
        let telemetry = self.telemetry.snapshot();

        tracing::info!(
            succeeded = telemetry.tasks_succeeded,
            failed = telemetry.tasks_failed,
            "fan-out finished"
        );

        RunReport {
            results,
            reported,
            telemetry,
        }
    }

    fn report(&self, results: &ResultSet) -> Vec<ReportedResult> {
        let preview_chars = self.coordinator.preview_chars();
        results
            .successes()
            .map(|(url, body)| {
                let reported = ReportedResult {
                    url: url.to_owned(),
                    preview: body_prefix(body, preview_chars).to_owned(),
                };
                self.sink.emit(TraceEvent::ResultReported {
                    url: reported.url.clone(),
                    preview: reported.preview.clone(),
                });
                reported
            })
            .collect()
    }
}
