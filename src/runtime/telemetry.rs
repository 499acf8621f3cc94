use crate::fetch::{FetchErrorKind, FetchResult};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// Installs a basic tracing subscriber (if one is not already active).
///
/// The subscriber honours `RUST_LOG` if it is present, otherwise it falls back to `info`.
/// Calling this function multiple times is harmless.
pub fn init_tracing() {
    if TRACING_INIT.get().is_some() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init();

    let _ = TRACING_INIT.set(());
}

/// Counters updated as tasks are spawned and settle.
#[derive(Default, Debug)]
pub struct Telemetry {
    tasks_spawned: AtomicU64,
    tasks_succeeded: AtomicU64,
    host_resolution_failures: AtomicU64,
    connection_failures: AtomicU64,
    protocol_failures: AtomicU64,
    panicked_tasks: AtomicU64,
    body_bytes: AtomicU64,
}

impl Telemetry {
    pub fn record_spawned(&self, count: u64) {
        if count == 0 {
            return;
        }
        self.tasks_spawned.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_result(&self, result: &FetchResult) {
        match result {
            FetchResult::Success { body, .. } => {
                self.tasks_succeeded.fetch_add(1, Ordering::Relaxed);
                self.body_bytes
                    .fetch_add(body.len() as u64, Ordering::Relaxed);
            }
            FetchResult::Failure { cause, .. } => {
                let counter = match cause.kind() {
                    FetchErrorKind::HostResolution => &self.host_resolution_failures,
                    FetchErrorKind::Connection => &self.connection_failures,
                    FetchErrorKind::Protocol => &self.protocol_failures,
                    FetchErrorKind::Panicked => &self.panicked_tasks,
                };
                counter.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn tasks_spawned(&self) -> u64 {
        self.tasks_spawned.load(Ordering::Relaxed)
    }

    pub fn tasks_succeeded(&self) -> u64 {
        self.tasks_succeeded.load(Ordering::Relaxed)
    }

    pub fn tasks_failed(&self) -> u64 {
        self.host_resolution_failures.load(Ordering::Relaxed)
            + self.connection_failures.load(Ordering::Relaxed)
            + self.protocol_failures.load(Ordering::Relaxed)
            + self.panicked_tasks.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            tasks_spawned: self.tasks_spawned(),
            tasks_succeeded: self.tasks_succeeded(),
            tasks_failed: self.tasks_failed(),
            host_resolution_failures: self.host_resolution_failures.load(Ordering::Relaxed),
            connection_failures: self.connection_failures.load(Ordering::Relaxed),
            protocol_failures: self.protocol_failures.load(Ordering::Relaxed),
            panicked_tasks: self.panicked_tasks.load(Ordering::Relaxed),
            body_bytes: self.body_bytes.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetrySnapshot {
    pub tasks_spawned: u64,
    pub tasks_succeeded: u64,
    pub tasks_failed: u64,
    pub host_resolution_failures: u64,
    pub connection_failures: u64,
    pub protocol_failures: u64,
    pub panicked_tasks: u64,
    pub body_bytes: u64,
}
