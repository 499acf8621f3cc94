use std::env;

use anyhow::{Context, Result};
use fetchjoin::{OrchestratorConfig, RunReport, Runner};

const DEFAULT_LOG_DIRECTIVE: &str = "debug";
const ENV_OUTPUT: &str = "FETCHJOIN_OUTPUT";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_binary_tracing();

    let config = OrchestratorConfig::from_env().context("invalid fetchjoin configuration")?;
    let runner = Runner::new(config)?;
    let report = runner.run().await;

    if json_output() {
        print_json(&report)?;
    } else {
        print_text(&report);
    }

    Ok(())
}

fn init_binary_tracing() {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", DEFAULT_LOG_DIRECTIVE);
    }
    fetchjoin::init_tracing();
}

fn json_output() -> bool {
    match env::var(ENV_OUTPUT) {
        Ok(value) => value.trim().eq_ignore_ascii_case("json"),
        Err(_) => false,
    }
}

fn print_text(report: &RunReport) {
    for reported in &report.reported {
        println!("{} {} ...", reported.url, reported.preview);
    }
    println!(
        "{} succeeded, {} failed",
        report.telemetry.tasks_succeeded, report.telemetry.tasks_failed
    );
}

fn print_json(report: &RunReport) -> Result<()> {
    for line in report.json_lines()? {
        println!("{line}");
    }
    Ok(())
}
