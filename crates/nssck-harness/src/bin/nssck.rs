//! CLI entrypoint for the nssck conformance suite.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use nssck_core::FilesService;
use nssck_harness::log::{LogEmitter, LogEntry, LogLevel};
use nssck_harness::report::SuiteReport;
use nssck_harness::suite::{self, CHECK_NAMES, ENV_GROUP, ENV_PASSWD};

/// Conformance checks for a user/group identity directory.
#[derive(Debug, Parser)]
#[command(name = "nssck")]
#[command(about = "Conformance checks for a user/group identity directory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the suite against the configured passwd/group datasets.
    Run {
        /// Passwd-format dataset path (overrides NSSCK_PASSWD).
        #[arg(long)]
        passwd: Option<PathBuf>,
        /// Group-format dataset path (overrides NSSCK_GROUP).
        #[arg(long)]
        group: Option<PathBuf>,
        /// Write the JSON report here.
        #[arg(long)]
        report_json: Option<PathBuf>,
        /// Write the markdown report here.
        #[arg(long)]
        report_md: Option<PathBuf>,
        /// Append JSONL log entries here instead of stderr.
        #[arg(long)]
        log_jsonl: Option<PathBuf>,
    },
    /// List the check names the suite runs.
    Checks,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("nssck: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Checks => {
            for name in CHECK_NAMES {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Run {
            passwd,
            group,
            report_json,
            report_md,
            log_jsonl,
        } => {
            let mut emitter = match &log_jsonl {
                Some(path) => LogEmitter::to_file(path)?,
                None => LogEmitter::stderr(),
            };

            let report = match suite::resolve_paths(passwd, group) {
                Some((passwd_path, group_path)) => {
                    let svc = FilesService::from_paths(&passwd_path, &group_path)?;
                    suite::run_suite(&svc)
                }
                None => {
                    emitter.emit(&LogEntry::new(
                        LogLevel::Warn,
                        format!("{ENV_PASSWD} or {ENV_GROUP} not set, skipping"),
                    ))?;
                    suite::skipped_suite(&format!("{ENV_PASSWD} or {ENV_GROUP} not set"))
                }
            };

            emit_artifacts(&report, report_json, report_md, &mut emitter)?;
            println!("{}", report.render_markdown());
            Ok(ExitCode::from(report.exit_code()))
        }
    }
}

fn emit_artifacts(
    report: &SuiteReport,
    report_json: Option<PathBuf>,
    report_md: Option<PathBuf>,
    emitter: &mut LogEmitter,
) -> Result<(), Box<dyn std::error::Error>> {
    for check in &report.checks {
        emitter.emit(&LogEntry::check_verdict(
            &check.name,
            check.outcome,
            check.detail.clone(),
        ))?;
    }
    if let Some(path) = report_json {
        let body = report.to_json()?;
        fs::write(&path, &body)?;
        emitter.emit(&LogEntry::artifact_written(&path, body.as_bytes()))?;
    }
    if let Some(path) = report_md {
        let body = report.render_markdown();
        fs::write(&path, &body)?;
        emitter.emit(&LogEntry::artifact_written(&path, body.as_bytes()))?;
    }
    Ok(())
}
