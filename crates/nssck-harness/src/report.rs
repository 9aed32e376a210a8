//! Suite report model.
//!
//! One [`CheckReport`] per named check, aggregated into a [`SuiteReport`]
//! that serializes to JSON, renders to markdown, and maps to a process exit
//! code. A missing activation gate yields `skip`, never a false `pass`;
//! `error` marks a backend failure that aborted one check without stopping
//! the others.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use nssck_core::service::ServiceError;

/// Report schema version.
pub const REPORT_SCHEMA_VERSION: &str = "v1";

/// Verdict for one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    Pass,
    Fail,
    Skip,
    Error,
}

/// Result of one named check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub name: String,
    pub outcome: CheckOutcome,
    /// Human-readable assertion failures, empty unless `outcome` is `fail`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
    /// Skip reason or backend error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckReport {
    /// Pass when no failures accumulated, fail otherwise.
    #[must_use]
    pub fn from_failures(name: impl Into<String>, failures: Vec<String>) -> Self {
        let outcome = if failures.is_empty() {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Fail
        };
        Self {
            name: name.into(),
            outcome,
            failures,
            detail: None,
        }
    }

    #[must_use]
    pub fn skip(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: CheckOutcome::Skip,
            failures: Vec::new(),
            detail: Some(reason.into()),
        }
    }

    /// Backend failure: the check aborted before reaching a verdict.
    #[must_use]
    pub fn error(name: impl Into<String>, err: &ServiceError) -> Self {
        Self {
            name: name.into(),
            outcome: CheckOutcome::Error,
            failures: Vec::new(),
            detail: Some(err.to_string()),
        }
    }
}

/// Aggregated verdicts for one suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub schema_version: String,
    /// Unix seconds at report construction.
    pub generated_at: String,
    pub checks: Vec<CheckReport>,
}

impl SuiteReport {
    #[must_use]
    pub fn new(checks: Vec<CheckReport>) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: unix_timestamp(),
            checks,
        }
    }

    /// True when any check failed or aborted on a backend error.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|c| matches!(c.outcome, CheckOutcome::Fail | CheckOutcome::Error))
    }

    #[must_use]
    pub fn all_skipped(&self) -> bool {
        self.checks
            .iter()
            .all(|c| c.outcome == CheckOutcome::Skip)
    }

    /// Process exit status: non-zero iff any check failed; all-pass and
    /// all-skip are both zero.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_failures())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable summary table plus per-check failure detail.
    #[must_use]
    pub fn render_markdown(&self) -> String {
        let mut out = String::from("# nssck conformance report\n\n");
        out.push_str("| check | outcome | failures |\n|---|---|---|\n");
        for check in &self.checks {
            let outcome = match check.outcome {
                CheckOutcome::Pass => "pass",
                CheckOutcome::Fail => "fail",
                CheckOutcome::Skip => "skip",
                CheckOutcome::Error => "error",
            };
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                check.name,
                outcome,
                check.failures.len()
            ));
        }
        for check in &self.checks {
            if check.failures.is_empty() && check.detail.is_none() {
                continue;
            }
            out.push_str(&format!("\n## {}\n\n", check.name));
            if let Some(detail) = &check.detail {
                out.push_str(&format!("{detail}\n"));
            }
            for failure in &check.failures {
                out.push_str(&format!("- {failure}\n"));
            }
        }
        out
    }
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_failures_pass_and_nonempty_fail() {
        assert_eq!(
            CheckReport::from_failures("a", Vec::new()).outcome,
            CheckOutcome::Pass
        );
        let fail = CheckReport::from_failures("a", vec!["boom".into()]);
        assert_eq!(fail.outcome, CheckOutcome::Fail);
        assert_eq!(fail.failures.len(), 1);
    }

    #[test]
    fn exit_code_mapping() {
        let pass = SuiteReport::new(vec![CheckReport::from_failures("a", Vec::new())]);
        assert_eq!(pass.exit_code(), 0);

        let skip = SuiteReport::new(vec![CheckReport::skip("a", "gate unset")]);
        assert_eq!(skip.exit_code(), 0);
        assert!(skip.all_skipped());

        let fail = SuiteReport::new(vec![
            CheckReport::from_failures("a", Vec::new()),
            CheckReport::from_failures("b", vec!["mismatch".into()]),
        ]);
        assert_eq!(fail.exit_code(), 1);

        let err = SuiteReport::new(vec![CheckReport::error(
            "a",
            &ServiceError::Io(std::io::Error::other("down")),
        )]);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn json_round_trip_keeps_outcomes() {
        let report = SuiteReport::new(vec![
            CheckReport::from_failures("a", vec!["x".into()]),
            CheckReport::skip("b", "gate unset"),
        ]);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"schema_version\": \"v1\""));
        let parsed: SuiteReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.checks[0].outcome, CheckOutcome::Fail);
        assert_eq!(parsed.checks[1].outcome, CheckOutcome::Skip);
        assert_eq!(parsed.checks[1].detail.as_deref(), Some("gate unset"));
    }

    #[test]
    fn markdown_lists_failures_under_their_check() {
        let report = SuiteReport::new(vec![
            CheckReport::from_failures("clean", Vec::new()),
            CheckReport::from_failures("dirty", vec!["uid differs".into()]),
        ]);
        let md = report.render_markdown();
        assert!(md.contains("| clean | pass | 0 |"));
        assert!(md.contains("| dirty | fail | 1 |"));
        assert!(md.contains("## dirty"));
        assert!(md.contains("- uid differs"));
        assert!(!md.contains("## clean"));
    }
}
