//! Suite runner: the five named checks and the activation gate.
//!
//! Snapshots are captured once per run; the equivalence checks, the
//! duplicate scans, and the membership validator all consume the same
//! capture. A backend failure marks the checks that needed the broken
//! dataset as `error` while the rest still run.
//!
//! Activation: `NSSCK_PASSWD` and `NSSCK_GROUP` name the backing files. If
//! either is unset (and not supplied by flag), the whole suite reports
//! `skip` rather than a false pass.

use std::path::PathBuf;

use nssck_core::record::{GroupRecord, PasswdRecord};
use nssck_core::service::{DirectoryService, ServiceError};
use nssck_core::snapshot::{group_snapshot, passwd_snapshot};

use crate::duplicates::{
    describe_group_duplicate, describe_passwd_duplicate, group_duplicates, passwd_duplicates,
};
use crate::equivalence::{check_group_equivalence, check_passwd_equivalence};
use crate::membership::check_membership;
use crate::report::{CheckReport, SuiteReport};

/// Environment variable naming the passwd-format dataset.
pub const ENV_PASSWD: &str = "NSSCK_PASSWD";
/// Environment variable naming the group-format dataset.
pub const ENV_GROUP: &str = "NSSCK_GROUP";

pub const CHECK_PASSWD_EQUIVALENCE: &str = "passwd-equivalence";
pub const CHECK_GROUP_EQUIVALENCE: &str = "group-equivalence";
pub const CHECK_PASSWD_DUPLICATES: &str = "passwd-duplicates";
pub const CHECK_GROUP_DUPLICATES: &str = "group-duplicates";
pub const CHECK_MEMBERSHIP: &str = "membership";

/// Every check the suite runs, in report order.
pub const CHECK_NAMES: [&str; 5] = [
    CHECK_PASSWD_EQUIVALENCE,
    CHECK_GROUP_EQUIVALENCE,
    CHECK_PASSWD_DUPLICATES,
    CHECK_GROUP_DUPLICATES,
    CHECK_MEMBERSHIP,
];

/// Run all five checks against one service.
pub fn run_suite(svc: &dyn DirectoryService) -> SuiteReport {
    let users = passwd_snapshot(svc);
    let groups = group_snapshot(svc);

    let mut checks = Vec::with_capacity(CHECK_NAMES.len());

    checks.push(match &users {
        Ok(snapshot) => to_report(
            CHECK_PASSWD_EQUIVALENCE,
            check_passwd_equivalence(svc, snapshot),
        ),
        Err(err) => CheckReport::error(CHECK_PASSWD_EQUIVALENCE, err),
    });
    checks.push(match &groups {
        Ok(snapshot) => to_report(
            CHECK_GROUP_EQUIVALENCE,
            check_group_equivalence(svc, snapshot),
        ),
        Err(err) => CheckReport::error(CHECK_GROUP_EQUIVALENCE, err),
    });
    checks.push(match &users {
        Ok(snapshot) => duplicate_passwd_report(snapshot),
        Err(err) => CheckReport::error(CHECK_PASSWD_DUPLICATES, err),
    });
    checks.push(match &groups {
        Ok(snapshot) => duplicate_group_report(snapshot),
        Err(err) => CheckReport::error(CHECK_GROUP_DUPLICATES, err),
    });
    checks.push(match (&users, &groups) {
        (Ok(users), Ok(groups)) => {
            to_report(CHECK_MEMBERSHIP, check_membership(svc, users, groups))
        }
        (Err(err), _) | (_, Err(err)) => CheckReport::error(CHECK_MEMBERSHIP, err),
    });

    SuiteReport::new(checks)
}

/// Suite report with every check skipped for `reason`.
#[must_use]
pub fn skipped_suite(reason: &str) -> SuiteReport {
    SuiteReport::new(
        CHECK_NAMES
            .iter()
            .map(|name| CheckReport::skip(*name, reason))
            .collect(),
    )
}

/// Resolve the backing dataset paths: explicit flags win, then the
/// activation environment variables. `None` when either dataset is missing,
/// which gates the suite into skip.
#[must_use]
pub fn resolve_paths(
    passwd_flag: Option<PathBuf>,
    group_flag: Option<PathBuf>,
) -> Option<(PathBuf, PathBuf)> {
    let passwd = passwd_flag.or_else(|| std::env::var_os(ENV_PASSWD).map(PathBuf::from))?;
    let group = group_flag.or_else(|| std::env::var_os(ENV_GROUP).map(PathBuf::from))?;
    Some((passwd, group))
}

fn to_report(name: &str, result: Result<Vec<String>, ServiceError>) -> CheckReport {
    match result {
        Ok(failures) => CheckReport::from_failures(name, failures),
        Err(err) => CheckReport::error(name, &err),
    }
}

fn duplicate_passwd_report(snapshot: &[PasswdRecord]) -> CheckReport {
    let failures = passwd_duplicates(snapshot)
        .iter()
        .map(|pair| describe_passwd_duplicate(snapshot, pair))
        .collect();
    CheckReport::from_failures(CHECK_PASSWD_DUPLICATES, failures)
}

fn duplicate_group_report(snapshot: &[GroupRecord]) -> CheckReport {
    let failures = group_duplicates(snapshot)
        .iter()
        .map(|pair| describe_group_duplicate(snapshot, pair))
        .collect();
    CheckReport::from_failures(CHECK_GROUP_DUPLICATES, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CheckOutcome;
    use nssck_core::files::FilesService;
    use std::path::Path;

    #[test]
    fn skipped_suite_covers_every_check() {
        let report = skipped_suite("gate unset");
        assert_eq!(report.checks.len(), CHECK_NAMES.len());
        assert!(report.all_skipped());
        assert_eq!(report.exit_code(), 0);
        for check in &report.checks {
            assert_eq!(check.detail.as_deref(), Some("gate unset"));
        }
    }

    #[test]
    fn flags_override_gate_lookup() {
        let resolved = resolve_paths(
            Some(Path::new("/tmp/passwd").to_path_buf()),
            Some(Path::new("/tmp/group").to_path_buf()),
        )
        .unwrap();
        assert_eq!(resolved.0, Path::new("/tmp/passwd"));
        assert_eq!(resolved.1, Path::new("/tmp/group"));
    }

    #[test]
    fn clean_dataset_passes_every_check() {
        let svc = FilesService::from_bytes(
            b"root:x:0:0:root:/root:/bin/bash\nalice:x:1000:100:Alice:/home/alice:/bin/sh\n"
                .as_slice(),
            b"root:x:0:\nstaff:x:100:alice\n".as_slice(),
        );
        let report = run_suite(&svc);
        assert_eq!(report.checks.len(), 5);
        for check in &report.checks {
            assert_eq!(check.outcome, CheckOutcome::Pass, "check {}", check.name);
        }
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn broken_passwd_dataset_errors_user_checks_but_group_checks_run() {
        let svc = FilesService::from_bytes(
            b"broken\n".as_slice(),
            b"root:x:0:\nstaff:x:100:alice\n".as_slice(),
        );
        let report = run_suite(&svc);
        let by_name = |name: &str| {
            report
                .checks
                .iter()
                .find(|c| c.name == name)
                .unwrap()
                .outcome
        };
        assert_eq!(by_name(CHECK_PASSWD_EQUIVALENCE), CheckOutcome::Error);
        assert_eq!(by_name(CHECK_PASSWD_DUPLICATES), CheckOutcome::Error);
        assert_eq!(by_name(CHECK_MEMBERSHIP), CheckOutcome::Error);
        assert_eq!(by_name(CHECK_GROUP_EQUIVALENCE), CheckOutcome::Pass);
        assert_eq!(by_name(CHECK_GROUP_DUPLICATES), CheckOutcome::Pass);
        assert_eq!(report.exit_code(), 1);
    }
}
