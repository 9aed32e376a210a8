//! End-to-end suite scenarios over the files backend.
//!
//! Covers:
//! 1. A well-formed two-user dataset passes every check.
//! 2. Two groups both named `staff` produce exactly one duplicate pair.
//! 3. An empty dataset passes vacuously.
//! 4. Duplicate uids surface as equivalence and duplicate failures together.

use nssck_core::FilesService;
use nssck_harness::report::CheckOutcome;
use nssck_harness::suite::{
    CHECK_GROUP_DUPLICATES, CHECK_MEMBERSHIP, CHECK_PASSWD_DUPLICATES, CHECK_PASSWD_EQUIVALENCE,
    run_suite,
};

const PASSWD: &[u8] = b"\
alice:x:1000:100:Alice:/home/alice:/bin/sh
bob:x:1001:100:Bob:/home/bob:/bin/sh
";
const GROUP: &[u8] = b"staff:x:100:alice\n";

fn outcome(report: &nssck_harness::SuiteReport, name: &str) -> CheckOutcome {
    report
        .checks
        .iter()
        .find(|c| c.name == name)
        .unwrap_or_else(|| panic!("missing check {name}"))
        .outcome
}

#[test]
fn two_users_one_group_all_checks_pass() {
    let svc = FilesService::from_bytes(PASSWD, GROUP);
    let report = run_suite(&svc);
    assert_eq!(report.checks.len(), 5);
    for check in &report.checks {
        assert_eq!(check.outcome, CheckOutcome::Pass, "check {}", check.name);
        assert!(check.failures.is_empty());
    }
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn duplicate_staff_groups_fail_with_one_named_pair() {
    let svc = FilesService::from_bytes(PASSWD, b"staff:x:100:alice\nstaff:x:200:\n".as_slice());
    let report = run_suite(&svc);
    let dup = report
        .checks
        .iter()
        .find(|c| c.name == CHECK_GROUP_DUPLICATES)
        .unwrap();
    assert_eq!(dup.outcome, CheckOutcome::Fail);
    assert_eq!(dup.failures.len(), 1);
    assert!(dup.failures[0].contains("name `staff`"));
    assert!(dup.failures[0].contains("positions 0 and 1"));
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn empty_dataset_passes_vacuously() {
    let svc = FilesService::from_bytes(b"".as_slice(), b"".as_slice());
    let report = run_suite(&svc);
    for check in &report.checks {
        assert_eq!(check.outcome, CheckOutcome::Pass, "check {}", check.name);
    }
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn duplicate_uid_fails_both_equivalence_and_duplicates() {
    let svc = FilesService::from_bytes(
        b"alice:x:500:500:Alice:/home/alice:/bin/sh\nbob:x:500:500:Bob:/home/bob:/bin/sh\n"
            .as_slice(),
        b"".as_slice(),
    );
    let report = run_suite(&svc);
    assert_eq!(outcome(&report, CHECK_PASSWD_EQUIVALENCE), CheckOutcome::Fail);
    assert_eq!(outcome(&report, CHECK_PASSWD_DUPLICATES), CheckOutcome::Fail);
    // Membership still passes: both users fall back to implicit primary
    // groups consistently.
    assert_eq!(outcome(&report, CHECK_MEMBERSHIP), CheckOutcome::Pass);
    assert_eq!(report.exit_code(), 1);
}
