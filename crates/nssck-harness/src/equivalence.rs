//! Enumeration/lookup equivalence checks.
//!
//! For every record in a snapshot, the record is re-derived through the
//! by-name and by-id lookup paths, in plain and reentrant forms, and every
//! pairing is compared structurally. Mismatches accumulate as named
//! failures; only a backend failure aborts the check.

use nssck_core::record::{GroupRecord, PasswdRecord, lossy};
use nssck_core::service::{DirectoryService, LookupBuffer, ServiceError};

use crate::diff::{group_diffs, passwd_diffs};

fn compare<T>(
    failures: &mut Vec<String>,
    who: &str,
    left_path: &str,
    right_path: &str,
    left: &T,
    right: &T,
    diff: impl Fn(&T, &T) -> Vec<String>,
) {
    for d in diff(left, right) {
        failures.push(format!("{who}: {left_path} and {right_path} disagree: {d}"));
    }
}

fn require<'t, T>(
    failures: &mut Vec<String>,
    who: &str,
    path: &str,
    found: &'t Option<T>,
) -> Option<&'t T> {
    if found.is_none() {
        failures.push(format!("{who}: enumerated but {path} found nothing"));
    }
    found.as_ref()
}

/// Check that every enumerated user is observable, identically, through all
/// four lookup paths.
pub fn check_passwd_equivalence(
    svc: &dyn DirectoryService,
    snapshot: &[PasswdRecord],
) -> Result<Vec<String>, ServiceError> {
    let mut failures = Vec::new();
    let mut buf = LookupBuffer::new();

    for record in snapshot {
        let who = format!("user `{}` (uid {})", lossy(&record.name), record.uid);

        let by_name = svc.passwd_by_name(&record.name)?;
        let by_uid = svc.passwd_by_uid(record.uid)?;
        let by_name_r = svc.passwd_by_name_r(&record.name, &mut buf)?;
        let by_uid_r = svc.passwd_by_uid_r(record.uid, &mut buf)?;

        let by_name = require(&mut failures, &who, "name lookup", &by_name);
        let by_uid = require(&mut failures, &who, "id lookup", &by_uid);
        let by_name_r = require(&mut failures, &who, "reentrant name lookup", &by_name_r);
        let by_uid_r = require(&mut failures, &who, "reentrant id lookup", &by_uid_r);

        if let Some(found) = by_name {
            compare(&mut failures, &who, "enumeration", "name lookup", record, found, passwd_diffs);
        }
        if let Some(found) = by_uid {
            compare(&mut failures, &who, "enumeration", "id lookup", record, found, passwd_diffs);
        }
        if let (Some(a), Some(b)) = (by_name, by_uid) {
            compare(&mut failures, &who, "name lookup", "id lookup", a, b, passwd_diffs);
        }
        if let (Some(a), Some(b)) = (by_name, by_name_r) {
            compare(&mut failures, &who, "name lookup", "reentrant name lookup", a, b, passwd_diffs);
        }
        if let (Some(a), Some(b)) = (by_uid, by_uid_r) {
            compare(&mut failures, &who, "id lookup", "reentrant id lookup", a, b, passwd_diffs);
        }
        if let (Some(a), Some(b)) = (by_name_r, by_uid_r) {
            compare(
                &mut failures,
                &who,
                "reentrant name lookup",
                "reentrant id lookup",
                a,
                b,
                passwd_diffs,
            );
        }
    }

    Ok(failures)
}

/// Check that every enumerated group is observable, identically, through all
/// four lookup paths.
pub fn check_group_equivalence(
    svc: &dyn DirectoryService,
    snapshot: &[GroupRecord],
) -> Result<Vec<String>, ServiceError> {
    let mut failures = Vec::new();
    let mut buf = LookupBuffer::new();

    for record in snapshot {
        let who = format!("group `{}` (gid {})", lossy(&record.name), record.gid);

        let by_name = svc.group_by_name(&record.name)?;
        let by_gid = svc.group_by_gid(record.gid)?;
        let by_name_r = svc.group_by_name_r(&record.name, &mut buf)?;
        let by_gid_r = svc.group_by_gid_r(record.gid, &mut buf)?;

        let by_name = require(&mut failures, &who, "name lookup", &by_name);
        let by_gid = require(&mut failures, &who, "id lookup", &by_gid);
        let by_name_r = require(&mut failures, &who, "reentrant name lookup", &by_name_r);
        let by_gid_r = require(&mut failures, &who, "reentrant id lookup", &by_gid_r);

        if let Some(found) = by_name {
            compare(&mut failures, &who, "enumeration", "name lookup", record, found, group_diffs);
        }
        if let Some(found) = by_gid {
            compare(&mut failures, &who, "enumeration", "id lookup", record, found, group_diffs);
        }
        if let (Some(a), Some(b)) = (by_name, by_gid) {
            compare(&mut failures, &who, "name lookup", "id lookup", a, b, group_diffs);
        }
        if let (Some(a), Some(b)) = (by_name, by_name_r) {
            compare(&mut failures, &who, "name lookup", "reentrant name lookup", a, b, group_diffs);
        }
        if let (Some(a), Some(b)) = (by_gid, by_gid_r) {
            compare(&mut failures, &who, "id lookup", "reentrant id lookup", a, b, group_diffs);
        }
        if let (Some(a), Some(b)) = (by_name_r, by_gid_r) {
            compare(
                &mut failures,
                &who,
                "reentrant name lookup",
                "reentrant id lookup",
                a,
                b,
                group_diffs,
            );
        }
    }

    Ok(failures)
}
