//! Duplicate primary-key detection.
//!
//! A well-formed directory never carries two records with the same name or
//! the same numeric id. The scan is the plain O(n²) pair walk; the datasets
//! this tool validates are test-sized, and reporting positions is the
//! point.

use nssck_core::record::{GroupRecord, PasswdRecord, lossy};

/// Which primary key collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKey {
    Name,
    Id,
}

/// A pair of distinct snapshot positions sharing a primary key, reported
/// once with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicatePair {
    pub key: DuplicateKey,
    pub first: usize,
    pub second: usize,
}

/// Report every user pair sharing a name, and separately every pair sharing
/// a uid.
#[must_use]
pub fn passwd_duplicates(snapshot: &[PasswdRecord]) -> Vec<DuplicatePair> {
    let mut pairs = Vec::new();
    for i in 0..snapshot.len() {
        for j in (i + 1)..snapshot.len() {
            if snapshot[i].name == snapshot[j].name {
                pairs.push(DuplicatePair { key: DuplicateKey::Name, first: i, second: j });
            }
            if snapshot[i].uid == snapshot[j].uid {
                pairs.push(DuplicatePair { key: DuplicateKey::Id, first: i, second: j });
            }
        }
    }
    pairs
}

/// Report every group pair sharing a name, and separately every pair sharing
/// a gid.
#[must_use]
pub fn group_duplicates(snapshot: &[GroupRecord]) -> Vec<DuplicatePair> {
    let mut pairs = Vec::new();
    for i in 0..snapshot.len() {
        for j in (i + 1)..snapshot.len() {
            if snapshot[i].name == snapshot[j].name {
                pairs.push(DuplicatePair { key: DuplicateKey::Name, first: i, second: j });
            }
            if snapshot[i].gid == snapshot[j].gid {
                pairs.push(DuplicatePair { key: DuplicateKey::Id, first: i, second: j });
            }
        }
    }
    pairs
}

/// Render a user duplicate as a failure message, both records included.
#[must_use]
pub fn describe_passwd_duplicate(snapshot: &[PasswdRecord], pair: &DuplicatePair) -> String {
    let (a, b) = (&snapshot[pair.first], &snapshot[pair.second]);
    let key = match pair.key {
        DuplicateKey::Name => format!("name `{}`", lossy(&a.name)),
        DuplicateKey::Id => format!("uid {}", a.uid),
    };
    format!(
        "duplicate user {key} at positions {} and {}: {a} / {b}",
        pair.first, pair.second
    )
}

/// Render a group duplicate as a failure message, both records included.
#[must_use]
pub fn describe_group_duplicate(snapshot: &[GroupRecord], pair: &DuplicatePair) -> String {
    let (a, b) = (&snapshot[pair.first], &snapshot[pair.second]);
    let key = match pair.key {
        DuplicateKey::Name => format!("name `{}`", lossy(&a.name)),
        DuplicateKey::Id => format!("gid {}", a.gid),
    };
    format!(
        "duplicate group {key} at positions {} and {}: {a} / {b}",
        pair.first, pair.second
    )
}
