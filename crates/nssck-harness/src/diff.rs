//! Field-level structural comparison.
//!
//! Equality alone cannot produce a useful verdict; each function returns one
//! fragment per differing field ("shell differs (`/bin/sh` vs `/bin/bash`)")
//! so a mismatch names what diverged. An empty result is structural
//! equality.
//!
//! Group member lists compare positionally over the common prefix: order is
//! part of the backing service's contract, but a longer list whose prefix
//! agrees is not a mismatch. This mirrors the resolver behavior the suite
//! was built against and is deliberate.

use nssck_core::record::{GroupRecord, PasswdRecord, lossy};

fn byte_field(diffs: &mut Vec<String>, field: &str, a: &[u8], b: &[u8]) {
    if a != b {
        diffs.push(format!("{field} differs (`{}` vs `{}`)", lossy(a), lossy(b)));
    }
}

fn id_field(diffs: &mut Vec<String>, field: &str, a: u32, b: u32) {
    if a != b {
        diffs.push(format!("{field} differs ({a} vs {b})"));
    }
}

/// Compare two user records field by field.
#[must_use]
pub fn passwd_diffs(a: &PasswdRecord, b: &PasswdRecord) -> Vec<String> {
    let mut diffs = Vec::new();
    byte_field(&mut diffs, "name", &a.name, &b.name);
    byte_field(&mut diffs, "password field", &a.passwd, &b.passwd);
    id_field(&mut diffs, "uid", a.uid, b.uid);
    id_field(&mut diffs, "gid", a.gid, b.gid);
    byte_field(&mut diffs, "gecos", &a.gecos, &b.gecos);
    byte_field(&mut diffs, "home directory", &a.dir, &b.dir);
    byte_field(&mut diffs, "shell", &a.shell, &b.shell);
    diffs
}

/// Compare two group records field by field, members by position over the
/// common prefix.
#[must_use]
pub fn group_diffs(a: &GroupRecord, b: &GroupRecord) -> Vec<String> {
    let mut diffs = Vec::new();
    byte_field(&mut diffs, "name", &a.name, &b.name);
    byte_field(&mut diffs, "password field", &a.passwd, &b.passwd);
    id_field(&mut diffs, "gid", a.gid, b.gid);
    for (i, (ma, mb)) in a.members.iter().zip(&b.members).enumerate() {
        if ma != mb {
            diffs.push(format!(
                "member[{i}] differs (`{}` vs `{}`)",
                lossy(ma),
                lossy(mb)
            ));
        }
    }
    diffs
}
