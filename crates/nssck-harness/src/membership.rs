//! Group-membership cross-validation.
//!
//! The aggregate group-list query is checked against manual inspection of
//! every group's member list. A user belongs to their primary group even
//! when not listed in it, so the expected count is the explicit-membership
//! count plus one unless the primary group already lists the user. Every
//! gid the aggregate query reports must also resolve through the by-id
//! lookup.

use nssck_core::record::{GroupRecord, PasswdRecord, lossy};
use nssck_core::service::{DirectoryService, ServiceError};

/// True when the group's member list names the user explicitly.
#[must_use]
pub fn user_in_group(user: &PasswdRecord, group: &GroupRecord) -> bool {
    group.members.iter().any(|member| *member == user.name)
}

/// The group count manual inspection expects for `user`: explicit
/// memberships, plus the implicit primary membership unless already
/// explicit.
#[must_use]
pub fn expected_group_count(user: &PasswdRecord, groups: &[GroupRecord]) -> usize {
    let mut explicit = 0;
    let mut primary_listed = false;
    for group in groups {
        if user_in_group(user, group) {
            explicit += 1;
            if group.gid == user.gid {
                primary_listed = true;
            }
        }
    }
    explicit + usize::from(!primary_listed)
}

/// Validate the aggregate group-list query against the group snapshot for
/// every user in the user snapshot.
pub fn check_membership(
    svc: &dyn DirectoryService,
    users: &[PasswdRecord],
    groups: &[GroupRecord],
) -> Result<Vec<String>, ServiceError> {
    let mut failures = Vec::new();

    for user in users {
        let who = format!("user `{}`", lossy(&user.name));
        let gids = svc.group_list(&user.name, user.gid)?;

        for gid in &gids {
            if svc.group_by_gid(*gid)?.is_none() {
                failures.push(format!(
                    "{who}: group list contains gid {gid} with no matching group"
                ));
            }
        }

        let expected = expected_group_count(user, groups);
        if gids.len() != expected {
            failures.push(format!(
                "{who}: group list reports {} groups, member-list inspection expects {expected}",
                gids.len()
            ));
        }
    }

    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nssck_core::files::FilesService;
    use nssck_core::snapshot::{group_snapshot, passwd_snapshot};

    const PASSWD: &[u8] = b"\
alice:x:1000:100:Alice:/home/alice:/bin/sh
bob:x:1001:100:Bob:/home/bob:/bin/sh
";
    const GROUP: &[u8] = b"staff:x:100:alice\nwheel:x:10:alice\n";

    #[test]
    fn explicit_primary_member_is_not_double_counted() {
        let svc = FilesService::from_bytes(PASSWD, GROUP);
        let users = passwd_snapshot(&svc).unwrap();
        let groups = group_snapshot(&svc).unwrap();
        // alice is an explicit member of her primary group: staff counts
        // once, wheel once.
        assert_eq!(expected_group_count(&users[0], &groups), 2);
        assert!(check_membership(&svc, &users, &groups).unwrap().is_empty());
    }

    #[test]
    fn implicit_primary_membership_counts_exactly_once() {
        let svc = FilesService::from_bytes(PASSWD, GROUP);
        let users = passwd_snapshot(&svc).unwrap();
        let groups = group_snapshot(&svc).unwrap();
        // bob is listed nowhere; his primary group membership is implicit.
        assert_eq!(expected_group_count(&users[1], &groups), 1);
    }

    #[test]
    fn user_in_group_matches_exact_names_only() {
        let svc = FilesService::from_bytes(PASSWD, GROUP);
        let users = passwd_snapshot(&svc).unwrap();
        let groups = group_snapshot(&svc).unwrap();
        assert!(user_in_group(&users[0], &groups[0]));
        assert!(!user_in_group(&users[1], &groups[0]));
    }

    #[test]
    fn no_users_means_no_failures() {
        let svc = FilesService::from_bytes(b"".as_slice(), GROUP);
        let groups = group_snapshot(&svc).unwrap();
        assert!(check_membership(&svc, &[], &groups).unwrap().is_empty());
    }

    #[test]
    fn membership_over_files_backend_round_trips() {
        let svc = FilesService::from_bytes(
            PASSWD,
            b"staff:x:100:alice\nwheel:x:10:alice\nusers:x:500:bob,alice\n".as_slice(),
        );
        let users = passwd_snapshot(&svc).unwrap();
        let groups = group_snapshot(&svc).unwrap();
        assert!(check_membership(&svc, &users, &groups).unwrap().is_empty());
    }
}
