//! Passwd and group record value types.
//!
//! Fields are byte strings: directory files carry no encoding guarantee, so
//! names and paths are compared as raw bytes and only rendered lossily for
//! human-readable output. `Clone` is a deep copy (including the member-name
//! list) and `PartialEq` is field-wise structural equality.

use std::borrow::Cow;
use std::fmt;

/// A user entry (analogous to `struct passwd`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswdRecord {
    /// Login name.
    pub name: Vec<u8>,
    /// Opaque password hash field.
    pub passwd: Vec<u8>,
    /// User ID.
    pub uid: u32,
    /// Primary group ID.
    pub gid: u32,
    /// User information (GECOS field).
    pub gecos: Vec<u8>,
    /// Home directory.
    pub dir: Vec<u8>,
    /// Login shell.
    pub shell: Vec<u8>,
}

/// A group entry (analogous to `struct group`).
///
/// Member order is part of the record: the backing service emits members in
/// a defined order and the conformance checks compare positions, not sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    /// Group name.
    pub name: Vec<u8>,
    /// Opaque password hash field.
    pub passwd: Vec<u8>,
    /// Group ID.
    pub gid: u32,
    /// Member login names, possibly empty, order preserved.
    pub members: Vec<Vec<u8>>,
}

/// Render a byte field for human-readable failure text.
pub fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

impl fmt::Display for PasswdRecord {
    /// Colon format: `name:passwd:uid:gid:gecos:dir:shell`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}:{}:{}",
            lossy(&self.name),
            lossy(&self.passwd),
            self.uid,
            self.gid,
            lossy(&self.gecos),
            lossy(&self.dir),
            lossy(&self.shell),
        )
    }
}

impl fmt::Display for GroupRecord {
    /// Colon format: `name:passwd:gid:member,member`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:",
            lossy(&self.name),
            lossy(&self.passwd),
            self.gid
        )?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", lossy(member))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> PasswdRecord {
        PasswdRecord {
            name: b"alice".to_vec(),
            passwd: b"x".to_vec(),
            uid: 1000,
            gid: 100,
            gecos: b"Alice".to_vec(),
            dir: b"/home/alice".to_vec(),
            shell: b"/bin/sh".to_vec(),
        }
    }

    #[test]
    fn passwd_display_is_colon_format() {
        assert_eq!(
            sample_user().to_string(),
            "alice:x:1000:100:Alice:/home/alice:/bin/sh"
        );
    }

    #[test]
    fn group_display_joins_members() {
        let grp = GroupRecord {
            name: b"staff".to_vec(),
            passwd: b"x".to_vec(),
            gid: 100,
            members: vec![b"alice".to_vec(), b"bob".to_vec()],
        };
        assert_eq!(grp.to_string(), "staff:x:100:alice,bob");
    }

    #[test]
    fn group_display_empty_members() {
        let grp = GroupRecord {
            name: b"empty".to_vec(),
            passwd: b"x".to_vec(),
            gid: 7,
            members: Vec::new(),
        };
        assert_eq!(grp.to_string(), "empty:x:7:");
    }

    #[test]
    fn clone_is_independent() {
        let src = sample_user();
        let mut copy = src.clone();
        copy.shell = b"/bin/bash".to_vec();
        copy.name.push(b'!');
        assert_eq!(src.shell, b"/bin/sh");
        assert_eq!(src.name, b"alice");
    }

    #[test]
    fn group_clone_copies_member_list() {
        let src = GroupRecord {
            name: b"staff".to_vec(),
            passwd: b"x".to_vec(),
            gid: 100,
            members: vec![b"alice".to_vec()],
        };
        let mut copy = src.clone();
        copy.members.push(b"bob".to_vec());
        copy.members[0] = b"mallory".to_vec();
        assert_eq!(src.members, vec![b"alice".to_vec()]);
    }

    #[test]
    fn lossy_renders_invalid_utf8() {
        assert_eq!(lossy(b"a\xffb"), "a\u{fffd}b");
    }
}
