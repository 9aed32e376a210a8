//! Enumeration cursors.
//!
//! The backing service exposes raw open/next/close primitives acting on one
//! implicit position per dataset kind. These wrappers tie that lifecycle to
//! ownership: constructing a cursor opens (and resets) the position,
//! `close` consumes the cursor, and `Drop` releases the position on every
//! exit path, so a failed check never leaves the position held for the next
//! one. "next after close" is unrepresentable, not a runtime error.

use crate::record::{GroupRecord, PasswdRecord};
use crate::service::{DirectoryService, ServiceError};

/// Open passwd enumeration. At most one may exist per service at a time.
pub struct PasswdCursor<'a> {
    svc: &'a dyn DirectoryService,
    open: bool,
}

impl<'a> PasswdCursor<'a> {
    /// Open the passwd enumeration, resetting its position to the start.
    pub fn open(svc: &'a dyn DirectoryService) -> Result<Self, ServiceError> {
        svc.passwd_open()?;
        Ok(Self { svc, open: true })
    }

    /// Next user, or `Ok(None)` at end of data. End of data is sticky.
    pub fn next(&mut self) -> Result<Option<PasswdRecord>, ServiceError> {
        self.svc.passwd_next()
    }

    /// Release the enumeration position.
    pub fn close(mut self) {
        self.open = false;
        self.svc.passwd_close();
    }
}

impl Drop for PasswdCursor<'_> {
    fn drop(&mut self) {
        if self.open {
            self.svc.passwd_close();
        }
    }
}

/// Open group enumeration. At most one may exist per service at a time.
pub struct GroupCursor<'a> {
    svc: &'a dyn DirectoryService,
    open: bool,
}

impl<'a> GroupCursor<'a> {
    /// Open the group enumeration, resetting its position to the start.
    pub fn open(svc: &'a dyn DirectoryService) -> Result<Self, ServiceError> {
        svc.group_open()?;
        Ok(Self { svc, open: true })
    }

    /// Next group, or `Ok(None)` at end of data. End of data is sticky.
    pub fn next(&mut self) -> Result<Option<GroupRecord>, ServiceError> {
        self.svc.group_next()
    }

    /// Release the enumeration position.
    pub fn close(mut self) {
        self.open = false;
        self.svc.group_close();
    }
}

impl Drop for GroupCursor<'_> {
    fn drop(&mut self) {
        if self.open {
            self.svc.group_close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::FilesService;

    const PASSWD: &[u8] = b"root:x:0:0:root:/root:/bin/bash\nalice:x:1000:100::/home/alice:/bin/sh\n";
    const GROUP: &[u8] = b"root:x:0:\nstaff:x:100:alice\n";

    #[test]
    fn cursor_reads_in_order() {
        let svc = FilesService::from_bytes(PASSWD, GROUP);
        let mut cursor = PasswdCursor::open(&svc).unwrap();
        assert_eq!(cursor.next().unwrap().unwrap().name, b"root");
        assert_eq!(cursor.next().unwrap().unwrap().name, b"alice");
        assert!(cursor.next().unwrap().is_none());
        cursor.close();
    }

    #[test]
    fn close_releases_the_position() {
        let svc = FilesService::from_bytes(PASSWD, GROUP);
        let cursor = PasswdCursor::open(&svc).unwrap();
        assert!(PasswdCursor::open(&svc).is_err());
        cursor.close();
        PasswdCursor::open(&svc).unwrap().close();
    }

    #[test]
    fn drop_releases_the_position() {
        let svc = FilesService::from_bytes(PASSWD, GROUP);
        {
            let mut cursor = GroupCursor::open(&svc).unwrap();
            let _ = cursor.next().unwrap();
            // Dropped without close, e.g. on a failure path.
        }
        GroupCursor::open(&svc).unwrap().close();
    }

    #[test]
    fn passwd_and_group_cursors_are_independent() {
        let svc = FilesService::from_bytes(PASSWD, GROUP);
        let mut users = PasswdCursor::open(&svc).unwrap();
        let mut groups = GroupCursor::open(&svc).unwrap();
        assert_eq!(users.next().unwrap().unwrap().name, b"root");
        assert_eq!(groups.next().unwrap().unwrap().name, b"root");
        users.close();
        groups.close();
    }
}
