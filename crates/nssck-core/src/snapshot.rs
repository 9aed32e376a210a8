//! Snapshot capture: one full enumeration pass into an owned `Vec`.
//!
//! The returned snapshot is owned by the check that captured it and is
//! never touched again by the service. If enumeration fails partway, the
//! cursor's `Drop` releases the position before the error propagates.

use crate::cursor::{GroupCursor, PasswdCursor};
use crate::record::{GroupRecord, PasswdRecord};
use crate::service::{DirectoryService, ServiceError};

/// Capture every user record in enumeration order.
pub fn passwd_snapshot(svc: &dyn DirectoryService) -> Result<Vec<PasswdRecord>, ServiceError> {
    let mut cursor = PasswdCursor::open(svc)?;
    let mut records = Vec::new();
    while let Some(record) = cursor.next()? {
        records.push(record);
    }
    cursor.close();
    Ok(records)
}

/// Capture every group record in enumeration order.
pub fn group_snapshot(svc: &dyn DirectoryService) -> Result<Vec<GroupRecord>, ServiceError> {
    let mut cursor = GroupCursor::open(svc)?;
    let mut records = Vec::new();
    while let Some(record) = cursor.next()? {
        records.push(record);
    }
    cursor.close();
    Ok(records)
}
