//! The seam between the conformance checks and the backing directory.
//!
//! [`DirectoryService`] exposes exactly what the checks need: the raw
//! enumeration primitives (open/next/close per dataset kind, carrying the
//! backend's single implicit position), keyed lookups in plain and reentrant
//! forms, and the aggregate group-membership query. Absence is `Ok(None)`;
//! [`ServiceError`] is reserved for genuine backend failure.

use thiserror::Error;

use crate::record::{GroupRecord, PasswdRecord};

/// Which dataset an operation touched, for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Passwd,
    Group,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passwd => f.write_str("passwd"),
            Self::Group => f.write_str("group"),
        }
    }
}

/// Backend failure. Lookups that simply find nothing return `Ok(None)`
/// instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// A structurally invalid record. A conformance checker must not skip
    /// corrupt lines the way a lenient resolver would.
    #[error("{dataset} line {line}: {reason}")]
    Malformed {
        dataset: DatasetKind,
        line: usize,
        reason: &'static str,
    },
    /// A second enumeration was opened over a dataset kind whose implicit
    /// position is already held.
    #[error("{dataset} enumeration already open")]
    CursorBusy { dataset: DatasetKind },
    /// `next` was issued with no open enumeration. Usage error, not retried.
    #[error("{dataset} enumeration not open")]
    CursorClosed { dataset: DatasetKind },
}

/// Caller-supplied scratch space for the reentrant lookups.
///
/// The reentrant forms decode the matching raw record through this buffer
/// instead of any backend-global scratch, so they are safe to drive from
/// multiple execution contexts, one buffer each.
#[derive(Debug, Default)]
pub struct LookupBuffer {
    pub(crate) bytes: Vec<u8>,
}

impl LookupBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }
}

/// Abstract identity directory.
///
/// Every returned record is freshly constructed; implementations never hand
/// out shared or cached records. The enumeration primitives act on one
/// implicit position per dataset kind; prefer the cursor wrappers in
/// [`crate::cursor`], which tie open/close to ownership.
pub trait DirectoryService {
    /// Reset and open the passwd enumeration position.
    fn passwd_open(&self) -> Result<(), ServiceError>;
    /// Yield the next user, or `Ok(None)` at end of data (sticky).
    fn passwd_next(&self) -> Result<Option<PasswdRecord>, ServiceError>;
    /// Release the passwd enumeration position. Idempotent, always legal.
    fn passwd_close(&self);

    /// Reset and open the group enumeration position.
    fn group_open(&self) -> Result<(), ServiceError>;
    /// Yield the next group, or `Ok(None)` at end of data (sticky).
    fn group_next(&self) -> Result<Option<GroupRecord>, ServiceError>;
    /// Release the group enumeration position. Idempotent, always legal.
    fn group_close(&self);

    fn passwd_by_name(&self, name: &[u8]) -> Result<Option<PasswdRecord>, ServiceError>;
    fn passwd_by_uid(&self, uid: u32) -> Result<Option<PasswdRecord>, ServiceError>;
    fn passwd_by_name_r(
        &self,
        name: &[u8],
        buf: &mut LookupBuffer,
    ) -> Result<Option<PasswdRecord>, ServiceError>;
    fn passwd_by_uid_r(
        &self,
        uid: u32,
        buf: &mut LookupBuffer,
    ) -> Result<Option<PasswdRecord>, ServiceError>;

    fn group_by_name(&self, name: &[u8]) -> Result<Option<GroupRecord>, ServiceError>;
    fn group_by_gid(&self, gid: u32) -> Result<Option<GroupRecord>, ServiceError>;
    fn group_by_name_r(
        &self,
        name: &[u8],
        buf: &mut LookupBuffer,
    ) -> Result<Option<GroupRecord>, ServiceError>;
    fn group_by_gid_r(
        &self,
        gid: u32,
        buf: &mut LookupBuffer,
    ) -> Result<Option<GroupRecord>, ServiceError>;

    /// All gids the named user belongs to: the primary gid exactly once,
    /// plus every group that lists the user as an explicit member.
    fn group_list(&self, name: &[u8], primary_gid: u32) -> Result<Vec<u32>, ServiceError>;
}
