//! # nssck-core
//!
//! Abstraction over a user/group identity directory, plus the files backend
//! the conformance suite runs against.
//!
//! The directory is reached only through the [`DirectoryService`] trait:
//! sequential enumeration (open/next/close per dataset kind), keyed lookups
//! by name and numeric id in plain and reentrant forms, and one aggregate
//! group-membership query. Records are plain owned values; every query
//! returns a fresh deep copy, so nothing obtained from two access paths can
//! alias.

#![deny(unsafe_code)]

pub mod cursor;
pub mod files;
pub mod record;
pub mod service;
pub mod snapshot;

pub use cursor::{GroupCursor, PasswdCursor};
pub use files::FilesService;
pub use record::{GroupRecord, PasswdRecord, lossy};
pub use service::{DatasetKind, DirectoryService, LookupBuffer, ServiceError};
pub use snapshot::{group_snapshot, passwd_snapshot};
