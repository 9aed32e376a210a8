//! Files backend: a [`DirectoryService`] over passwd/group format content.
//!
//! Parses the standard colon-delimited formats (`name:passwd:uid:gid:gecos:
//! dir:shell` and `name:passwd:gid:member,member`). Blank lines and `#`
//! comments are skipped; a structurally bad line is a
//! [`ServiceError::Malformed`], since silently dropping records would let a
//! broken directory pass its own conformance check.
//!
//! Each dataset kind carries one implicit enumeration position, guarded by a
//! `parking_lot::Mutex`. The plain keyed lookups decode through one shared
//! scratch buffer (the moral equivalent of libc's static result storage);
//! the `_r` forms decode through the caller's [`LookupBuffer`] only.

use std::path::Path;

use parking_lot::Mutex;

use crate::record::{GroupRecord, PasswdRecord};
use crate::service::{DatasetKind, DirectoryService, LookupBuffer, ServiceError};

/// Directory service backed by passwd/group file content held in memory.
pub struct FilesService {
    passwd: Vec<u8>,
    group: Vec<u8>,
    /// Line index of the open passwd enumeration, `None` when closed.
    passwd_pos: Mutex<Option<usize>>,
    /// Line index of the open group enumeration, `None` when closed.
    group_pos: Mutex<Option<usize>>,
    /// Shared decode scratch for the non-reentrant lookups.
    scratch: Mutex<Vec<u8>>,
}

impl FilesService {
    /// Build from raw passwd/group content. Content is validated lazily, on
    /// the operation that reaches a bad line.
    pub fn from_bytes(passwd: impl Into<Vec<u8>>, group: impl Into<Vec<u8>>) -> Self {
        Self {
            passwd: passwd.into(),
            group: group.into(),
            passwd_pos: Mutex::new(None),
            group_pos: Mutex::new(None),
            scratch: Mutex::new(Vec::new()),
        }
    }

    /// Build by reading both dataset files.
    pub fn from_paths(passwd: &Path, group: &Path) -> Result<Self, ServiceError> {
        let passwd = std::fs::read(passwd)?;
        let group = std::fs::read(group)?;
        Ok(Self::from_bytes(passwd, group))
    }

    fn open_slot(slot: &Mutex<Option<usize>>, dataset: DatasetKind) -> Result<(), ServiceError> {
        let mut pos = slot.lock();
        if pos.is_some() {
            return Err(ServiceError::CursorBusy { dataset });
        }
        *pos = Some(0);
        Ok(())
    }

    fn next_record<T>(
        content: &[u8],
        slot: &Mutex<Option<usize>>,
        dataset: DatasetKind,
        parse: impl Fn(&[u8]) -> Result<T, &'static str>,
    ) -> Result<Option<T>, ServiceError> {
        let mut pos = slot.lock();
        let Some(mut line_idx) = *pos else {
            return Err(ServiceError::CursorClosed { dataset });
        };
        for raw in content.split(|&b| b == b'\n').skip(line_idx) {
            line_idx += 1;
            let line = strip_cr(raw);
            if is_skippable(line) {
                continue;
            }
            *pos = Some(line_idx);
            return match parse(line) {
                Ok(record) => Ok(Some(record)),
                Err(reason) => Err(ServiceError::Malformed {
                    dataset,
                    line: line_idx,
                    reason,
                }),
            };
        }
        *pos = Some(line_idx);
        Ok(None)
    }

    /// Scan for the first record matching `pred`, decoding each candidate
    /// line through `buf`.
    fn find_record<T>(
        content: &[u8],
        dataset: DatasetKind,
        buf: &mut Vec<u8>,
        parse: impl Fn(&[u8]) -> Result<T, &'static str>,
        pred: impl Fn(&T) -> bool,
    ) -> Result<Option<T>, ServiceError> {
        for (n, raw) in content.split(|&b| b == b'\n').enumerate() {
            let line = strip_cr(raw);
            if is_skippable(line) {
                continue;
            }
            buf.clear();
            buf.extend_from_slice(line);
            let record = parse(buf).map_err(|reason| ServiceError::Malformed {
                dataset,
                line: n + 1,
                reason,
            })?;
            if pred(&record) {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    fn find_passwd(
        &self,
        buf: &mut Vec<u8>,
        pred: impl Fn(&PasswdRecord) -> bool,
    ) -> Result<Option<PasswdRecord>, ServiceError> {
        Self::find_record(&self.passwd, DatasetKind::Passwd, buf, parse_passwd_line, pred)
    }

    fn find_group(
        &self,
        buf: &mut Vec<u8>,
        pred: impl Fn(&GroupRecord) -> bool,
    ) -> Result<Option<GroupRecord>, ServiceError> {
        Self::find_record(&self.group, DatasetKind::Group, buf, parse_group_line, pred)
    }
}

impl DirectoryService for FilesService {
    fn passwd_open(&self) -> Result<(), ServiceError> {
        Self::open_slot(&self.passwd_pos, DatasetKind::Passwd)
    }

    fn passwd_next(&self) -> Result<Option<PasswdRecord>, ServiceError> {
        Self::next_record(
            &self.passwd,
            &self.passwd_pos,
            DatasetKind::Passwd,
            parse_passwd_line,
        )
    }

    fn passwd_close(&self) {
        *self.passwd_pos.lock() = None;
    }

    fn group_open(&self) -> Result<(), ServiceError> {
        Self::open_slot(&self.group_pos, DatasetKind::Group)
    }

    fn group_next(&self) -> Result<Option<GroupRecord>, ServiceError> {
        Self::next_record(
            &self.group,
            &self.group_pos,
            DatasetKind::Group,
            parse_group_line,
        )
    }

    fn group_close(&self) {
        *self.group_pos.lock() = None;
    }

    fn passwd_by_name(&self, name: &[u8]) -> Result<Option<PasswdRecord>, ServiceError> {
        let mut scratch = self.scratch.lock();
        self.find_passwd(&mut scratch, |rec| rec.name == name)
    }

    fn passwd_by_uid(&self, uid: u32) -> Result<Option<PasswdRecord>, ServiceError> {
        let mut scratch = self.scratch.lock();
        self.find_passwd(&mut scratch, |rec| rec.uid == uid)
    }

    fn passwd_by_name_r(
        &self,
        name: &[u8],
        buf: &mut LookupBuffer,
    ) -> Result<Option<PasswdRecord>, ServiceError> {
        self.find_passwd(&mut buf.bytes, |rec| rec.name == name)
    }

    fn passwd_by_uid_r(
        &self,
        uid: u32,
        buf: &mut LookupBuffer,
    ) -> Result<Option<PasswdRecord>, ServiceError> {
        self.find_passwd(&mut buf.bytes, |rec| rec.uid == uid)
    }

    fn group_by_name(&self, name: &[u8]) -> Result<Option<GroupRecord>, ServiceError> {
        let mut scratch = self.scratch.lock();
        self.find_group(&mut scratch, |rec| rec.name == name)
    }

    fn group_by_gid(&self, gid: u32) -> Result<Option<GroupRecord>, ServiceError> {
        let mut scratch = self.scratch.lock();
        self.find_group(&mut scratch, |rec| rec.gid == gid)
    }

    fn group_by_name_r(
        &self,
        name: &[u8],
        buf: &mut LookupBuffer,
    ) -> Result<Option<GroupRecord>, ServiceError> {
        self.find_group(&mut buf.bytes, |rec| rec.name == name)
    }

    fn group_by_gid_r(
        &self,
        gid: u32,
        buf: &mut LookupBuffer,
    ) -> Result<Option<GroupRecord>, ServiceError> {
        self.find_group(&mut buf.bytes, |rec| rec.gid == gid)
    }

    fn group_list(&self, name: &[u8], primary_gid: u32) -> Result<Vec<u32>, ServiceError> {
        // The primary gid is reported exactly once whether or not the
        // primary group also lists the user explicitly.
        let mut gids = vec![primary_gid];
        for (n, raw) in self.group.split(|&b| b == b'\n').enumerate() {
            let line = strip_cr(raw);
            if is_skippable(line) {
                continue;
            }
            let group = parse_group_line(line).map_err(|reason| ServiceError::Malformed {
                dataset: DatasetKind::Group,
                line: n + 1,
                reason,
            })?;
            if group.gid != primary_gid && group.members.iter().any(|m| m == name) {
                gids.push(group.gid);
            }
        }
        Ok(gids)
    }
}

fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn is_skippable(line: &[u8]) -> bool {
    line.is_empty() || line.starts_with(b"#")
}

fn parse_u32(field: &[u8], reason: &'static str) -> Result<u32, &'static str> {
    core::str::from_utf8(field)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or(reason)
}

/// Parse one passwd line: `name:passwd:uid:gid:gecos:dir:shell`.
fn parse_passwd_line(line: &[u8]) -> Result<PasswdRecord, &'static str> {
    let fields: Vec<&[u8]> = line.split(|&b| b == b':').collect();
    if fields.len() != 7 {
        return Err("expected 7 colon-delimited fields");
    }
    if fields[0].is_empty() {
        return Err("empty user name");
    }
    Ok(PasswdRecord {
        name: fields[0].to_vec(),
        passwd: fields[1].to_vec(),
        uid: parse_u32(fields[2], "non-numeric uid")?,
        gid: parse_u32(fields[3], "non-numeric gid")?,
        gecos: fields[4].to_vec(),
        dir: fields[5].to_vec(),
        shell: fields[6].to_vec(),
    })
}

/// Parse one group line: `name:passwd:gid:member,member`.
///
/// An empty member field is an empty list; a trailing comma produces an
/// empty member name, matching the resolver behavior being checked.
fn parse_group_line(line: &[u8]) -> Result<GroupRecord, &'static str> {
    let fields: Vec<&[u8]> = line.split(|&b| b == b':').collect();
    if fields.len() != 4 {
        return Err("expected 4 colon-delimited fields");
    }
    if fields[0].is_empty() {
        return Err("empty group name");
    }
    let members = if fields[3].is_empty() {
        Vec::new()
    } else {
        fields[3].split(|&b| b == b',').map(|m| m.to_vec()).collect()
    };
    Ok(GroupRecord {
        name: fields[0].to_vec(),
        passwd: fields[1].to_vec(),
        gid: parse_u32(fields[2], "non-numeric gid")?,
        members,
    })
}
