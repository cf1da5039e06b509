//! Open files and directories held behind handles.

use std::fs::{self, File, Metadata, ReadDir};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use protocol::{FileAttributes, NamedFile};

/// A resource registered under a handle.
#[derive(Debug)]
pub enum OpenResource {
    /// A regular file opened with OPEN.
    File(OpenFile),
    /// A directory opened with OPENDIR.
    Directory(OpenDirectory),
}

impl OpenResource {
    /// Local path the resource was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::File(file) => file.path(),
            Self::Directory(dir) => dir.path(),
        }
    }

    /// Returns the file, or `None` for a directory handle.
    #[must_use]
    pub const fn as_file(&self) -> Option<&OpenFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    /// Returns the directory, or `None` for a file handle.
    #[must_use]
    pub const fn as_directory(&self) -> Option<&OpenDirectory> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    /// Attributes of the underlying file or directory.
    pub fn attrs(&self) -> io::Result<FileAttributes> {
        match self {
            Self::File(file) => file.attrs(),
            Self::Directory(dir) => fs::metadata(dir.path()).map(|meta| attrs_from_metadata(&meta)),
        }
    }
}

/// An open regular file.
///
/// Reads and writes are positioned, so each takes the file lock for one
/// seek plus transfer.
#[derive(Debug)]
pub struct OpenFile {
    path: PathBuf,
    file: Mutex<File>,
}

impl OpenFile {
    pub(crate) fn new(path: PathBuf, file: File) -> Self {
        Self {
            path,
            file: Mutex::new(file),
        }
    }

    /// Local path the file was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Exclusive access to the file for operations not covered here.
    pub fn file(&self) -> MutexGuard<'_, File> {
        self.file.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    /// Reads up to `len` bytes starting at `offset`.
    ///
    /// An empty result means `offset` is at or past the end of the file.
    pub fn read_at(&self, offset: u64, len: u32) -> io::Result<Vec<u8>> {
        let mut file = self.file();
        file.seek(SeekFrom::Start(offset))?;
        let mut data = Vec::new();
        Read::by_ref(&mut *file)
            .take(u64::from(len))
            .read_to_end(&mut data)?;
        Ok(data)
    }

    /// Writes all of `data` starting at `offset`.
    pub fn write_at(&self, offset: u64, data: &[u8]) -> io::Result<()> {
        let mut file = self.file();
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)
    }

    /// Flushes file contents and metadata to stable storage.
    pub fn sync(&self) -> io::Result<()> {
        self.file().sync_all()
    }

    /// Attributes of the open file.
    pub fn attrs(&self) -> io::Result<FileAttributes> {
        let meta = self.file().metadata()?;
        Ok(attrs_from_metadata(&meta))
    }
}

/// An open directory being listed in batches.
#[derive(Debug)]
pub struct OpenDirectory {
    path: PathBuf,
    entries: Mutex<ReadDir>,
}

impl OpenDirectory {
    pub(crate) fn new(path: PathBuf, entries: ReadDir) -> Self {
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Local path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns up to `limit` further entries.
    ///
    /// An empty batch means the listing is exhausted; the dispatcher answers
    /// that READDIR with an EOF status. Entries that vanish between listing
    /// and `lstat` are skipped.
    pub fn read_batch(&self, limit: usize) -> io::Result<Vec<NamedFile>> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        let mut batch = Vec::new();
        while batch.len() < limit {
            let Some(entry) = entries.next() else {
                break;
            };
            let entry = entry?;
            let meta = match entry.metadata() {
                Ok(meta) => meta,
                Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err),
            };
            let filename = name_bytes(&entry.file_name());
            let attrs = attrs_from_metadata(&meta);
            let longname = long_name(&filename, &attrs);
            batch.push(NamedFile::new(filename, longname, attrs));
        }
        Ok(batch)
    }
}

/// Builds wire attributes from filesystem metadata.
#[cfg(unix)]
#[must_use]
pub fn attrs_from_metadata(meta: &Metadata) -> FileAttributes {
    use std::os::unix::fs::MetadataExt;

    FileAttributes::default()
        .with_size(meta.size())
        .with_owner(meta.uid(), meta.gid())
        .with_permissions(meta.mode())
        .with_times(epoch_secs(meta.atime()), epoch_secs(meta.mtime()))
}

/// Builds wire attributes from filesystem metadata.
#[cfg(not(unix))]
#[must_use]
pub fn attrs_from_metadata(meta: &Metadata) -> FileAttributes {
    let kind = if meta.is_dir() { 0o040_000 } else { 0o100_000 };
    let access = match (meta.is_dir(), meta.permissions().readonly()) {
        (true, _) => 0o755,
        (false, true) => 0o444,
        (false, false) => 0o644,
    };
    let time = |t: io::Result<std::time::SystemTime>| {
        t.ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map_or(0, |elapsed| u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX))
    };

    FileAttributes::default()
        .with_size(meta.len())
        .with_permissions(kind | access)
        .with_times(time(meta.accessed()), time(meta.modified()))
}

#[cfg(unix)]
fn epoch_secs(secs: i64) -> u32 {
    u32::try_from(secs.max(0)).unwrap_or(u32::MAX)
}

#[cfg(unix)]
fn name_bytes(name: &std::ffi::OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    name.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn name_bytes(name: &std::ffi::OsStr) -> Vec<u8> {
    name.to_string_lossy().into_owned().into_bytes()
}

/// Renders an `ls -l` style line for a NAME entry.
fn long_name(filename: &[u8], attrs: &FileAttributes) -> Vec<u8> {
    let mode = mode_string(attrs.permissions.unwrap_or(0));
    let (uid, gid) = attrs.owner.map_or((0, 0), |owner| (owner.uid, owner.gid));
    let mut line = format!(
        "{mode} {uid:<8} {gid:<8} {size:>10} ",
        size = attrs.size.unwrap_or(0)
    )
    .into_bytes();
    line.extend_from_slice(filename);
    line
}

fn mode_string(mode: u32) -> String {
    let kind = match mode & 0o170_000 {
        0o040_000 => 'd',
        0o120_000 => 'l',
        0o020_000 => 'c',
        0o060_000 => 'b',
        0o010_000 => 'p',
        0o140_000 => 's',
        _ => '-',
    };
    let mut out = String::with_capacity(10);
    out.push(kind);
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}
