//! Root-directory confinement for client paths.
//!
//! Client paths are resolved lexically before any filesystem call. With a
//! root configured, absolute paths are taken relative to the root and `..`
//! components stop at the root instead of climbing above it. Symlinks inside
//! the served tree are not followed here.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::ServerError;

/// Maps client paths onto the local filesystem.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathConfinement {
    root: Option<PathBuf>,
}

impl PathConfinement {
    /// Confines every resolved path to `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Passes client paths through unchanged.
    #[must_use]
    pub const fn unconfined() -> Self {
        Self { root: None }
    }

    /// Returns the confining root, if any.
    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolves a client path to the local path the filesystem should see.
    ///
    /// Fails with [`ServerError::InvalidPath`] when the bytes contain a NUL or
    /// cannot be represented as a path on this platform.
    pub fn resolve(&self, requested: &[u8]) -> Result<PathBuf, ServerError> {
        let requested = client_path(requested)?;
        let Some(root) = &self.root else {
            return Ok(requested.to_path_buf());
        };

        let mut parts: Vec<&OsStr> = Vec::new();
        let mut clamped = false;
        for component in requested.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => parts.clear(),
                Component::CurDir => {}
                Component::ParentDir => clamped |= parts.pop().is_none(),
                Component::Normal(part) => parts.push(part),
            }
        }

        let mut resolved = root.clone();
        resolved.extend(parts);
        if clamped {
            logging::trace_path!(
                requested = %requested.display(),
                resolved = %resolved.display(),
                "path climbed above root; clamped"
            );
        }
        Ok(resolved)
    }

    /// Resolves `requested` to an absolute path with no `.` or `..`
    /// components, as REALPATH reports it.
    ///
    /// Under a root this is [`resolve`](Self::resolve). Without one, relative
    /// paths are anchored at `cwd` and `..` stops at the filesystem root.
    pub fn canonical(&self, requested: &[u8], cwd: &Path) -> Result<PathBuf, ServerError> {
        if self.root.is_some() {
            return self.resolve(requested);
        }
        let requested = client_path(requested)?;
        let mut resolved = if requested.has_root() {
            PathBuf::new()
        } else {
            lexical(cwd)
        };
        push_lexical(&mut resolved, requested);
        if !resolved.has_root() {
            resolved = Path::new("/").join(resolved);
        }
        Ok(resolved)
    }

    /// Renders a local path the way a client should see it.
    ///
    /// Under a root the result is absolute and relative to that root, so
    /// `<root>/a/b` becomes `/a/b` and the root itself becomes `/`.
    #[must_use]
    pub fn client_view(&self, local: &Path) -> Vec<u8> {
        let shown = match self.root.as_deref().map(|root| local.strip_prefix(root)) {
            Some(Ok(relative)) => Path::new("/").join(relative),
            Some(Err(_)) | None => local.to_path_buf(),
        };
        path_bytes(&shown)
    }
}

fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    push_lexical(&mut out, path);
    out
}

fn push_lexical(out: &mut PathBuf, path: &Path) {
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
        }
    }
}

fn client_path(bytes: &[u8]) -> Result<&Path, ServerError> {
    if bytes.contains(&0) {
        return Err(invalid(bytes));
    }
    os_path(bytes)
}

fn invalid(bytes: &[u8]) -> ServerError {
    ServerError::InvalidPath(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(unix)]
fn os_path(bytes: &[u8]) -> Result<&Path, ServerError> {
    use std::os::unix::ffi::OsStrExt;
    Ok(Path::new(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn os_path(bytes: &[u8]) -> Result<&Path, ServerError> {
    std::str::from_utf8(bytes)
        .map(Path::new)
        .map_err(|_| invalid(bytes))
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().replace('\\', "/").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confined() -> PathConfinement {
        PathConfinement::new("/srv/root")
    }

    #[test]
    fn unconfined_passes_through() {
        let paths = PathConfinement::unconfined();
        assert_eq!(
            paths.resolve(b"/etc/../etc/passwd").unwrap(),
            PathBuf::from("/etc/../etc/passwd")
        );
    }

    #[test]
    fn absolute_paths_are_rooted() {
        assert_eq!(
            confined().resolve(b"/etc/passwd").unwrap(),
            PathBuf::from("/srv/root/etc/passwd")
        );
        assert_eq!(
            confined().resolve(b"docs/a.txt").unwrap(),
            PathBuf::from("/srv/root/docs/a.txt")
        );
    }

    #[test]
    fn parent_components_stop_at_root() {
        assert_eq!(
            confined().resolve(b"../../etc/shadow").unwrap(),
            PathBuf::from("/srv/root/etc/shadow")
        );
        assert_eq!(
            confined().resolve(b"a/b/../../../c").unwrap(),
            PathBuf::from("/srv/root/c")
        );
        assert_eq!(
            confined().resolve(b"a/./b/../c").unwrap(),
            PathBuf::from("/srv/root/a/c")
        );
    }

    #[test]
    fn empty_and_dot_resolve_to_root() {
        assert_eq!(confined().resolve(b"").unwrap(), PathBuf::from("/srv/root"));
        assert_eq!(confined().resolve(b".").unwrap(), PathBuf::from("/srv/root"));
        assert_eq!(confined().resolve(b"/").unwrap(), PathBuf::from("/srv/root"));
    }

    #[test]
    fn nul_bytes_are_rejected() {
        let err = confined().resolve(b"a\0b").unwrap_err();
        assert!(matches!(err, ServerError::InvalidPath(_)));
    }

    #[test]
    fn unconfined_canonical_is_absolute_and_lexical() {
        let paths = PathConfinement::unconfined();
        let cwd = Path::new("/home/user");
        let view = |path: &[u8]| paths.client_view(&paths.canonical(path, cwd).unwrap());

        assert_eq!(view(b"."), b"/home/user");
        assert_eq!(view(b""), b"/home/user");
        assert_eq!(view(b"/a/../b"), b"/b");
        assert_eq!(view(b"docs/./x/../y"), b"/home/user/docs/y");
        assert_eq!(view(b"../../../.."), b"/");
        assert_eq!(view(b"/.."), b"/");
    }

    #[test]
    fn confined_canonical_matches_resolve() {
        let paths = confined();
        let cwd = Path::new("/ignored");
        assert_eq!(
            paths.canonical(b"a/../b", cwd).unwrap(),
            paths.resolve(b"a/../b").unwrap()
        );
        assert_eq!(paths.client_view(&paths.canonical(b".", cwd).unwrap()), b"/");
    }

    #[test]
    fn client_view_hides_root() {
        let paths = confined();
        assert_eq!(paths.client_view(Path::new("/srv/root/a/b")), b"/a/b");
        assert_eq!(paths.client_view(Path::new("/srv/root")), b"/");
        assert_eq!(
            PathConfinement::unconfined().client_view(Path::new("/tmp/x")),
            b"/tmp/x"
        );
    }
}
