// # Log Directory
//
// Creates the log directory on first run and hands it back to the invoking
// user when the program was started through `sudo`.
//
// The directory is opened up to everyone (`0o777`) because programs of the
// suite run both elevated and unprivileged against the same directory.

use std::env;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Identity of the user who ran `sudo`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvokingUser {
    pub uid: u32,
    /// Left unchanged on chown when `None`
    pub gid: Option<u32>,
}

impl InvokingUser {
    /// Read `SUDO_UID` / `SUDO_GID` from the environment
    pub fn from_env() -> Option<Self> {
        Self::from_vars(
            env::var("SUDO_UID").ok().as_deref(),
            env::var("SUDO_GID").ok().as_deref(),
        )
    }

    /// Parse an identity from raw variable values
    ///
    /// Returns `None` when the uid is absent or not a number.
    pub fn from_vars(uid: Option<&str>, gid: Option<&str>) -> Option<Self> {
        let uid = uid?.trim().parse().ok()?;
        let gid = gid.and_then(|g| g.trim().parse().ok());
        Some(Self { uid, gid })
    }
}

/// Make sure `dir` exists
///
/// Returns `true` when this call created it. An existing directory, including
/// one created concurrently by another process, is not an error.
///
/// # Errors
///
/// `BootstrapFailure` when creation fails for any reason other than the
/// directory already existing, or when ownership correction fails.
pub fn ensure_log_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }

    match create_dir(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && dir.is_dir() => {
            return Ok(false);
        }
        Err(e) => return Err(Error::bootstrap_io(dir, e)),
    }

    fix_ownership(dir)?;
    Ok(true)
}

#[cfg(unix)]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new().recursive(true).mode(0o777).create(dir)?;
    // mode() is narrowed by the umask
    fs::set_permissions(dir, fs::Permissions::from_mode(0o777))
}

#[cfg(not(unix))]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

/// Hand `path` to the `sudo` invoker
///
/// Does nothing unless the process runs as root and the invoker's uid is
/// known from the environment.
pub fn fix_ownership(path: &Path) -> Result<()> {
    #[cfg(unix)]
    fix_ownership_as(
        path,
        nix::unistd::Uid::effective().is_root(),
        InvokingUser::from_env(),
    )?;

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}

/// Ownership correction for an explicit privilege state and identity
///
/// Returns `true` when `path` was handed over.
#[cfg(unix)]
pub fn fix_ownership_as(path: &Path, elevated: bool, user: Option<InvokingUser>) -> Result<bool> {
    if !elevated {
        return Ok(false);
    }

    let Some(user) = user else {
        tracing::debug!("No SUDO_UID in environment, keeping owner of {}", path.display());
        return Ok(false);
    };

    std::os::unix::fs::chown(path, Some(user.uid), user.gid)
        .map_err(|e| Error::bootstrap_io(path, e))?;
    Ok(true)
}
