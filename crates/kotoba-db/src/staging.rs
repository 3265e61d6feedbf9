//! Build isolation: a pid-tagged build lock and a staging store file.
//!
//! A build writes into `<target>.<pid>.tmp` and only renames it over the
//! published store once everything succeeded. Both guards clean up on drop,
//! which covers error unwinding as well as a cancelled build future.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from acquiring or publishing a build.
#[derive(Debug, Error)]
pub enum StagingError {
    /// Another live process holds the build lock.
    #[error("a build is already running (pid {pid}); lock at {}", lock.display())]
    AlreadyRunning { pid: i32, lock: PathBuf },

    /// The lock file exists but its owner cannot be determined.
    #[error("could not read build lock at {}; remove it if no build is running", .0.display())]
    LockUnreadable(PathBuf),

    #[error("staging I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Path of the build lock for a published store.
#[must_use]
pub fn lock_path(target: &Path) -> PathBuf {
    sibling(target, "lock")
}

/// Path of the staging store a process with `pid` builds into.
#[must_use]
pub fn staging_path(target: &Path, pid: u32) -> PathBuf {
    sibling(target, &format!("{pid}.tmp"))
}

fn sibling(target: &Path, suffix: &str) -> PathBuf {
    let name = target
        .file_name()
        .map_or_else(|| "store".into(), |n| n.to_string_lossy().into_owned());
    target.with_file_name(format!("{name}.{suffix}"))
}

/// Remove a store file together with its SQLite side files.
fn remove_store_files(path: &Path) {
    let _ = std::fs::remove_file(path);
    for suffix in ["-journal", "-wal", "-shm"] {
        let mut side = path.as_os_str().to_owned();
        side.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(side));
    }
}

// ---------------------------------------------------------------------------
// Build lock
// ---------------------------------------------------------------------------

/// Exclusive right to build a given target. Released on drop.
#[derive(Debug)]
pub struct BuildLock {
    path: PathBuf,
}

#[derive(Debug)]
enum LockState {
    HeldBy(i32),
    Stale(i32),
    Unknown,
}

impl BuildLock {
    /// Take the build lock for `target`.
    ///
    /// A lock left by a process that is no longer alive is removed together
    /// with that process's staging store.
    ///
    /// # Errors
    ///
    /// `StagingError::AlreadyRunning` when a live process holds the lock,
    /// `StagingError::LockUnreadable` when the lock content is not a pid.
    pub fn acquire(target: &Path) -> Result<Self, StagingError> {
        let lock_path = lock_path(target);
        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        match try_acquire(&lock_path) {
            Ok(lock) => Ok(lock),
            Err(LockState::HeldBy(pid)) => Err(StagingError::AlreadyRunning {
                pid,
                lock: lock_path,
            }),
            Err(LockState::Stale(pid)) => {
                tracing::warn!(pid, lock = %lock_path.display(), "removing stale build artifacts");
                if let Ok(stale_pid) = u32::try_from(pid) {
                    remove_store_files(&staging_path(target, stale_pid));
                }
                let _ = std::fs::remove_file(&lock_path);
                try_acquire(&lock_path).map_err(|state| match state {
                    LockState::HeldBy(pid) => StagingError::AlreadyRunning {
                        pid,
                        lock: lock_path.clone(),
                    },
                    LockState::Stale(_) | LockState::Unknown => {
                        StagingError::LockUnreadable(lock_path.clone())
                    }
                })
            }
            Err(LockState::Unknown) => Err(StagingError::LockUnreadable(lock_path)),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BuildLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn try_acquire(lock_path: &Path) -> Result<BuildLock, LockState> {
    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let pid = std::process::id();
            let _ = writeln!(file, "{pid}");
            Ok(BuildLock {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match pid_buf.trim().parse::<i32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(pid) => Err(LockState::Stale(pid)),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: i32) -> bool {
    if u32::try_from(pid).is_ok_and(|pid| pid == std::process::id()) {
        return true;
    }
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Staging store
// ---------------------------------------------------------------------------

/// A store file under construction. Deleted on drop unless published.
#[derive(Debug)]
pub struct StagingStore {
    staging: PathBuf,
    target: PathBuf,
    published: bool,
}

impl StagingStore {
    /// Reserve a fresh staging path for `target`, clearing leftovers.
    ///
    /// # Errors
    ///
    /// Returns `StagingError::Io` if the target directory cannot be created.
    pub fn new(target: &Path) -> Result<Self, StagingError> {
        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let staging = staging_path(target, std::process::id());
        remove_store_files(&staging);
        Ok(Self {
            staging,
            target: target.to_path_buf(),
            published: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.staging
    }

    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Atomically replace the published store with the staging store.
    ///
    /// Every handle on the staging store must be closed first.
    ///
    /// # Errors
    ///
    /// Returns `StagingError::Io` if the rename fails; the staging file is
    /// then removed and the published store is untouched.
    pub fn publish(mut self) -> Result<PathBuf, StagingError> {
        std::fs::rename(&self.staging, &self.target)?;
        self.published = true;
        tracing::info!(store = %self.target.display(), "store published");
        Ok(self.target.clone())
    }
}

impl Drop for StagingStore {
    fn drop(&mut self) {
        if !self.published {
            tracing::debug!(staging = %self.staging.display(), "discarding staging store");
            remove_store_files(&self.staging);
        }
    }
}
