// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 snapname contributors

//! Filesystem mutation with conflict handling
//!
//! Either renames a file or replaces the destination with a symbolic link to
//! it. Rename mode never overwrites; link mode removes a stale destination
//! first. The remove-then-link step is not atomic: a crash between the two
//! calls leaves nothing at the destination.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Why a path was excluded before any mutation was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    IsSymlink,
    IsDirectory,
    UnsupportedType,
    NameUnchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::NotFound => "not found",
            SkipReason::IsSymlink => "is a symlink",
            SkipReason::IsDirectory => "is a directory",
            SkipReason::UnsupportedType => "unsupported extension",
            SkipReason::NameUnchanged => "name unchanged",
        };
        f.write_str(s)
    }
}

/// Why a mutation failed. The source file is untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailReason {
    DestinationExists(PathBuf),
    Io(String),
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed { from: PathBuf, to: PathBuf },
    Linked { source: PathBuf, link: PathBuf },
    Skipped { path: PathBuf, reason: SkipReason },
    Failed { path: PathBuf, reason: FailReason },
}

impl RenameOutcome {
    /// True for the two success variants.
    pub fn is_success(&self) -> bool {
        matches!(self, RenameOutcome::Renamed { .. } | RenameOutcome::Linked { .. })
    }
}

impl fmt::Display for RenameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenameOutcome::Renamed { from, to } => {
                let old = from.file_name().unwrap_or_default().to_string_lossy();
                let new = to.file_name().unwrap_or_default().to_string_lossy();
                write!(f, "*** mov ***: {} -> {}", old, new)
            }
            RenameOutcome::Linked { source, link } => {
                let old = source.file_name().unwrap_or_default().to_string_lossy();
                write!(f, "*** sym ***: {} -> {}", old, link.display())
            }
            RenameOutcome::Skipped { path, reason } => {
                write!(f, "*** skp ***: {}: {}", path.display(), reason)
            }
            RenameOutcome::Failed { path, reason } => match reason {
                FailReason::DestinationExists(dest) => {
                    write!(f, "*** err ***: {} exists, skipping {}", dest.display(), path.display())
                }
                FailReason::Io(msg) => write!(f, "*** err ***: {}: {}", path.display(), msg),
            },
        }
    }
}

/// Compute the destination path for a new filename.
///
/// With an output directory the file moves there; otherwise it stays next to
/// its source. The directory itself is created once per run in `main`.
pub fn destination(source: &Path, new_name: &str, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(new_name),
        None => source
            .parent()
            .map(|p| p.join(new_name))
            .unwrap_or_else(|| PathBuf::from(new_name)),
    }
}

/// Perform the mutation for one file.
///
/// Link mode replaces whatever sits at `dest` (file, directory entry or
/// dangling link) with a symlink to `source`. Rename mode refuses to touch an
/// existing destination. All failures are reported as outcomes; nothing
/// propagates.
pub fn apply(source: &Path, dest: &Path, link_mode: bool) -> RenameOutcome {
    // Destination equal to the source means no naming option changed the
    // name. In link mode the remove step would delete the source itself and
    // leave a dangling self-link, so this must be caught before any mutation.
    if source == dest {
        return RenameOutcome::Skipped {
            path: source.to_path_buf(),
            reason: SkipReason::NameUnchanged,
        };
    }

    // symlink_metadata: a dangling link still counts as occupying the slot
    let dest_occupied = std::fs::symlink_metadata(dest).is_ok();

    if link_mode {
        if dest_occupied {
            debug!("removing stale destination: {:?}", dest);
            if let Err(e) = std::fs::remove_file(dest) {
                return RenameOutcome::Failed {
                    path: source.to_path_buf(),
                    reason: FailReason::Io(e.to_string()),
                };
            }
        }
        match make_symlink(source, dest) {
            Ok(()) => RenameOutcome::Linked {
                source: source.to_path_buf(),
                link: dest.to_path_buf(),
            },
            Err(e) => RenameOutcome::Failed {
                path: source.to_path_buf(),
                reason: FailReason::Io(e.to_string()),
            },
        }
    } else {
        if dest_occupied {
            return RenameOutcome::Failed {
                path: source.to_path_buf(),
                reason: FailReason::DestinationExists(dest.to_path_buf()),
            };
        }
        match std::fs::rename(source, dest) {
            Ok(()) => RenameOutcome::Renamed {
                from: source.to_path_buf(),
                to: dest.to_path_buf(),
            },
            Err(e) => RenameOutcome::Failed {
                path: source.to_path_buf(),
                reason: FailReason::Io(e.to_string()),
            },
        }
    }
}

#[cfg(unix)]
fn make_symlink(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(windows)]
fn make_symlink(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(source, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn rename_moves_the_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, b"pixels").unwrap();
        let dest = dir.path().join("b.png");

        let outcome = apply(&src, &dest, false);
        assert!(matches!(outcome, RenameOutcome::Renamed { .. }));
        assert!(!src.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"pixels");
    }

    #[test]
    fn rename_never_overwrites() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, b"original").unwrap();
        let dest = dir.path().join("b.png");
        std::fs::write(&dest, b"already here").unwrap();

        let outcome = apply(&src, &dest, false);
        assert!(matches!(
            outcome,
            RenameOutcome::Failed { reason: FailReason::DestinationExists(_), .. }
        ));
        // source untouched, destination untouched
        assert_eq!(std::fs::read(&src).unwrap(), b"original");
        assert_eq!(std::fs::read(&dest).unwrap(), b"already here");
    }

    #[cfg(unix)]
    #[test]
    fn link_mode_creates_symlink_to_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, b"pixels").unwrap();
        let dest = dir.path().join("a_link.png");

        let outcome = apply(&src, &dest, true);
        assert!(matches!(outcome, RenameOutcome::Linked { .. }));
        assert_eq!(std::fs::read_link(&dest).unwrap(), src);
        assert_eq!(std::fs::read(&dest).unwrap(), b"pixels");
    }

    #[cfg(unix)]
    #[test]
    fn link_mode_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, b"pixels").unwrap();
        let dest = dir.path().join("taken.png");
        std::fs::write(&dest, b"old content").unwrap();

        let outcome = apply(&src, &dest, true);
        assert!(outcome.is_success());
        assert_eq!(std::fs::read_link(&dest).unwrap(), src);
    }

    #[cfg(unix)]
    #[test]
    fn link_mode_replaces_dangling_link() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, b"pixels").unwrap();
        let dest = dir.path().join("stale.png");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &dest).unwrap();

        let outcome = apply(&src, &dest, true);
        assert!(outcome.is_success());
        assert_eq!(std::fs::read_link(&dest).unwrap(), src);
    }

    #[cfg(unix)]
    #[test]
    fn link_mode_unchanged_name_leaves_source_intact() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, b"pixels").unwrap();

        // no naming options: destination equals the source itself
        let outcome = apply(&src, &src, true);
        assert_eq!(
            outcome,
            RenameOutcome::Skipped {
                path: src.clone(),
                reason: SkipReason::NameUnchanged,
            }
        );
        // content untouched, no self-link left behind
        assert_eq!(std::fs::read(&src).unwrap(), b"pixels");
        assert!(std::fs::read_link(&src).is_err());
    }

    #[test]
    fn rename_mode_unchanged_name_is_a_skip_not_an_error() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, b"pixels").unwrap();

        let outcome = apply(&src, &src, false);
        assert!(matches!(
            outcome,
            RenameOutcome::Skipped { reason: SkipReason::NameUnchanged, .. }
        ));
        assert_eq!(std::fs::read(&src).unwrap(), b"pixels");
    }

    #[test]
    fn destination_prefers_output_dir() {
        let src = Path::new("/photos/a.png");
        assert_eq!(
            destination(src, "new.png", Some(Path::new("/out"))),
            PathBuf::from("/out/new.png")
        );
        assert_eq!(destination(src, "new.png", None), PathBuf::from("/photos/new.png"));
    }
}
