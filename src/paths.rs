//! Confinement of request paths to the root directory.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::error::FileServerError;

/// A regular file inside the root that is ready to be streamed.
#[derive(Debug)]
pub struct ServedFile {
    /// Canonical location on disk
    pub path: PathBuf,
    /// File name as requested, used for Content-Disposition
    pub name: String,
    /// Size in bytes
    pub size: u64,
}

/// Lexically normalize a path: drop `.` segments and resolve `..` against
/// the preceding segment. Never touches the filesystem.
///
/// A `..` at the filesystem root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
        }
    }
    out
}

/// Join `requested` onto `root` and reject the result if it leaves the root.
///
/// A leading `/` in `requested` is relative to the root. `..` segments are
/// allowed as long as the normalized result stays inside the root. The
/// containment test compares whole path segments, so a root of `/a/b` does
/// not admit `/a/bc`.
pub fn confine(root: &Path, requested: &str) -> Result<PathBuf, FileServerError> {
    if requested.contains('\0') {
        warn!("Path contains null byte: {:?}", requested);
        return Err(FileServerError::PathTraversal);
    }

    let root = normalize(root);
    let resolved = normalize(&root.join(requested.trim_start_matches('/')));

    if !resolved.starts_with(&root) {
        warn!(
            "Path traversal attempt: {:?} resolved to {:?} outside {:?}",
            requested, resolved, root
        );
        return Err(FileServerError::PathTraversal);
    }

    Ok(resolved)
}

/// Confine `requested`, then require that it names an existing regular file
/// whose canonical location is still inside the canonical root.
pub async fn resolve_file(root: &Path, requested: &str) -> Result<ServedFile, FileServerError> {
    let resolved = confine(root, requested)?;

    let metadata = fs::metadata(&resolved)
        .await
        .map_err(|e| FileServerError::from_io(e, requested))?;

    let canonical_root = fs::canonicalize(root).await?;
    let canonical_path = fs::canonicalize(&resolved)
        .await
        .map_err(|e| FileServerError::from_io(e, requested))?;

    if !canonical_path.starts_with(&canonical_root) {
        warn!(
            "Symlink escape attempt: {:?} resolved to {:?} which is outside {:?}",
            resolved, canonical_path, canonical_root
        );
        return Err(FileServerError::PathTraversal);
    }

    if !metadata.is_file() {
        return Err(FileServerError::NotAFile);
    }

    let name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(ServedFile {
        path: canonical_path,
        name,
        size: metadata.len(),
    })
}
