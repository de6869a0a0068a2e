use std::collections::BTreeMap;
use std::path::Path;

use axum::{
    Json,
    body::Body,
    extract::{Path as UrlPath, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;
use walkdir::WalkDir;

use crate::AppState;
use crate::content_type::{download_content_type, inline_content_type};
use crate::error::FileServerError;
use crate::paths::{ServedFile, resolve_file};

/// Immediate subdirectory name -> entries directly inside it
pub type Structure = BTreeMap<String, Vec<String>>;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub root_exists: bool,
    pub root_path: String,
}

#[derive(Debug, Clone, Copy)]
enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    fn header_value(self, file_name: &str) -> String {
        let kind = match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        format!("{}; filename=\"{}\"", kind, file_name.replace('"', "'"))
    }
}

/// Stream a resolved file without buffering it in memory.
async fn stream_file(
    file: ServedFile,
    content_type: String,
    disposition: Disposition,
) -> Result<Response, FileServerError> {
    let handle = fs::File::open(&file.path).await?;
    let body = Body::from_stream(ReaderStream::new(handle));

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_LENGTH, file.size.to_string()),
            (header::CONTENT_DISPOSITION, disposition.header_value(&file.name)),
        ],
        body,
    )
        .into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/files/{*path} - Stream a file for inline preview
pub async fn get_file(
    State(state): State<AppState>,
    UrlPath(requested): UrlPath<String>,
) -> Result<Response, FileServerError> {
    debug!("Requested file: {}", requested);

    let file = resolve_file(&state.root_dir, &requested).await?;
    let content_type = inline_content_type(Path::new(&file.name));

    debug!("Serving file: {} Type: {}", file.path.display(), content_type);
    stream_file(file, content_type.to_string(), Disposition::Inline).await
}

/// GET /api/download/{*path} - Stream a file as an attachment
pub async fn download_file(
    State(state): State<AppState>,
    UrlPath(requested): UrlPath<String>,
) -> Result<Response, FileServerError> {
    let file = resolve_file(&state.root_dir, &requested).await?;
    let content_type = download_content_type(Path::new(&file.name));

    debug!("Downloading file: {}", file.path.display());
    stream_file(file, content_type, Disposition::Attachment).await
}

/// GET /api/debug/structure - List the root's subdirectories and their entries
pub async fn debug_structure(
    State(state): State<AppState>,
) -> Result<Json<Structure>, FileServerError> {
    let root = state.root_dir.clone();
    let include_dirs = state.config.structure_include_dirs;

    let structure = tokio::task::spawn_blocking(move || list_structure(&root, include_dirs))
        .await
        .map_err(|e| FileServerError::Io(std::io::Error::other(e)))??;

    Ok(Json(structure))
}

/// Walk two levels below `root`, following symlinks whose targets stay
/// inside the root. Links that leave the root are left out, matching the
/// file endpoints. Dangling links and link loops below the root are skipped.
///
/// Top-level files are skipped. Second-level directories are skipped unless
/// `include_dirs` is set.
pub fn list_structure(root: &Path, include_dirs: bool) -> Result<Structure, FileServerError> {
    let canonical_root = root.canonicalize()?;
    let mut structure = Structure::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !e.path_is_symlink() || link_within_root(e.path(), &canonical_root));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 && is_broken_link(&err) => {
                debug!("Skipping unreadable link in structure view: {}", err);
                continue;
            }
            Err(err) => return Err(std::io::Error::from(err).into()),
        };

        // follow_links: file_type() describes the link target
        let is_dir = entry.file_type().is_dir();
        let name = entry.file_name().to_string_lossy().to_string();

        if entry.depth() == 1 {
            if is_dir {
                structure.entry(name).or_default();
            }
            continue;
        }

        if is_dir && !include_dirs {
            continue;
        }

        let Some(folder) = entry
            .path()
            .parent()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
        else {
            continue;
        };
        structure.entry(folder).or_default().push(name);
    }

    Ok(structure)
}

fn link_within_root(path: &Path, canonical_root: &Path) -> bool {
    match path.canonicalize() {
        Ok(target) => target.starts_with(canonical_root),
        Err(_) => false,
    }
}

fn is_broken_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

/// GET /api/health - Report whether the root directory exists
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let root_exists = fs::metadata(&state.root_dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    Json(HealthResponse {
        status: "ok",
        root_exists,
        root_path: state.root_dir.display().to_string(),
    })
}
