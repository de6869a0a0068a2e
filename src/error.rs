use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileServerError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Access denied: path is outside root directory")]
    PathTraversal,

    #[error("Not a file")]
    NotAFile,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl FileServerError {
    /// Map a failed stat/open on `path` to `NotFound` or an internal error.
    pub fn from_io(err: std::io::Error, path: &str) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            FileServerError::NotFound(path.to_string())
        } else {
            FileServerError::Io(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            FileServerError::NotFound(_) => StatusCode::NOT_FOUND,
            FileServerError::PathTraversal => StatusCode::FORBIDDEN,
            FileServerError::NotAFile => StatusCode::BAD_REQUEST,
            FileServerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            FileServerError::NotFound(_) => "NOT_FOUND",
            FileServerError::PathTraversal => "PATH_TRAVERSAL",
            FileServerError::NotAFile => "NOT_A_FILE",
            FileServerError::Io(_) => "IO_ERROR",
        }
    }
}

impl IntoResponse for FileServerError {
    fn into_response(self) -> Response {
        if let FileServerError::Io(err) = &self {
            tracing::error!("Internal error while serving request: {}", err);
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        };

        (self.status(), Json(body)).into_response()
    }
}
