use axum::http::StatusCode;
use std::{fmt, path::PathBuf};
use thiserror::Error;

/// CSV table and line a bad value came from, when it came from a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowRef(pub Option<(&'static str, u64)>);

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some((table, line)) => write!(f, " ({table} table line {line})"),
            None => Ok(()),
        }
    }
}

/// Problems with the input tables or with a metric that has nothing to work on.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("unknown {field} code {code}{row}")]
    UnknownCategoryCode {
        field: &'static str,
        code: i64,
        row: RowRef,
    },

    #[error("hour {hour} is outside 0-23{row}")]
    HourOutOfRange { hour: i64, row: RowRef },

    #[error("{table} table line {line}: cnt {cnt} != casual {casual} + registered {registered}")]
    CountMismatch {
        table: &'static str,
        line: u64,
        casual: u64,
        registered: u64,
        cnt: u64,
    },

    #[error("no data for {0}")]
    EmptyInput(&'static str),

    #[error("failed to parse csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    /// Attaches the CSV location to errors raised while checking a single value.
    pub fn at(self, table: &'static str, line: u64) -> Self {
        let row = RowRef(Some((table, line)));
        match self {
            DataError::UnknownCategoryCode { field, code, .. } => {
                DataError::UnknownCategoryCode { field, code, row }
            }
            DataError::HourOutOfRange { hour, .. } => DataError::HourOutOfRange { hour, row },
            other => other,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<DataError> for AppError {
    fn from(err: DataError) -> Self {
        tracing::error!("dashboard computation failed: {err}");
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
