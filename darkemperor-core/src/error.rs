//! Error type for map setup and data loading
//!
//! Map queries and the pathfinder never fail: they return sentinels
//! (`-1`, `false`, an empty path). Only building or loading data does.

use std::path::PathBuf;

use thiserror::Error;

use crate::point::Point;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("point {0} is outside the map")]
    OutOfBounds(Point),

    #[error("{field} at {point} must not be negative, got {value}")]
    NegativeValue {
        field: &'static str,
        point: Point,
        value: i32,
    },

    #[error("invalid terrain rules: {0}")]
    InvalidRules(String),

    #[error("unknown orientation '{0}' (expected flat or pointy)")]
    UnknownOrientation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Read a file to a string, attaching the path to any failure
pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
