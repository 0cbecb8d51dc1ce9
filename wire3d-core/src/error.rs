/// Errors raised while loading a shape description
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure to produce a [`Shape`](crate::Shape) from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file is missing or unreadable.
    #[error("failed to open shape file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The path does not carry the expected `.csv` extension.
    #[error("shape file {} must have a .csv extension", path.display())]
    Extension { path: PathBuf },
}

/// A bounded container refused a push because it is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("capacity of {capacity} exceeded")]
pub struct CapacityExceeded {
    pub capacity: usize,
}
