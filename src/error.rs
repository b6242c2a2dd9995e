use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while turning raw bytes into a PNG byte stream.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The zlib compressor failed to accept the raster or to finish its stream.
    #[error("Compression of pixel data failed: {0}")]
    Compression(#[from] io::Error),

    /// The derived square side does not fit in a PNG header.
    #[error("Image side {side} exceeds the PNG maximum of {max}")]
    DimensionTooLarge {
        /// Side length derived from the input size.
        side: u64,
        /// Largest width/height a PNG header can carry.
        max: u32,
    },

    /// Chunk data longer than a 32-bit length field can describe.
    #[error("Chunk data of {len} bytes does not fit a 32-bit length field")]
    ChunkTooLarge { len: usize },
}

/// Errors raised while writing the finished PNG to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Cannot create temporary file next to {path}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("Cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Cannot move finished image into {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
}
