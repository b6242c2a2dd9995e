//! Turns arbitrary bytes into a square 8-bit RGB PNG whose pixels are those bytes.
//!
//! ```no_run
//! let png = bin2png::encode(b"hello", bin2png::FillMode::default()).unwrap();
//! assert_eq!(&png[..8], &bin2png::SIGNATURE);
//! ```

pub mod chunk;
pub mod error;
pub mod hexdump;
pub mod output;
pub mod png;
pub mod raster;

use log::{info, warn};

pub use crate::chunk::Chunk;
pub use crate::error::{EncodeError, OutputError};
pub use crate::png::{EncodedPng, SIGNATURE};
pub use crate::raster::{side_for_len, FillMode, Raster};

/// Packs `input` into a raster and builds the IHDR, IDAT and IEND chunks.
pub fn encode_image(input: &[u8], mode: FillMode) -> Result<EncodedPng, EncodeError> {
    let raster = Raster::from_bytes(input, mode)?;
    info!(
        "Encoding {} bytes as a {}x{} image ({:?} fill)",
        input.len(),
        raster.side(),
        raster.side(),
        mode
    );
    if input.is_empty() {
        warn!("Input is empty, producing a 0x0 image");
    }
    EncodedPng::from_raster(&raster)
}

/// Encodes `input` into the complete PNG byte stream.
pub fn encode(input: &[u8], mode: FillMode) -> Result<Vec<u8>, EncodeError> {
    Ok(encode_image(input, mode)?.to_bytes())
}
