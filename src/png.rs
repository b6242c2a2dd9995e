//! Chunk construction and final file assembly.

use std::io::Write;

use libflate::zlib::Encoder;
use log::debug;

use crate::chunk::Chunk;
use crate::error::EncodeError;
use crate::raster::Raster;

/// The eight bytes every PNG file starts with.
pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

pub const IHDR: &[u8; 4] = b"IHDR";
pub const IDAT: &[u8; 4] = b"IDAT";
pub const IEND: &[u8; 4] = b"IEND";

/// Bits per channel.
pub const BIT_DEPTH: u8 = 8;
/// PNG colour type 2: truecolor RGB without alpha.
pub const COLOUR_TYPE_RGB: u8 = 2;

/// Header chunk for a `width` x `height` 8-bit RGB image, no interlacing.
pub fn ihdr(width: u32, height: u32) -> Result<Chunk, EncodeError> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.extend_from_slice(&[
        BIT_DEPTH,
        COLOUR_TYPE_RGB,
        0, // Type 0 compression
        0, // Type 0 filtering
        0, // No interlacing
    ]);
    Chunk::from_data(IHDR, data)
}

/// Pixel-data chunk holding the zlib-compressed raster.
pub fn idat(raster: &Raster) -> Result<Chunk, EncodeError> {
    let compressed = compress(raster.as_bytes())?;
    debug!(
        "Compressed {} raster bytes into {} bytes",
        raster.as_bytes().len(),
        compressed.len()
    );
    Chunk::from_data(IDAT, compressed)
}

pub fn iend() -> Result<Chunk, EncodeError> {
    Chunk::from_data(IEND, Vec::new())
}

/// One complete zlib stream at libflate's default settings.
fn compress(data: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new(Vec::new())?;
    encoder.write_all(data)?;
    Ok(encoder.finish().into_result()?)
}

/// A finished image: its three chunks in file order, plus the square side.
#[derive(Debug, Clone)]
pub struct EncodedPng {
    side: u32,
    ihdr: Chunk,
    idat: Chunk,
    iend: Chunk,
}

impl EncodedPng {
    /// Builds all three chunks for `raster`.
    pub fn from_raster(raster: &Raster) -> Result<EncodedPng, EncodeError> {
        let side = raster.side();
        let png = EncodedPng {
            side,
            ihdr: ihdr(side, side)?,
            idat: idat(raster)?,
            iend: iend()?,
        };
        for chunk in png.chunks() {
            debug!(
                "{} chunk: {} bytes, crc {:08x}",
                String::from_utf8_lossy(chunk.tag()),
                chunk.len(),
                chunk.crc_value()
            );
        }
        Ok(png)
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// IHDR, IDAT, IEND, in the only order PNG allows.
    pub fn chunks(&self) -> [&Chunk; 3] {
        [&self.ihdr, &self.idat, &self.iend]
    }

    pub fn ihdr(&self) -> &Chunk {
        &self.ihdr
    }

    pub fn idat(&self) -> &Chunk {
        &self.idat
    }

    pub fn iend(&self) -> &Chunk {
        &self.iend
    }

    /// Total size of the serialized file.
    pub fn byte_len(&self) -> usize {
        SIGNATURE.len()
            + self
                .chunks()
                .iter()
                .map(|chunk| chunk.serialized_len())
                .sum::<usize>()
    }

    /// Signature followed by every chunk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        out.extend_from_slice(&SIGNATURE);
        for chunk in self.chunks() {
            chunk.write_to(&mut out);
        }
        out
    }
}
