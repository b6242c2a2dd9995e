//! Square RGB raster built straight from the input bytes.
//!
//! Every three input bytes become one pixel. Each scanline starts with a
//! filter byte of `0` (PNG filter type None), followed by `width` RGB
//! pixels. Capacity beyond the input is zero-filled.

use crate::error::EncodeError;

/// Bytes consumed by one truecolor pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Largest width/height a PNG header may declare (2^31 - 1).
pub const MAX_SIDE: u32 = 0x7FFF_FFFF;

/// How the packer decides that input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillMode {
    /// Once a pixel's blue channel falls past the end of the input, every
    /// remaining pixel in the raster is written as zero.
    ///
    /// Input offsets only grow as the raster is filled, so the latch never
    /// hides a byte that would otherwise be in bounds.
    #[default]
    Latched,
    /// Each channel is bounds-checked on its own.
    PerPixel,
}

/// Side length of the smallest square that holds `len` bytes as RGB pixels.
///
/// `ceil(sqrt(ceil(len / 3)))`, computed in integers so large inputs are exact.
pub fn side_for_len(len: usize) -> u64 {
    let pixels = (len as u64).div_ceil(BYTES_PER_PIXEL as u64);
    ceil_sqrt(pixels)
}

fn ceil_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut s = (n as f64).sqrt() as u64;
    while s.checked_mul(s).map_or(true, |sq| sq > n) {
        s -= 1;
    }
    while s.checked_mul(s).is_some_and(|sq| sq < n) {
        s += 1;
    }
    s
}

/// Filtered scanline buffer ready for zlib compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    side: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Derives the side from `input.len()` and packs the input into scanlines.
    pub fn from_bytes(input: &[u8], mode: FillMode) -> Result<Raster, EncodeError> {
        let side = side_for_len(input.len());
        let side = u32::try_from(side)
            .ok()
            .filter(|&s| s <= MAX_SIDE)
            .ok_or(EncodeError::DimensionTooLarge {
                side,
                max: MAX_SIDE,
            })?;
        Ok(Raster::pack(input, side, mode))
    }

    /// Packs `input` into a `side` x `side` raster.
    ///
    /// Input longer than the raster's capacity is truncated; shorter input
    /// leaves the tail zeroed.
    pub fn pack(input: &[u8], side: u32, mode: FillMode) -> Raster {
        let width = side as usize;
        let row_len = Raster::row_len(side);
        let mut data = vec![0u8; row_len * width];

        let mut exhausted = false;
        for (i, row) in data.chunks_exact_mut(row_len).enumerate() {
            row[0] = 0; // filter type None
            for (j, pixel) in row[1..].chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                if exhausted {
                    continue;
                }
                let offset = BYTES_PER_PIXEL * (i * width + j);
                for (channel, out) in pixel.iter_mut().enumerate() {
                    if let Some(&byte) = input.get(offset + channel) {
                        *out = byte;
                    }
                }
                if mode == FillMode::Latched && offset + 2 >= input.len() {
                    exhausted = true;
                }
            }
        }

        Raster { side, data }
    }

    /// Bytes in one scanline: the filter byte plus three bytes per pixel.
    pub fn row_len(side: u32) -> usize {
        BYTES_PER_PIXEL * side as usize + 1
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(Raster::row_len(self.side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn side_boundaries() {
        assert_eq!(side_for_len(0), 0);
        assert_eq!(side_for_len(1), 1);
        assert_eq!(side_for_len(3), 1);
        assert_eq!(side_for_len(4), 2);
        assert_eq!(side_for_len(12), 2);
        assert_eq!(side_for_len(13), 3);
        assert_eq!(side_for_len(27), 3);
        assert_eq!(side_for_len(28), 4);
    }

    #[test]
    fn side_is_smallest_square_that_fits() {
        for len in 0..2000usize {
            let s = side_for_len(len) as usize;
            assert!(s * s * 3 >= len, "len {len}: side {s} too small");
            if s > 0 {
                assert!((s - 1) * (s - 1) * 3 < len, "len {len}: side {s} not minimal");
            }
        }
    }

    #[test]
    fn ceil_sqrt_is_exact_for_large_values() {
        let root = 3_000_000_000u64;
        assert_eq!(ceil_sqrt(root * root), root);
        assert_eq!(ceil_sqrt(root * root + 1), root + 1);
        assert_eq!(ceil_sqrt(root * root - 1), root);
        assert_eq!(ceil_sqrt(u64::MAX), 1u64 << 32);
    }

    #[test]
    fn single_pixel() {
        let raster = Raster::from_bytes(&[10, 20, 30], FillMode::Latched).unwrap();
        assert_eq!(raster.side(), 1);
        assert_eq!(raster.as_bytes(), &[0, 10, 20, 30]);
    }

    #[test]
    fn empty_input_gives_empty_raster() {
        let raster = Raster::from_bytes(&[], FillMode::Latched).unwrap();
        assert_eq!(raster.side(), 0);
        assert!(raster.as_bytes().is_empty());
        assert_eq!(raster.rows().count(), 0);
    }

    #[test]
    fn partial_pixel_straddling_a_row_boundary() {
        // Seven bytes: side 2, the third pixel starts row 1 with one real byte.
        let input = [1, 2, 3, 4, 5, 6, 7];
        let raster = Raster::from_bytes(&input, FillMode::Latched).unwrap();
        assert_eq!(raster.side(), 2);
        assert_eq!(
            raster.as_bytes(),
            &[
                0, 1, 2, 3, 4, 5, 6, //
                0, 7, 0, 0, 0, 0, 0,
            ]
        );
    }

    #[test]
    fn latch_trips_on_first_pixel_past_the_end() {
        // Six bytes fill two pixels exactly; the third pixel reads nothing and
        // sets the latch, so row 1 stays zero.
        let input = [9, 9, 9, 8, 8, 8];
        let raster = Raster::from_bytes(&input, FillMode::Latched).unwrap();
        assert_eq!(
            raster.as_bytes(),
            &[
                0, 9, 9, 9, 8, 8, 8, //
                0, 0, 0, 0, 0, 0, 0,
            ]
        );
    }

    #[test]
    fn fill_modes_agree() {
        for len in 0..200usize {
            let input: Vec<u8> = (0..len).map(|i| (i * 7 + 1) as u8).collect();
            let latched = Raster::from_bytes(&input, FillMode::Latched).unwrap();
            let per_pixel = Raster::from_bytes(&input, FillMode::PerPixel).unwrap();
            assert_eq!(latched, per_pixel, "len {len}");
        }
    }

    #[test]
    fn pack_truncates_input_longer_than_capacity() {
        let input: Vec<u8> = (1..=20).collect();
        let raster = Raster::pack(&input, 2, FillMode::Latched);
        assert_eq!(
            raster.as_bytes(),
            &[
                0, 1, 2, 3, 4, 5, 6, //
                0, 7, 8, 9, 10, 11, 12,
            ]
        );
    }

    #[test]
    fn every_row_starts_with_filter_none() {
        let input = vec![0xFFu8; 100];
        let raster = Raster::from_bytes(&input, FillMode::Latched).unwrap();
        let side = raster.side() as usize;
        assert_eq!(raster.as_bytes().len(), (3 * side + 1) * side);
        for row in raster.rows() {
            assert_eq!(row[0], 0);
        }
    }
}
