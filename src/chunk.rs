use std::fmt::Debug;

use crate::error::EncodeError;
use crate::hexdump;

/// One PNG chunk: length, 4-byte tag, data and the CRC over tag + data.
///
/// The only constructor is [`Chunk::from_data`], so the CRC always matches
/// the tag and data it was computed from.
#[derive(Clone, PartialEq, Eq)]
pub struct Chunk {
    size: u32,
    tag: [u8; 4],
    data: Vec<u8>,
    crc: u32,
}

impl Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dump = hexdump::format(&self.data);
        write!(
            f,
            "Chunk {{
    Size:\t {}
    Tag:\t\"{}\"
    Data:\t{}
    CRC:\t{:08X}
}}",
            self.size,
            String::from_utf8_lossy(&self.tag),
            dump.trim_end().replace('\n', "\n\t\t"),
            self.crc
        )
    }
}

impl Chunk {
    /// CRC-32 (IEEE) over `tag ++ data`, as PNG stores it after every chunk.
    pub fn crc(tag: &[u8; 4], data: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(tag);
        hasher.update(data);
        hasher.finalize()
    }

    /// Builds a chunk, taking ownership of `data` and computing its CRC.
    ///
    /// Fails only when `data` is longer than a 32-bit length field can describe.
    pub fn from_data(tag: &[u8; 4], data: Vec<u8>) -> Result<Chunk, EncodeError> {
        let size = u32::try_from(data.len())
            .map_err(|_| EncodeError::ChunkTooLarge { len: data.len() })?;
        let crc = Chunk::crc(tag, &data);
        Ok(Chunk {
            size,
            tag: *tag,
            data,
            crc,
        })
    }

    pub fn check_crc(&self) -> bool {
        Chunk::crc(&self.tag, &self.data) == self.crc
    }

    /// Byte count of the data field alone.
    pub fn len(&self) -> u32 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn tag(&self) -> &[u8; 4] {
        &self.tag
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn crc_value(&self) -> u32 {
        self.crc
    }

    /// Length of the chunk once serialized: length + tag + data + CRC.
    pub fn serialized_len(&self) -> usize {
        self.size as usize + 12
    }

    /// Appends the serialized chunk to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.serialized_len());
        out.extend_from_slice(&self.size.to_be_bytes());
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.data);
        out.extend_from_slice(&self.crc.to_be_bytes());
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.serialized_len());
        self.write_to(&mut res);
        res
    }
}
