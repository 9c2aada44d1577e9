// ============================================================================
// ico.rs — ICO container encoder
// ============================================================================
//
// Layout written by `IconContainer::encode`:
//
//   ICONDIR        6 bytes   reserved(u16)=0, type(u16)=1, count(u16)
//   ICONDIRENTRY  16 bytes   per image, in insertion order
//   image data               concatenated, in the same order
//
// Every multi-byte field is little-endian.
// ============================================================================

use std::collections::HashSet;
use std::io::Write;

use crate::error::{IcoError, Result};

pub const HEADER_LEN: usize = 6;
pub const DIR_ENTRY_LEN: usize = 16;
pub const MAX_SIZE: u32 = 256;

const RESOURCE_TYPE_ICON: u16 = 1;
const COLOR_PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

// ---------------------------------------------------------------------------
// Images and the container
// ---------------------------------------------------------------------------

/// One square raster (usually PNG bytes) at a fixed side length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    size: u32,
    data: Vec<u8>,
}

impl IconImage {
    /// Fails with `InvalidSize` unless `size` is in 1..=256.
    pub fn new(size: u32, data: Vec<u8>) -> Result<Self> {
        if size == 0 || size > MAX_SIZE {
            return Err(IcoError::InvalidSize { size });
        }
        Ok(Self { size, data })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }

    /// Width/height byte as stored in the directory (256 is written as 0).
    pub fn dimension_byte(&self) -> u8 {
        if self.size == MAX_SIZE {
            0
        } else {
            self.size as u8
        }
    }
}

/// Ordered set of icon images, unique by side length.
#[derive(Debug, Clone, Default)]
pub struct IconContainer {
    images: Vec<IconImage>,
    seen: HashSet<u32>,
}

impl IconContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an image; its position in the file follows insertion order.
    pub fn push(&mut self, image: IconImage) -> Result<()> {
        if !self.seen.insert(image.size) {
            return Err(IcoError::DuplicateSize { size: image.size });
        }
        self.images.push(image);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[IconImage] {
        &self.images
    }

    pub fn sizes(&self) -> Vec<u32> {
        self.images.iter().map(|i| i.size).collect()
    }

    /// Offset of the first image: header plus the whole directory.
    pub fn data_start(&self) -> usize {
        HEADER_LEN + DIR_ENTRY_LEN * self.images.len()
    }

    pub fn encoded_len(&self) -> usize {
        self.data_start() + self.images.iter().map(|i| i.byte_len()).sum::<usize>()
    }

    /// Serializes the container into a complete ICO file.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.images.is_empty() {
            return Err(IcoError::Empty);
        }
        let count = u16::try_from(self.images.len()).map_err(|_| {
            IcoError::TooLarge(format!("{} images exceed the 16-bit entry count", self.images.len()))
        })?;
        let total = self.encoded_len();
        if u32::try_from(total).is_err() {
            return Err(IcoError::TooLarge(format!(
                "{} bytes exceed the 32-bit offset range",
                total
            )));
        }

        let mut buf = Vec::with_capacity(total);

        // --- ICONDIR ---
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&RESOURCE_TYPE_ICON.to_le_bytes());
        buf.extend_from_slice(&count.to_le_bytes());

        // --- ICONDIRENTRY, offsets accumulate from the end of the directory ---
        let mut offset = self.data_start() as u32;
        for image in &self.images {
            let len = image.byte_len() as u32;
            let dim = image.dimension_byte();
            buf.push(dim); // width
            buf.push(dim); // height
            buf.push(0); // palette
            buf.push(0); // reserved
            buf.extend_from_slice(&COLOR_PLANES.to_le_bytes());
            buf.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
            buf.extend_from_slice(&len.to_le_bytes());
            buf.extend_from_slice(&offset.to_le_bytes());
            offset += len;
        }

        // --- Image data ---
        for image in &self.images {
            buf.extend_from_slice(&image.data);
        }

        debug_assert_eq!(buf.len(), total);
        Ok(buf)
    }

    /// Encodes and writes the whole file; nothing is written if encoding fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.encode()?;
        writer.write_all(&bytes).map_err(IcoError::Write)?;
        writer.flush().map_err(IcoError::Write)
    }
}

// ---------------------------------------------------------------------------
// Reading back
// ---------------------------------------------------------------------------

/// A directory record as stored in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry {
    pub width: u8,
    pub height: u8,
    pub palette: u8,
    pub reserved: u8,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub data_len: u32,
    pub offset: u32,
}

impl DirEntry {
    /// Side length with the 0 => 256 convention undone.
    pub fn side_length(&self) -> u32 {
        if self.width == 0 {
            MAX_SIZE
        } else {
            self.width as u32
        }
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Reads the header and directory of a buffer written by `encode` and
/// returns each entry with its image bytes.
pub fn decode(bytes: &[u8]) -> Result<Vec<(DirEntry, &[u8])>> {
    if bytes.len() < HEADER_LEN {
        return Err(IcoError::Decode(format!(
            "{} bytes is shorter than the {}-byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }
    if read_u16(bytes, 0) != 0 || read_u16(bytes, 2) != RESOURCE_TYPE_ICON {
        return Err(IcoError::Decode("header is not an icon header".to_string()));
    }
    let count = read_u16(bytes, 4) as usize;
    let dir_end = HEADER_LEN + DIR_ENTRY_LEN * count;
    if bytes.len() < dir_end {
        return Err(IcoError::Decode(format!(
            "directory of {} entries is truncated",
            count
        )));
    }

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let at = HEADER_LEN + DIR_ENTRY_LEN * i;
        let entry = DirEntry {
            width: bytes[at],
            height: bytes[at + 1],
            palette: bytes[at + 2],
            reserved: bytes[at + 3],
            planes: read_u16(bytes, at + 4),
            bits_per_pixel: read_u16(bytes, at + 6),
            data_len: read_u32(bytes, at + 8),
            offset: read_u32(bytes, at + 12),
        };
        let start = entry.offset as usize;
        let end = start
            .checked_add(entry.data_len as usize)
            .filter(|&end| start >= dir_end && end <= bytes.len())
            .ok_or_else(|| {
                IcoError::Decode(format!(
                    "entry {} points outside the file (offset {}, length {})",
                    i, entry.offset, entry.data_len
                ))
            })?;
        entries.push((entry, &bytes[start..end]));
    }
    Ok(entries)
}
