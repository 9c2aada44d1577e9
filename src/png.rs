// PNG header peek: just enough of IHDR to sanity-check pack inputs.

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

const COLOR_TYPE_RGBA: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
}

impl PngHeader {
    /// Reads the IHDR chunk that must directly follow the signature.
    /// Returns `None` for anything that is not a PNG.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 26 || bytes[..8] != SIGNATURE || &bytes[12..16] != b"IHDR" {
            return None;
        }
        let be = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        Some(Self {
            width: be(16),
            height: be(20),
            bit_depth: bytes[24],
            color_type: bytes[25],
        })
    }

    /// True when 32 bits per pixel is an accurate label for this image.
    pub fn is_rgba8(&self) -> bool {
        self.color_type == COLOR_TYPE_RGBA && self.bit_depth == 8
    }

    pub fn color_type_name(&self) -> &'static str {
        match self.color_type {
            0 => "grayscale",
            2 => "RGB",
            3 => "indexed",
            4 => "grayscale+alpha",
            6 => "RGBA",
            _ => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Luma, Rgba};
    use std::io::Cursor;

    fn encode(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_parse_rgba_png() {
        let bytes = encode(DynamicImage::ImageRgba8(ImageBuffer::from_pixel(24, 12, Rgba([1u8, 2, 3, 4]))));
        let header = PngHeader::parse(&bytes).unwrap();
        assert_eq!(header.width, 24);
        assert_eq!(header.height, 12);
        assert!(header.is_rgba8());
        assert_eq!(header.color_type_name(), "RGBA");
    }

    #[test]
    fn test_parse_grayscale_png() {
        let bytes = encode(DynamicImage::ImageLuma8(ImageBuffer::from_pixel(8, 8, Luma([200u8]))));
        let header = PngHeader::parse(&bytes).unwrap();
        assert!(!header.is_rgba8());
        assert_eq!(header.color_type_name(), "grayscale");
    }

    #[test]
    fn test_non_png_is_none() {
        assert_eq!(PngHeader::parse(b"BM not a png at all, just some bytes"), None);
        assert_eq!(PngHeader::parse(&SIGNATURE), None);
    }
}
