// ============================================================================
// resize.rs — Source logo → square PNGs at every icon size
// ============================================================================
//
// The source is normalized to RGBA8 first, then resampled with Lanczos3 and
// PNG-encoded in memory. Nothing touches the output path until every size
// has been produced.
// ============================================================================

use std::path::Path;

use crate::error::{IcoError, Result};
use crate::ico::{IconContainer, IconImage, MAX_SIZE};

fn check_sizes(sizes: &[u32]) -> Result<()> {
    if sizes.is_empty() {
        return Err(IcoError::Empty);
    }
    match sizes.iter().find(|&&s| s == 0 || s > MAX_SIZE) {
        Some(&size) => Err(IcoError::InvalidSize { size }),
        None => Ok(()),
    }
}

#[cfg(feature = "resize")]
mod imp {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::imageops::FilterType;
    use image::{ColorType, DynamicImage, ImageEncoder, ImageError, RgbaImage};

    fn image_error(path: &Path, err: ImageError) -> IcoError {
        match err {
            ImageError::IoError(e) => IcoError::io(path, e),
            other => IcoError::Image {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }

    /// Converts to 8-bit RGBA unless the image already is.
    pub fn normalize_rgba(img: DynamicImage) -> RgbaImage {
        match img {
            DynamicImage::ImageRgba8(buf) => buf,
            other => other.to_rgba8(),
        }
    }

    pub fn resize_square(img: &RgbaImage, size: u32) -> RgbaImage {
        image::imageops::resize(img, size, size, FilterType::Lanczos3)
    }

    pub fn encode_png(img: &RgbaImage) -> std::result::Result<Vec<u8>, ImageError> {
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf).write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ColorType::Rgba8,
        )?;
        Ok(buf)
    }

    /// Resizes an already decoded image. `origin` only labels errors.
    pub fn resize_image(img: DynamicImage, sizes: &[u32], origin: &Path) -> Result<IconContainer> {
        check_sizes(sizes)?;
        let rgba = normalize_rgba(img);
        let mut container = IconContainer::new();
        for &size in sizes {
            let resized = resize_square(&rgba, size);
            let png = encode_png(&resized).map_err(|e| image_error(origin, e))?;
            container.push(IconImage::new(size, png)?)?;
        }
        Ok(container)
    }

    pub fn resize_to_container(source: &Path, sizes: &[u32]) -> Result<IconContainer> {
        check_sizes(sizes)?;
        let img = image::open(source).map_err(|e| image_error(source, e))?;
        resize_image(img, sizes, source)
    }
}

#[cfg(feature = "resize")]
pub use imp::{encode_png, normalize_rgba, resize_image, resize_square, resize_to_container};

#[cfg(not(feature = "resize"))]
pub fn resize_to_container(_source: &Path, sizes: &[u32]) -> Result<IconContainer> {
    check_sizes(sizes)?;
    Err(IcoError::MissingDependency { feature: "resize" })
}

pub fn is_available() -> bool {
    cfg!(feature = "resize")
}
