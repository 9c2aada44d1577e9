// ============================================================================
// pack.rs — Assemble favicon.ico from existing favicon-<size>.png files
// ============================================================================
//
// Flow: read every input → build the container → write the ICO atomically →
// delete the inputs. Inputs are only removed once the ICO is on disk.
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IcoError, Result};
use crate::ico::{IconContainer, IconImage};
use crate::output::write_container;
use crate::png::PngHeader;
use crate::utils::is_png_file;

/// Everything the caller needs to report on a finished pack run.
#[derive(Debug, Clone)]
pub struct PackSummary {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub bytes_written: usize,
    pub removed: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Images read from disk plus anything odd noticed while reading them.
#[derive(Debug, Clone, Default)]
pub struct LoadedImages {
    pub container: IconContainer,
    pub warnings: Vec<String>,
}

/// `favicon-16.png` → 16: the text after the first '-' up to the next '.'.
pub fn size_from_file_name(path: &Path) -> Result<u32> {
    let malformed = || IcoError::MalformedFileName {
        path: path.to_path_buf(),
    };
    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(malformed)?;
    let after_dash = name.split('-').nth(1).ok_or_else(malformed)?;
    let digits = after_dash.split('.').next().unwrap_or_default();
    digits.parse::<u32>().map_err(|_| malformed())
}

/// Finds PNGs matching `pattern`, ordered by the size in their names.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| IcoError::Config {
        path: PathBuf::from(pattern),
        message: e.to_string(),
    })?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            IcoError::io(path, e.into())
        })?;
        if path.is_file() && is_png_file(&path) {
            let size = size_from_file_name(&path)?;
            found.push((size, path));
        }
    }
    found.sort();
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

fn inspect_png(path: &Path, size: u32, data: &[u8], warnings: &mut Vec<String>) {
    match PngHeader::parse(data) {
        Some(header) => {
            if header.width != size || header.height != size {
                warnings.push(format!(
                    "{} is {}x{} but its name declares {}x{}",
                    path.display(),
                    header.width,
                    header.height,
                    size,
                    size
                ));
            }
            if !header.is_rgba8() {
                warnings.push(format!(
                    "{} is {}-bit {}, its directory entry will still say 32 bits per pixel",
                    path.display(),
                    header.bit_depth,
                    header.color_type_name()
                ));
            }
        }
        None => warnings.push(format!("{} does not start with a PNG header", path.display())),
    }
}

/// Reads every input in order. Nothing is written or removed here.
pub fn load_images(paths: &[PathBuf]) -> Result<LoadedImages> {
    if paths.is_empty() {
        return Err(IcoError::Empty);
    }
    let mut loaded = LoadedImages::default();
    for path in paths {
        let size = size_from_file_name(path)?;
        let data = fs::read(path).map_err(|e| IcoError::io(path, e))?;
        inspect_png(path, size, &data, &mut loaded.warnings);
        loaded.container.push(IconImage::new(size, data)?)?;
    }
    Ok(loaded)
}

/// Tries every path; all failures are reported together.
fn remove_sources(written: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => removed.push(path.clone()),
            Err(e) => failures.push(format!("{}: {}", path.display(), e)),
        }
    }
    if failures.is_empty() {
        Ok(removed)
    } else {
        Err(IcoError::Cleanup {
            written: written.to_path_buf(),
            failures,
        })
    }
}

/// Packs `paths` into `output`, then deletes them unless `keep_sources`.
pub fn pack_files(paths: &[PathBuf], output: &Path, keep_sources: bool) -> Result<PackSummary> {
    let LoadedImages { container, warnings } = load_images(paths)?;
    let bytes_written = write_container(output, &container)?;

    let removed = if keep_sources {
        Vec::new()
    } else {
        remove_sources(output, paths)?
    };

    Ok(PackSummary {
        output: output.to_path_buf(),
        sizes: container.sizes(),
        bytes_written,
        removed,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ico::decode;
    use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb, Rgba};
    use std::io::Cursor;

    fn png(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    fn write_favicons(dir: &Path, sizes: &[u32]) -> Vec<PathBuf> {
        sizes
            .iter()
            .map(|&size| {
                let path = dir.join(format!("favicon-{}.png", size));
                let img = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(size, size, Rgba([9, 8, 7, 255])));
                fs::write(&path, png(img)).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_size_from_file_name() {
        assert_eq!(size_from_file_name(Path::new("favicon-16.png")).unwrap(), 16);
        assert_eq!(size_from_file_name(Path::new("img/favicon-256.png")).unwrap(), 256);
        assert_eq!(size_from_file_name(Path::new("my-dir/favicon-48.png")).unwrap(), 48);
    }

    #[test]
    fn test_malformed_file_names() {
        for name in ["favicon.png", "favicon-big.png", "favicon-.png", "favicon--16.png"] {
            let err = size_from_file_name(Path::new(name)).unwrap_err();
            assert!(matches!(err, IcoError::MalformedFileName { .. }), "{}", name);
        }
    }

    #[test]
    fn test_pack_writes_ico_and_removes_sources() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = write_favicons(dir.path(), &[16, 32, 48]);
        let originals: Vec<Vec<u8>> = inputs.iter().map(|p| fs::read(p).unwrap()).collect();
        let out = dir.path().join("favicon.ico");

        let summary = pack_files(&inputs, &out, false).unwrap();
        assert_eq!(summary.sizes, vec![16, 32, 48]);
        assert_eq!(summary.removed, inputs);
        assert!(summary.warnings.is_empty());
        assert!(inputs.iter().all(|p| !p.exists()));

        let bytes = fs::read(&out).unwrap();
        assert_eq!(bytes.len(), summary.bytes_written);
        let total: usize = originals.iter().map(Vec::len).sum();
        assert_eq!(bytes.len(), 6 + 16 * 3 + total);

        let entries = decode(&bytes).unwrap();
        for ((entry, data), original) in entries.iter().zip(&originals) {
            assert_eq!(*data, original.as_slice());
            assert_eq!(entry.bits_per_pixel, 32);
        }
    }

    #[test]
    fn test_keep_sources() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = write_favicons(dir.path(), &[16]);
        let summary = pack_files(&inputs, &dir.path().join("favicon.ico"), true).unwrap();
        assert!(summary.removed.is_empty());
        assert!(inputs[0].exists());
    }

    #[test]
    fn test_missing_input_removes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut inputs = write_favicons(dir.path(), &[16, 32]);
        inputs.push(dir.path().join("favicon-48.png"));
        let out = dir.path().join("favicon.ico");

        let err = pack_files(&inputs, &out, false).unwrap_err();
        assert!(matches!(err, IcoError::Io { .. }));
        assert!(!out.exists());
        assert!(inputs[0].exists() && inputs[1].exists());
    }

    #[test]
    fn test_failed_write_keeps_sources() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = write_favicons(dir.path(), &[16, 32]);
        let out = dir.path().join("favicon.ico");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("occupied"), b"x").unwrap();

        assert!(pack_files(&inputs, &out, false).is_err());
        assert!(inputs.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_cleanup_tries_every_input() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = write_favicons(dir.path(), &[16, 48]);
        // a directory cannot be removed with remove_file, even as root
        let stuck = dir.path().join("favicon-32.png");
        fs::create_dir(&stuck).unwrap();
        let missing = dir.path().join("favicon-64.png");
        let paths = vec![inputs[0].clone(), stuck.clone(), missing.clone(), inputs[1].clone()];
        let out = dir.path().join("favicon.ico");

        let err = remove_sources(&out, &paths).unwrap_err();
        match &err {
            IcoError::Cleanup { written, failures } => {
                assert_eq!(written, &out);
                assert_eq!(failures.len(), 2);
                assert!(failures[0].contains("favicon-32.png"));
                assert!(failures[1].contains("favicon-64.png"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("was written"));
        assert!(!inputs[0].exists() && !inputs[1].exists());
        assert!(stuck.is_dir());
    }

    #[test]
    fn test_empty_input_list() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("favicon.ico");
        assert!(matches!(pack_files(&[], &out, false), Err(IcoError::Empty)));
        assert!(!out.exists());
    }

    #[test]
    fn test_out_of_range_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favicon-512.png");
        fs::write(&path, b"whatever").unwrap();
        let err = pack_files(&[path.clone()], &dir.path().join("favicon.ico"), false).unwrap_err();
        assert!(matches!(err, IcoError::InvalidSize { size: 512 }));
        assert!(path.exists());
    }

    #[test]
    fn test_warnings_for_mislabelled_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let rgb = dir.path().join("favicon-16.png");
        fs::write(&rgb, png(DynamicImage::ImageRgb8(ImageBuffer::from_pixel(16, 16, Rgb([1, 2, 3]))))).unwrap();
        let wrong = dir.path().join("favicon-32.png");
        fs::write(&wrong, png(DynamicImage::ImageRgba8(ImageBuffer::from_pixel(30, 30, Rgba([0, 0, 0, 0]))))).unwrap();

        let loaded = load_images(&[rgb, wrong]).unwrap();
        assert_eq!(loaded.container.sizes(), vec![16, 32]);
        assert_eq!(loaded.warnings.len(), 2);
        assert!(loaded.warnings[0].contains("RGB"));
        assert!(loaded.warnings[1].contains("30x30"));
    }

    #[test]
    fn test_discover_orders_by_size() {
        let dir = tempfile::tempdir().unwrap();
        write_favicons(dir.path(), &[48, 16, 128, 32]);
        fs::write(dir.path().join("favicon-notes.txt"), b"ignored").unwrap();

        let pattern = dir.path().join("favicon-*").display().to_string();
        let found = discover(&pattern).unwrap();
        let sizes: Vec<u32> = found
            .iter()
            .map(|p| size_from_file_name(p).unwrap())
            .collect();
        assert_eq!(sizes, vec![16, 32, 48, 128]);
    }

    #[test]
    fn test_discover_bad_pattern() {
        assert!(matches!(discover("favicon-[.png"), Err(IcoError::Config { .. })));
    }
}
