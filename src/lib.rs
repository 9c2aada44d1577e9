// ============================================================================
// lib.rs — Library API (shared by the CLI and the tests)
// ============================================================================

pub mod config;
pub mod error;
pub mod ico;
pub mod options;
pub mod output;
pub mod pack;
pub mod png;
pub mod report;
pub mod resize;
pub mod utils;

pub use config::{Config, PackConfig, ResizeConfig};
pub use error::{IcoError, Result};
pub use ico::{decode, DirEntry, IconContainer, IconImage};
pub use pack::{discover, pack_files, size_from_file_name, PackSummary};
pub use report::Reporter;

use std::path::{Path, PathBuf};

/// Result of the resize path.
#[derive(Debug, Clone)]
pub struct ResizeSummary {
    pub output: PathBuf,
    pub sizes: Vec<u32>,
    pub image_lens: Vec<usize>,
    pub bytes_written: usize,
}

/// Packs pre-sized PNGs into `output` and deletes them (unless `keep_sources`).
pub fn create_ico_from_pngs(paths: &[PathBuf], output: &Path, keep_sources: bool) -> Result<PackSummary> {
    pack::pack_files(paths, output, keep_sources)
}

/// Resizes `source` to every entry of `sizes` and writes one ICO.
/// The output file is untouched when any size fails.
pub fn create_ico_from_logo(source: &Path, sizes: &[u32], output: &Path) -> Result<ResizeSummary> {
    let container = resize::resize_to_container(source, sizes)?;
    let bytes_written = output::write_container(output, &container)?;
    Ok(ResizeSummary {
        output: output.to_path_buf(),
        sizes: container.sizes(),
        image_lens: container.images().iter().map(|i| i.byte_len()).collect(),
        bytes_written,
    })
}

/// Reads the directory of an ICO file written by this crate.
pub fn inspect_ico(path: &Path) -> Result<Vec<DirEntry>> {
    let bytes = std::fs::read(path).map_err(|e| IcoError::io(path, e))?;
    let entries = ico::decode(&bytes)?;
    Ok(entries.into_iter().map(|(entry, _)| entry).collect())
}
