// ============================================================================
// main.rs — favforge CLI entry point
// ============================================================================

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;

use favicon_forge::config::{Config, DEFAULT_CONFIG_FILE};
use favicon_forge::options::{CliOptions, Command};
use favicon_forge::utils::{format_bytes, format_duration, parse_size_list};
use favicon_forge::{create_ico_from_logo, create_ico_from_pngs, inspect_ico, pack, resize, IcoError, Reporter};

fn main() {
    let options = CliOptions::parse();
    let reporter = Reporter::new(options.verbose, options.quiet);
    let start_time = Instant::now();

    let result = match &options.command {
        // No subcommand: the plain "pack the three favicons" run.
        None => run_pack(&options, &reporter, None, false, None, false),
        Some(Command::Pack { inputs, discover, output, keep }) => {
            run_pack(&options, &reporter, inputs.clone(), *discover, output.clone(), *keep)
        }
        Some(Command::Resize { source, sizes, output }) => {
            run_resize(&options, &reporter, source.clone(), sizes.as_deref(), output.clone())
        }
        Some(Command::Inspect { file }) => run_inspect(&reporter, file),
        Some(Command::Init { force }) => run_init(&options, &reporter, *force),
    };

    match result {
        Ok(()) => {
            reporter.detail(format!("Finished in {}", format_duration(start_time.elapsed().as_secs_f64())));
        }
        Err(e) => {
            reporter.error(format!("{:#}", e));
            process::exit(1);
        }
    }
}

fn load_config(options: &CliOptions, reporter: &Reporter) -> anyhow::Result<Config> {
    let path = &options.config;
    // An explicitly named config file has to exist; the default one is optional.
    if !path.exists() && path != Path::new(DEFAULT_CONFIG_FILE) {
        bail!(
            "File '{}' not found!\nUsage: favforge --config <file> or favforge -c <file>",
            path.display()
        );
    }
    let config = Config::load_or_default(path)
        .with_context(|| format!("Configuration parse error in {}", path.display()))?;
    if path.exists() {
        reporter.detail(format!("Using configuration {}", path.display()));
    }
    Ok(config)
}

fn run_pack(
    options: &CliOptions,
    reporter: &Reporter,
    inputs: Option<Vec<PathBuf>>,
    discover: bool,
    output: Option<PathBuf>,
    keep: bool,
) -> anyhow::Result<()> {
    let config = load_config(options, reporter)?.pack;
    let output = output.unwrap_or(config.output);
    let keep_sources = keep || config.keep_sources;

    let inputs = if discover {
        let found = pack::discover(&config.pattern)
            .with_context(|| format!("Cannot search for '{}'", config.pattern))?;
        if found.is_empty() {
            bail!("No files match '{}'", config.pattern);
        }
        found
    } else {
        inputs.unwrap_or(config.inputs)
    };

    reporter.info(format!("Packing {} PNG file(s) into {}", inputs.len(), output.display()));
    for input in &inputs {
        reporter.detail(format!("input: {}", input.display()));
    }

    let summary = create_ico_from_pngs(&inputs, &output, keep_sources).map_err(|e| match e {
        // The ICO exists at this point; only the cleanup went wrong.
        IcoError::Cleanup { .. } => anyhow::Error::new(e),
        other => anyhow::Error::new(other).context(format!("Failed to create {}", output.display())),
    })?;

    for warning in &summary.warnings {
        reporter.warn(warning);
    }
    reporter.detail(format!(
        "sizes {:?}, {} written",
        summary.sizes,
        format_bytes(summary.bytes_written)
    ));
    reporter.success(format!("{} created successfully!", summary.output.display()));
    if !summary.removed.is_empty() {
        for removed in &summary.removed {
            reporter.detail(format!("removed {}", removed.display()));
        }
        reporter.info("Temporary PNG files removed.");
    }
    Ok(())
}

fn run_resize(
    options: &CliOptions,
    reporter: &Reporter,
    source: Option<PathBuf>,
    sizes: Option<&str>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    if !resize::is_available() {
        reporter.warn("favforge was built without the 'resize' feature");
    }
    let config = load_config(options, reporter)?.resize;
    let source = source.unwrap_or(config.source);
    let output = output.unwrap_or(config.output);
    let sizes = match sizes {
        Some(text) => parse_size_list(text).map_err(anyhow::Error::msg).context("Invalid --sizes")?,
        None => config.sizes,
    };

    reporter.info(format!("Resizing {} to {:?}", source.display(), sizes));

    let summary = create_ico_from_logo(&source, &sizes, &output)
        .with_context(|| format!("Failed to create {} from {}", output.display(), source.display()))?;

    for (size, len) in summary.sizes.iter().zip(&summary.image_lens) {
        reporter.detail(format!("{}x{}: {}", size, size, format_bytes(*len)));
    }
    reporter.success(format!("Successfully created {}", summary.output.display()));
    Ok(())
}

fn run_inspect(reporter: &Reporter, file: &Path) -> anyhow::Result<()> {
    let entries = inspect_ico(file).with_context(|| format!("Cannot read {}", file.display()))?;
    reporter.info(format!("{}: {} image(s)", file.display(), entries.len()));
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "  #{}  {}x{}  {} bpp  {} at offset {}",
            i,
            entry.side_length(),
            entry.side_length(),
            entry.bits_per_pixel,
            format_bytes(entry.data_len as usize),
            entry.offset
        );
    }
    Ok(())
}

fn run_init(options: &CliOptions, reporter: &Reporter, force: bool) -> anyhow::Result<()> {
    let path = &options.config;
    if path.exists() && !force {
        bail!("'{}' already exists (use --force to overwrite)", path.display());
    }
    Config::default()
        .save(path)
        .with_context(|| format!("Error writing {}", path.display()))?;
    reporter.success(format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
