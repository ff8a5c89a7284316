//! refdoc — generate API reference pages from JSDoc-style source comments.
//!
//! - **flags**: `refdoc -o docs/api -t class=class.tera -t index=index.tera db=lib/db.js lib/*.js`
//! - **manifest**: `refdoc -m refdoc.json` (flags are merged on top)

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use refdoc::config::{self, Manifest, RunConfig, DEFAULT_EXTENSION};
use refdoc::model::{SourceUnit, TemplateSource};
use refdoc::render::OutputOptions;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "refdoc",
    about = "Generate templated API reference documents from documentation comments"
)]
struct Cli {
    /// Source files to document. `TAG=PATH` stores the file under TAG
    /// (a TAG never contains `/` or `\`, so `lib/a=b.js` is a plain path);
    /// untagged entries (glob patterns supported) are keyed by position.
    sources: Vec<String>,

    /// Output directory (required unless the manifest sets it)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Template as TAG=PATH. `class` and `index` are required.
    #[arg(short = 't', long = "template", value_parser = config::parse_template_arg)]
    templates: Vec<TemplateSource>,

    /// Example source (PATH or TAG=PATH). When given, only these files are
    /// scanned for @_class/@_function examples.
    #[arg(short = 'x', long = "example")]
    examples: Vec<String>,

    /// Template attribute as KEY=VALUE, e.g. index_title="Driver API"
    #[arg(short = 'a', long = "attr", value_parser = config::parse_key_value)]
    attributes: Vec<(String, String)>,

    /// Output file extension
    #[arg(short = 'e', long = "ext")]
    extension: Option<String>,

    /// JSON manifest listing sources, examples, templates and attributes
    #[arg(short = 'm', long)]
    manifest: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(cli)?;
    let report = refdoc::generate(&config).context("documentation generation failed")?;
    debug!(written = report.written.len(), "done");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("refdoc={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge the manifest (if any) with command-line values.
fn build_config(cli: Cli) -> Result<RunConfig> {
    let mut manifest = match cli.manifest {
        Some(ref path) => Manifest::load(path)
            .with_context(|| format!("failed to load manifest {}", path.display()))?,
        None => Manifest::default(),
    };

    manifest.sources.extend(expand_units(&cli.sources)?);
    manifest.examples.extend(expand_units(&cli.examples)?);
    manifest.templates.extend(cli.templates);
    manifest.attributes.extend(cli.attributes);

    let dir = cli
        .output
        .or(manifest.output)
        .context("--output is required (or set \"output\" in the manifest)")?;
    let extension = cli
        .extension
        .or(manifest.extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

    Ok(RunConfig {
        sources: manifest.sources,
        examples: manifest.examples,
        templates: manifest.templates,
        output: OutputOptions { dir, extension },
        attributes: manifest.attributes,
    })
}

/// File extensions picked up when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Turn command-line entries into source units, keeping argument order.
///
/// Tagged entries name exactly one file. Untagged entries may be a file, a
/// directory (scanned non-recursively) or a glob; matches from one entry
/// are sorted for deterministic keys.
fn expand_units(args: &[String]) -> Result<Vec<SourceUnit>> {
    let mut units = Vec::new();
    for arg in args {
        if let (Some(tag), path) = config::split_tagged(arg) {
            units.push(SourceUnit::tagged(path, tag));
            continue;
        }

        let path = Path::new(arg);
        if path.is_file() {
            units.push(SourceUnit::new(path));
            continue;
        }

        let mut matches: Vec<PathBuf> = if path.is_dir() {
            fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file())
                .filter(|p| {
                    p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e))
                })
                .collect()
        } else {
            glob::glob(arg)
                .with_context(|| format!("invalid glob pattern: {}", arg))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect()
        };

        if matches.is_empty() {
            // Keep the entry so extraction reports the unreadable path.
            warn!(pattern = %arg, "no files matched");
            units.push(SourceUnit::new(path));
            continue;
        }
        matches.sort();
        units.extend(matches.into_iter().map(SourceUnit::new));
    }
    Ok(units)
}
