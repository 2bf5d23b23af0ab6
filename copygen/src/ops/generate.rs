//! Generate operation - deepcopy code generation from the manifest.

use std::path::Path;

use copygen_codegen::{enablement::marker_registry, pipeline::Generator};
use copygen_codegen_go::GoBackend;
use copygen_core::{FileSink, MemorySink};
use copygen_manifest::{CopygenToml, FormatterKind};
use eyre::{Context, Result};
use tracing::info;

use crate::{
    formatter::formatter,
    reports::{GenerateReport, GenerationResult, PreviewFile},
};

/// Command-line overrides for the `[generator]` table.
#[derive(Debug, Default)]
pub struct GenerateOptions<'a> {
    /// Header file, relative to the working directory.
    pub header_file: Option<&'a Path>,
    pub year: Option<&'a str>,
    pub formatter: Option<FormatterKind>,
    /// Keep the output in memory instead of writing it.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Package directories are resolved against the manifest's directory.
pub fn generate(file: &CopygenToml, opts: GenerateOptions<'_>) -> Result<GenerateReport> {
    let config = &file.manifest().generator;

    let header = match opts.header_file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read header file {}", path.display()))?,
        None => file
            .read_header(config.header_file.as_deref())
            .wrap_err("Failed to read header file")?,
    };
    let year = opts.year.unwrap_or(config.year());
    let kind = opts.formatter.unwrap_or(config.formatter);
    let formatter = formatter(kind);

    let registry = marker_registry().wrap_err("Failed to build the marker registry")?;
    let generator = Generator::new(&registry, &GoBackend, formatter.as_ref())
        .with_header(&header, year)
        .with_output_file(config.output_file());

    let packages = &file.manifest().packages;
    info!(
        packages = packages.len(),
        formatter = kind.as_str(),
        dry_run = opts.dry_run,
        "generating"
    );

    let (run, result) = if opts.dry_run {
        let sink = MemorySink::new();
        let run = generator.run(packages, &sink);
        let files = sink
            .files()
            .into_iter()
            .map(|(path, content)| PreviewFile {
                path,
                content: String::from_utf8_lossy(&content).into_owned(),
            })
            .collect();
        (run, GenerationResult::Preview(files))
    } else {
        let root = file.base_dir().to_path_buf();
        let run = generator.run(packages, &FileSink::new(&root));
        (run, GenerationResult::Written { root })
    };

    Ok(GenerateReport {
        formatter: formatter.name(),
        run,
        result,
    })
}
