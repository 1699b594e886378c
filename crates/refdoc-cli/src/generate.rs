//! Page generation: renders a registry and writes the Markdown files

use anyhow::{Context, Result};
use refdoc_core::Renderer;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the table of contents
pub const TOC_FILE: &str = "toc.md";

const PAGE_EXTENSION: &str = "md";

/// Files produced by one run
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub files: Vec<PathBuf>,
}

/// Render every page and the table of contents into `output_dir`.
///
/// With `dry_run` set nothing is written; the report still lists the files
/// that would have been produced.
pub fn generate_pages(renderer: &Renderer<'_>, output_dir: &Path, dry_run: bool) -> Result<GenerateReport> {
    if !dry_run {
        std::fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory '{}'", output_dir.display())
        })?;
    }

    let mut outputs: Vec<(PathBuf, String)> = renderer
        .render_all()
        .into_iter()
        .map(|page| {
            let file = output_dir.join(format!("{}.{}", page.name, PAGE_EXTENSION));
            (file, page.markdown)
        })
        .collect();
    outputs.push((output_dir.join(TOC_FILE), renderer.toc()));

    let mut report = GenerateReport::default();
    for (file, content) in outputs {
        if !dry_run {
            std::fs::write(&file, content)
                .with_context(|| format!("Failed to write '{}'", file.display()))?;
        }
        report.files.push(file);
    }

    info!(
        files = report.files.len(),
        output = %output_dir.display(),
        dry_run,
        "generation finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use refdoc_core::{FunctionDescriptor, RegistryBuilder, RenderConfig};
    use std::fs;
    use tempfile::TempDir;

    fn renderer_input() -> refdoc_core::Registry {
        let mut builder = RegistryBuilder::new();
        let mut chmake = FunctionDescriptor::new("chmake", "creates a channel");
        chmake.section = Some("Channels".to_string());
        chmake.mem = Some("chstorage".to_string());
        builder.register(chmake).unwrap();
        builder.freeze().unwrap()
    }

    #[test]
    fn test_generate_writes_pages_and_toc() {
        let registry = renderer_input();
        let config = RenderConfig::default();
        let renderer = Renderer::new(&registry, &config);
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc");

        let report = generate_pages(&renderer, &out, false).unwrap();
        assert_eq!(report.files.len(), 3);

        let page = fs::read_to_string(out.join("chmake_mem.md")).unwrap();
        assert!(page.starts_with("# NAME\n\nchmake_mem - creates a channel\n"));
        assert!(out.join("chmake.md").is_file());

        let toc = fs::read_to_string(out.join(TOC_FILE)).unwrap();
        assert!(toc.contains("* [chmake_mem(3)](chmake_mem.html)"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let registry = renderer_input();
        let config = RenderConfig::default();
        let renderer = Renderer::new(&registry, &config);
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc");

        let report = generate_pages(&renderer, &out, true).unwrap();
        assert_eq!(
            report.files,
            vec![
                out.join("chmake.md"),
                out.join("chmake_mem.md"),
                out.join(TOC_FILE)
            ]
        );
        assert!(!out.exists());
    }
}
