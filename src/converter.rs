use crate::cli::Cli;
use crate::formats;
use crate::reader::{BuiltinReader, DocumentReader};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Why a single-file or batch conversion did not happen.
///
/// These never escape the public operations; they are printed and collapsed
/// into a `bool` or a success count.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("unsupported file format: {extension}")]
    UnsupportedExtension { extension: String },

    #[error("directory not found: {}", .path.display())]
    NotADirectory { path: PathBuf },

    /// Anything the reader raised, or an I/O failure while writing output.
    #[error("conversion failed for {}: {error:#}", .path.display())]
    ConversionFailure { path: PathBuf, error: anyhow::Error },
}

pub fn run(cli: &Cli) {
    if cli.list_formats {
        list_formats();
        return;
    }

    // clap enforces an input whenever --list-formats is absent
    let Some(input) = cli.input.as_deref() else {
        return;
    };

    let converter = Converter::new(BuiltinReader);
    if cli.batch {
        converter.batch_convert(input, cli.output.as_deref());
    } else {
        converter.convert_file(input, cli.output.as_deref());
    }
}

pub fn list_formats() {
    println!("Supported file formats:");
    for ext in formats::supported_extensions() {
        println!("  {}", ext);
    }
}

pub struct Converter<R> {
    reader: R,
}

impl<R: DocumentReader> Converter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Convert one file, writing to `output` or next to the input as `.md`.
    /// Returns whether a Markdown file was written.
    pub fn convert_file(&self, input: &Path, output: Option<&Path>) -> bool {
        match self.try_convert_file(input, output) {
            Ok(_) => true,
            Err(err) => {
                report(&err);
                false
            }
        }
    }

    /// Convert every supported file under `input_dir`, mirroring the tree
    /// under `output_dir` (or in place). Returns the number converted.
    pub fn batch_convert(&self, input_dir: &Path, output_dir: Option<&Path>) -> usize {
        match self.try_batch_convert(input_dir, output_dir) {
            Ok(converted) => converted,
            Err(err) => {
                report(&err);
                0
            }
        }
    }

    fn try_convert_file(&self, input: &Path, output: Option<&Path>) -> Result<PathBuf, ConvertError> {
        if !input.exists() {
            return Err(ConvertError::FileNotFound {
                path: input.to_path_buf(),
            });
        }
        if !formats::is_supported(input) {
            return Err(ConvertError::UnsupportedExtension {
                extension: formats::extension_label(input),
            });
        }

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(input));

        println!("Converting: {} -> {}", input.display(), output.display());
        self.write_markdown(input, &output)
            .map_err(|error| ConvertError::ConversionFailure {
                path: input.to_path_buf(),
                error,
            })?;
        println!("Converted: {}", output.display());

        Ok(output)
    }

    /// The reader runs to completion before the output file is touched.
    fn write_markdown(&self, input: &Path, output: &Path) -> anyhow::Result<()> {
        let document = self.reader.convert(input)?;
        tracing::debug!(
            title = ?document.title,
            bytes = document.text_content.len(),
            "converted {}",
            input.display()
        );

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }

        fs::write(output, &document.text_content)
            .with_context(|| format!("Failed to write output file: {}", output.display()))
    }

    fn try_batch_convert(&self, input_dir: &Path, output_dir: Option<&Path>) -> Result<usize, ConvertError> {
        if !input_dir.is_dir() {
            return Err(ConvertError::NotADirectory {
                path: input_dir.to_path_buf(),
            });
        }

        let output_root = match output_dir {
            Some(dir) => {
                fs::create_dir_all(dir).map_err(|e| ConvertError::ConversionFailure {
                    path: dir.to_path_buf(),
                    error: anyhow::Error::new(e).context("Failed to create output directory"),
                })?;
                dir.to_path_buf()
            }
            None => input_dir.to_path_buf(),
        };

        // Collected up front so files written during the run are never revisited
        let inputs = supported_files(input_dir);
        tracing::debug!(files = inputs.len(), "batch converting {}", input_dir.display());

        let mut converted = 0;
        for input in &inputs {
            let output = mirrored_output_path(input_dir, &output_root, input);
            if self.convert_file(input, Some(&output)) {
                converted += 1;
            }
        }

        println!("\nBatch complete: {} file(s) converted", converted);
        Ok(converted)
    }
}

fn report(err: &ConvertError) {
    println!("Error: {}", err);
    if let ConvertError::UnsupportedExtension { .. } = err {
        let supported: Vec<_> = formats::supported_extensions().collect();
        println!("Supported formats: {}", supported.join(", "));
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("md")
}

/// `in/sub/a.pdf` under root `in` maps to `out/sub/a.md`.
fn mirrored_output_path(input_root: &Path, output_root: &Path, input: &Path) -> PathBuf {
    let relative = input.strip_prefix(input_root).unwrap_or(input);
    output_root.join(relative).with_extension("md")
}

/// Supported regular files under `root`, in a stable order. Symlinks to
/// files count; unreadable entries are skipped.
fn supported_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.path().is_file() && formats::is_supported(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}
