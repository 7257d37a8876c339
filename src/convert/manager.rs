use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::assemble::assemble_pdf;
use super::error::{ConvertError, ConvertFailure};
use super::render::rasterize_all_pages;

/// Default render resolution.
pub const DEFAULT_DPI: u32 = 150;

/// Default JPEG quality for re-encoded pages.
pub const DEFAULT_JPEG_QUALITY: u8 = 70;

/// Tunables for the re-encoding pass.
#[derive(Debug, Clone, Copy)]
pub struct ConvertSettings {
    /// Render resolution in dots per inch.
    pub dpi: u32,
    /// JPEG quality (1-100) for page re-encoding.
    pub jpeg_quality: u8,
}

impl Default for ConvertSettings {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// What happened to one source PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The file was rasterized, re-encoded, and written.
    Converted {
        /// Page count of the output (equals the source page count).
        pages: usize,
        /// Size of the written file in bytes.
        bytes: u64,
    },
    /// The output filename already existed; nothing was done.
    Skipped,
    /// Conversion failed; the file is absent from the output directory
    /// and a later run will retry it.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// One source PDF with its conversion outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRecord {
    /// The source filename (same name is used for the output).
    pub filename: String,
    /// What happened to it.
    pub outcome: ConversionOutcome,
}

/// Re-encodes every `.pdf` in `source_dir` into `output_dir`.
///
/// Files whose name already exists in `output_dir` are skipped. A failure
/// converting one file is recorded and the batch continues; only
/// directory-level filesystem errors abort the whole pass. Rasters are
/// held for at most one document at a time.
///
/// # Errors
///
/// Returns [`ConvertError`] if either directory cannot be created or read.
pub async fn run(
    source_dir: &Path,
    output_dir: &Path,
    settings: ConvertSettings,
) -> Result<Vec<ConversionRecord>, ConvertError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| ConvertError::io(output_dir, e))?;

    let skip_set = existing_names(output_dir).await?;
    debug!(existing = skip_set.len(), "conversion skip-set loaded");

    let mut records = Vec::new();
    let mut entries = tokio::fs::read_dir(source_dir)
        .await
        .map_err(|e| ConvertError::io(source_dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ConvertError::io(source_dir, e))?
    {
        let Ok(filename) = entry.file_name().into_string() else {
            continue;
        };
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            continue;
        }

        let outcome = if skip_set.contains(&filename) {
            debug!(filename = %filename, "already converted, skipping");
            ConversionOutcome::Skipped
        } else {
            match convert_one(entry.path(), output_dir, &filename, settings).await {
                Ok((pages, bytes)) => {
                    info!(filename = %filename, pages, bytes, "converted");
                    ConversionOutcome::Converted { pages, bytes }
                }
                Err(failure) => {
                    warn!(filename = %filename, error = %failure, "conversion failed, continuing");
                    ConversionOutcome::Failed {
                        reason: failure.to_string(),
                    }
                }
            }
        };

        records.push(ConversionRecord { filename, outcome });
    }

    let converted = records
        .iter()
        .filter(|r| matches!(r.outcome, ConversionOutcome::Converted { .. }))
        .count();
    let failed = records
        .iter()
        .filter(|r| matches!(r.outcome, ConversionOutcome::Failed { .. }))
        .count();
    info!(
        total = records.len(),
        converted,
        failed,
        skipped = records.len() - converted - failed,
        "conversion pass complete"
    );
    Ok(records)
}

/// Converts one PDF, writing the result atomically to
/// `output_dir/filename`. Returns the output page count and byte size.
///
/// The rasterize-and-assemble step runs on a blocking thread; its rasters
/// are dropped when the closure returns, whatever the exit path.
async fn convert_one(
    source_path: PathBuf,
    output_dir: &Path,
    filename: &str,
    settings: ConvertSettings,
) -> Result<(usize, u64), ConvertFailure> {
    let (pages, pdf_bytes) = tokio::task::spawn_blocking(move || {
        let rasters = rasterize_all_pages(&source_path, settings.dpi)?;
        let bytes = assemble_pdf(&rasters, settings.jpeg_quality)?;
        Ok::<_, ConvertFailure>((rasters.len(), bytes))
    })
    .await
    .map_err(|e| ConvertFailure::TaskPanic {
        detail: e.to_string(),
    })??;

    let final_path = output_dir.join(filename);
    let part_path = output_dir.join(format!("{filename}.part"));

    let byte_count = pdf_bytes.len() as u64;
    if let Err(e) = tokio::fs::write(&part_path, pdf_bytes).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(ConvertFailure::io(part_path, e));
    }
    tokio::fs::rename(&part_path, &final_path)
        .await
        .map_err(|e| ConvertFailure::io(&final_path, e))?;

    Ok((pages, byte_count))
}

/// Lists every filename in `dir`.
async fn existing_names(dir: &Path) -> Result<HashSet<String>, ConvertError> {
    let mut names = HashSet::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ConvertError::io(dir, e))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ConvertError::io(dir, e))?
    {
        if let Ok(name) = entry.file_name().into_string() {
            names.insert(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_already_converted_files_are_skipped() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        // Present in both directories: must be skipped without opening it,
        // which is why invalid PDF bytes are fine here.
        std::fs::write(source.path().join("1_notes.pdf"), b"not a pdf").unwrap();
        std::fs::write(output.path().join("1_notes.pdf"), b"converted earlier").unwrap();

        let records = run(source.path(), output.path(), ConvertSettings::default())
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "1_notes.pdf");
        assert_eq!(records[0].outcome, ConversionOutcome::Skipped);
        // The previously converted file is untouched.
        let kept = std::fs::read(output.path().join("1_notes.pdf")).unwrap();
        assert_eq!(kept, b"converted earlier");
    }

    #[tokio::test]
    async fn test_non_pdf_entries_are_ignored() {
        let source = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(source.path().join("manifest.json"), b"{}").unwrap();
        std::fs::write(source.path().join("readme.txt"), b"hi").unwrap();

        let records = run(source.path(), output.path(), ConvertSettings::default())
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_dir_is_fatal() {
        let output = tempfile::tempdir().unwrap();
        let missing = output.path().join("no-such-dir");
        let result = run(&missing, &output.path().join("image"), ConvertSettings::default()).await;
        assert!(matches!(result, Err(ConvertError::Io { .. })));
    }
}
