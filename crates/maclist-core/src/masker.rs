//! Masker - read a document, mask its `"data"` field, write it back out

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::{self, MaskOutcome, PLACEHOLDER, ShapePolicy};
use crate::{MaskError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskOptions {
    pub placeholder: String,
    pub on_unexpected_shape: ShapePolicy,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            placeholder: PLACEHOLDER.to_string(),
            on_unexpected_shape: ShapePolicy::default(),
        }
    }
}

/// Summary of one masking run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: MaskOutcome,
}

pub struct Masker {
    options: MaskOptions,
}

impl Masker {
    pub fn new(options: MaskOptions) -> Self {
        Self { options }
    }

    /// Mask an in-memory document
    pub fn mask_value(&self, doc: &mut Value) -> Result<MaskOutcome> {
        document::mask_document(
            doc,
            &self.options.placeholder,
            self.options.on_unexpected_shape,
        )
    }

    /// Read `input`, mask it, and write the result to `output`.
    ///
    /// The output file is only opened once the input has been read, parsed
    /// and masked, so any failure before the write step leaves `output`
    /// untouched.
    pub fn mask_file(&self, input: &Path, output: &Path) -> Result<MaskReport> {
        let mut doc = read_document(input)?;
        let outcome = self.mask_value(&mut doc)?;
        write_document(output, &doc)?;

        tracing::info!(
            "Masked {} entries: {} -> {}",
            outcome.masked_entries(),
            input.display(),
            output.display()
        );

        Ok(MaskReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            outcome,
        })
    }
}

impl Default for Masker {
    fn default() -> Self {
        Self::new(MaskOptions::default())
    }
}

/// Mask `input` into `output` with the default placeholder and shape policy
pub fn mask(input: &Path, output: &Path) -> Result<MaskReport> {
    Masker::default().mask_file(input, output)
}

/// Read and parse a JSON document
pub fn read_document(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|source| MaskError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    serde_json::from_slice(&bytes).map_err(|source| MaskError::ParseFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a document with 4-space indentation, creating or truncating `path`
pub fn write_document(path: &Path, doc: &Value) -> Result<()> {
    let write_failure = |source: std::io::Error| MaskError::WriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_failure)?;
    let mut writer = BufWriter::new(file);
    document::write_pretty(&mut writer, doc).map_err(|e| write_failure(e.into()))?;
    writer.flush().map_err(write_failure)?;

    Ok(())
}
