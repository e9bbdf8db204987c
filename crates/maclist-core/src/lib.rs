//! Core masking logic for maclist
//!
//! This crate contains:
//! - The document transform (replace every `"data"` entry with a placeholder)
//! - The file pipeline (read, mask, pretty-write)
//! - Verification of already-masked documents

pub mod document;
pub mod error;
pub mod masker;

pub use document::{
    DATA_FIELD, MaskOutcome, PLACEHOLDER, ShapePolicy, Verification, mask_document,
    to_pretty_string, verify_document, write_pretty,
};
pub use error::{MaskError, Result};
pub use masker::{MaskOptions, MaskReport, Masker, mask, read_document, write_document};
