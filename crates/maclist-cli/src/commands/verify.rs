use anyhow::{Context, Result};
use maclist_config::Config;
use maclist_core::{DATA_FIELD, read_document, verify_document};
use std::path::Path;

pub fn handle(path: &Path, placeholder: Option<String>, config: &Config) -> Result<()> {
    let placeholder = placeholder.unwrap_or_else(|| config.placeholder.clone());
    let doc =
        read_document(path).with_context(|| format!("Failed to verify {}", path.display()))?;

    let Some(verification) = verify_document(&doc, &placeholder) else {
        println!(
            "No \"{}\" list in {}, nothing to verify",
            DATA_FIELD,
            path.display()
        );
        return Ok(());
    };

    if !verification.is_masked() {
        anyhow::bail!(
            "{} of {} entries in {} are not masked",
            verification.unmasked,
            verification.entries,
            path.display()
        );
    }

    println!(
        "✓ All {} entries masked: {}",
        verification.entries,
        path.display()
    );
    Ok(())
}
