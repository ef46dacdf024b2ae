//! Sign command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use pixsig_core::{ExifToolStore, Signer};
use tracing::{debug, info};

/// Execute the sign command.
pub fn execute(image: &Path, rsa_key: &Path, tag: &str, quiet: bool) -> Result<()> {
    debug!(
        image = %image.display(),
        key = %rsa_key.display(),
        tag,
        "Signing image"
    );

    Signer::new(ExifToolStore::new(), tag)
        .sign(image, rsa_key)
        .with_context(|| format!("Failed to sign {}", image.display()))?;

    info!(path = %image.display(), "Image signed");

    if !quiet {
        println!("{}", "Image signed.".green().bold());
        println!("   {} {}", "Image:".dimmed(), image.display());
        println!("   {} {}", "Tag:".dimmed(), tag);
    }

    Ok(())
}
