//! Verify command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use pixsig_core::{ExifToolStore, Verifier};
use tracing::debug;

/// Execute the verify command.
pub fn execute(image: &Path, tag: &str, quiet: bool) -> Result<()> {
    debug!(image = %image.display(), tag, "Verifying image");

    let verified = Verifier::new(ExifToolStore::new(), tag)
        .verify(image)
        .with_context(|| format!("Verification failed for {}", image.display()))?;

    if !quiet {
        println!("{}", "integrity check passed".green().bold());
    }
    println!("RSA public key fingerprint: {}", verified.fingerprint);

    Ok(())
}
