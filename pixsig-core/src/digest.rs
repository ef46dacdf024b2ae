//! Content digest computation over decoded pixel data.
//!
//! The digest covers the image's decoded pixels, not its container bytes, so
//! it survives metadata edits (including embedding the signature envelope
//! itself) but not recompression or any other decode-affecting transform.

use std::path::Path;

use sha2::{Digest, Sha512};
use tracing::debug;

use crate::error::{PixsigError, Result};

/// Digest length in bytes (SHA-512).
pub const DIGEST_SIZE: usize = 64;

/// SHA-512 digest of an image's canonical pixel stream.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ContentDigest([u8; DIGEST_SIZE]);

impl ContentDigest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentDigest({}..)", &self.to_hex()[..16])
    }
}

/// Compute the content digest for the image at `path`.
///
/// Pixels are visited column-major (outer loop over x, inner over y) and
/// each R, G, B, A channel value of the 16-bit decode is appended to the
/// hashed stream as a little-endian u32. The ordering and widening are part
/// of the wire protocol: a signer and a verifier that disagree on either
/// will never produce matching digests.
pub fn compute_digest(path: &Path) -> Result<ContentDigest> {
    let bytes = std::fs::read(path).map_err(|source| PixsigError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let img = image::load_from_memory(&bytes)?;
    let rgba = img.to_rgba16();
    let (width, height) = rgba.dimensions();

    let mut stream = Vec::with_capacity(width as usize * height as usize * 16);
    for x in 0..width {
        for y in 0..height {
            let image::Rgba(channels) = *rgba.get_pixel(x, y);
            for value in channels {
                stream.extend_from_slice(&u32::from(value).to_le_bytes());
            }
        }
    }

    let mut digest = [0u8; DIGEST_SIZE];
    digest.copy_from_slice(&Sha512::digest(&stream));

    debug!(
        path = %path.display(),
        width,
        height,
        digest = %hex::encode(&digest[..8]),
        "Computed content digest"
    );

    Ok(ContentDigest(digest))
}
