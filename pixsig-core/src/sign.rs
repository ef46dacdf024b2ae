//! Image signing.

use std::path::Path;

use rsa::pkcs8::EncodePublicKey;
use rsa::Pkcs1v15Sign;
use sha2::Sha512;
use tracing::{debug, info};

use crate::digest::compute_digest;
use crate::envelope::SignatureEnvelope;
use crate::error::{PixsigError, Result};
use crate::keys::load_private_key;
use crate::store::MetadataStore;

/// Signs images by embedding a signature envelope into a metadata tag.
pub struct Signer<S: MetadataStore> {
    store: S,
    tag: String,
}

impl<S: MetadataStore> Signer<S> {
    pub fn new(store: S, tag: impl Into<String>) -> Self {
        Self {
            store,
            tag: tag.into(),
        }
    }

    /// Sign the image at `image_path` with the PEM key at `key_path`.
    ///
    /// Any envelope already present in the tag is overwritten. The image
    /// file is only touched by the final metadata write; every failure
    /// before that leaves it untouched.
    pub fn sign(&self, image_path: &Path, key_path: &Path) -> Result<()> {
        let digest = compute_digest(image_path)?;
        let loaded = load_private_key(key_path)?;

        let signature = loaded
            .key
            .sign(Pkcs1v15Sign::new::<Sha512>(), digest.as_bytes())
            .map_err(|e| PixsigError::KeyParse(format!("key cannot sign the digest: {e}")))?;

        let public_key = loaded
            .key
            .to_public_key()
            .to_public_key_der()
            .map_err(|e| PixsigError::KeyParse(format!("failed to encode public key: {e}")))?
            .as_bytes()
            .to_vec();

        debug!(
            digest = %digest.to_hex(),
            signature_bytes = signature.len(),
            "Signed content digest"
        );

        let envelope = SignatureEnvelope {
            public_key,
            signature,
        };
        self.store
            .write_tag(image_path, &self.tag, &envelope.to_json()?)?;

        info!(path = %image_path.display(), tag = %self.tag, "Embedded signature envelope");
        Ok(())
    }
}
