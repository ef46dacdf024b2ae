//! Image verification.

use std::path::Path;

use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::Sha512;
use tracing::{debug, info};

use crate::digest::compute_digest;
use crate::envelope::{Fingerprint, SignatureEnvelope};
use crate::error::{PixsigError, Result};
use crate::store::MetadataStore;

/// Outcome of a successful verification.
#[derive(Debug, Clone)]
pub struct VerifiedSignature {
    /// Display fingerprint of the embedded public key.
    pub fingerprint: Fingerprint,
    /// DER-encoded SubjectPublicKeyInfo recovered from the envelope.
    pub public_key_der: Vec<u8>,
}

/// Checks embedded signature envelopes against an image's current content.
pub struct Verifier<S: MetadataStore> {
    store: S,
    tag: String,
}

impl<S: MetadataStore> Verifier<S> {
    pub fn new(store: S, tag: impl Into<String>) -> Self {
        Self {
            store,
            tag: tag.into(),
        }
    }

    /// Verify the image at `image_path`.
    ///
    /// Success proves only that the current pixel content matches the digest
    /// signed under the key embedded in the envelope. The envelope carries
    /// that key, so anyone able to re-sign can swap in their own; callers
    /// wanting identity assurance must pin fingerprints out of band.
    pub fn verify(&self, image_path: &Path) -> Result<VerifiedSignature> {
        let raw = self
            .store
            .read_tag(image_path, &self.tag)?
            .ok_or(PixsigError::NotSigned)?;

        let envelope = SignatureEnvelope::from_json(&raw)?;
        debug!(
            key_bytes = envelope.public_key.len(),
            signature_bytes = envelope.signature.len(),
            "Decoded signature envelope"
        );

        let public_key = RsaPublicKey::from_public_key_der(&envelope.public_key)
            .map_err(|e| PixsigError::InvalidKey(e.to_string()))?;

        let digest = compute_digest(image_path)?;

        public_key
            .verify(
                Pkcs1v15Sign::new::<Sha512>(),
                digest.as_bytes(),
                &envelope.signature,
            )
            .map_err(|_| PixsigError::TamperedOrInvalid)?;

        let fingerprint = Fingerprint::of_public_key(&envelope.public_key);
        info!(
            path = %image_path.display(),
            fingerprint = %fingerprint,
            "Signature verified"
        );

        Ok(VerifiedSignature {
            fingerprint,
            public_key_der: envelope.public_key,
        })
    }
}
