//! Pixsig core - embedded RSA integrity signatures for image content.
//!
//! Binds a signer's public key and an RSA PKCS#1 v1.5 signature over a
//! deterministic pixel digest into a textual metadata tag on the image
//! itself. Verification recomputes the digest from the file's current
//! pixels and checks it against the embedded envelope, so any edit to the
//! visual content invalidates the signature while metadata-only edits do
//! not.
//!
//! What this is not: stripping the tag removes the signature (that is the
//! design, not a weakness to defend against), re-encoding changes the
//! decoded pixels and so invalidates the signature, and the verifier
//! trusts whatever key the envelope carries - identity requires comparing
//! the reported fingerprint against one obtained out of band.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use pixsig_core::{ExifToolStore, Signer, Verifier, DEFAULT_TAG};
//!
//! # fn example() -> pixsig_core::Result<()> {
//! let store = ExifToolStore::new();
//! Signer::new(&store, DEFAULT_TAG).sign(Path::new("photo.png"), Path::new("key.pem"))?;
//!
//! let verified = Verifier::new(&store, DEFAULT_TAG).verify(Path::new("photo.png"))?;
//! println!("RSA public key fingerprint: {}", verified.fingerprint);
//! # Ok(())
//! # }
//! ```

pub mod digest;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod sign;
pub mod store;
pub mod verify;

// Re-export main types for convenience
pub use digest::{compute_digest, ContentDigest, DIGEST_SIZE};
pub use envelope::{Fingerprint, SignatureEnvelope};
pub use error::{PixsigError, Result};
pub use keys::{load_private_key, LoadedKey};
pub use sign::Signer;
pub use store::{ExifToolStore, MemoryStore, MetadataStore, DEFAULT_TAG};
pub use verify::{Verifier, VerifiedSignature};

#[cfg(test)]
mod tests {
    use super::*;

    use image::{Rgba, RgbaImage};
    use md5::{Digest as _, Md5};
    use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
    use rsa::pkcs8::EncodePublicKey;
    use rsa::RsaPrivateKey;
    use tempfile::TempDir;

    /// Integration test: sign a small image, verify it, check the reported
    /// fingerprint against an independent computation.
    #[test]
    fn test_full_sign_verify_workflow() {
        let dir = TempDir::new().unwrap();

        // 4x4 solid-color test image
        let image_path = dir.path().join("photo.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 128, 255, 255]))
            .save(&image_path)
            .unwrap();

        // 2048-bit RSA key, PKCS#1 PEM
        let key = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
        let key_path = dir.path().join("key.pem");
        std::fs::write(
            &key_path,
            key.to_pkcs1_pem(LineEnding::LF).unwrap().as_bytes(),
        )
        .unwrap();

        let store = MemoryStore::new();
        Signer::new(&store, DEFAULT_TAG)
            .sign(&image_path, &key_path)
            .unwrap();

        let verified = Verifier::new(&store, DEFAULT_TAG)
            .verify(&image_path)
            .unwrap();

        // 16 two-hex-digit groups joined by 15 colons
        let fingerprint = verified.fingerprint.to_string();
        assert_eq!(fingerprint.len(), 47);
        assert_eq!(fingerprint.matches(':').count(), 15);

        // Fingerprint must be the MD5 of the key's SubjectPublicKeyInfo DER.
        let spki = key.to_public_key().to_public_key_der().unwrap();
        let expected = Md5::digest(spki.as_bytes());
        assert_eq!(verified.fingerprint.as_bytes()[..], expected[..]);
        assert_eq!(verified.public_key_der, spki.as_bytes());
    }

    /// The digest covers pixels, not the container: signing must not change
    /// what the verifier hashes, and repeated digests agree.
    #[test]
    fn test_digest_stable_across_sign() {
        let dir = TempDir::new().unwrap();
        let image_path = dir.path().join("photo.png");
        RgbaImage::from_pixel(3, 5, Rgba([7, 7, 7, 255]))
            .save(&image_path)
            .unwrap();

        let key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let key_path = dir.path().join("key.pem");
        std::fs::write(
            &key_path,
            key.to_pkcs1_pem(LineEnding::LF).unwrap().as_bytes(),
        )
        .unwrap();

        let before = compute_digest(&image_path).unwrap();

        // MemoryStore leaves the file alone, so the digest must not move.
        let store = MemoryStore::new();
        Signer::new(&store, DEFAULT_TAG)
            .sign(&image_path, &key_path)
            .unwrap();

        assert_eq!(before, compute_digest(&image_path).unwrap());
    }
}
