//! Signature envelope wire format and key fingerprints.

use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};

use crate::error::{PixsigError, Result};

/// JSON envelope embedded in the image's metadata tag.
///
/// The wire keys and the base64 byte encoding are fixed; both sides of the
/// protocol must produce and accept exactly this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEnvelope {
    /// DER-encoded SubjectPublicKeyInfo for the signing key's public half.
    #[serde(rename = "PublicKey", with = "base64_bytes")]
    pub public_key: Vec<u8>,
    /// RSA PKCS#1 v1.5 signature over the content digest.
    #[serde(rename = "Signature", with = "base64_bytes")]
    pub signature: Vec<u8>,
}

impl SignatureEnvelope {
    /// Serialize the envelope to its JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| PixsigError::MalformedMetadata(format!("failed to encode envelope: {e}")))
    }

    /// Decode an envelope from raw tag bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| PixsigError::MalformedMetadata(e.to_string()))
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// MD5 fingerprint of a DER-encoded public key.
///
/// Display-only: shown to humans for out-of-band comparison, never used to
/// gate verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    pub fn of_public_key(der: &[u8]) -> Self {
        let mut out = [0u8; 16];
        out.copy_from_slice(&Md5::digest(der));
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    /// Renders as 16 colon-separated lowercase hex pairs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_json_roundtrip() {
        let envelope = SignatureEnvelope {
            public_key: vec![0x30, 0x82, 0x01, 0x22],
            signature: vec![0xde, 0xad, 0xbe, 0xef],
        };

        let json = envelope.to_json().unwrap();
        let restored = SignatureEnvelope::from_json(json.as_bytes()).unwrap();
        assert_eq!(restored, envelope);
    }

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = SignatureEnvelope {
            public_key: vec![1, 2, 3],
            signature: vec![4, 5, 6],
        };

        let json = envelope.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["PublicKey"], "AQID");
        assert_eq!(value["Signature"], "BAUG");
    }

    #[test]
    fn test_envelope_rejects_invalid_json() {
        let err = SignatureEnvelope::from_json(b"{ not json").unwrap_err();
        assert!(matches!(err, PixsigError::MalformedMetadata(_)), "{err}");
    }

    #[test]
    fn test_envelope_rejects_invalid_base64() {
        let err =
            SignatureEnvelope::from_json(br#"{"PublicKey":"@@@","Signature":"AA=="}"#).unwrap_err();
        assert!(matches!(err, PixsigError::MalformedMetadata(_)), "{err}");
    }

    #[test]
    fn test_envelope_rejects_missing_fields() {
        let err = SignatureEnvelope::from_json(br#"{"PublicKey":"AA=="}"#).unwrap_err();
        assert!(matches!(err, PixsigError::MalformedMetadata(_)), "{err}");
    }

    #[test]
    fn test_fingerprint_format() {
        // MD5("abc") = 900150983cd24fb0d6963f7d28e17f72
        let fingerprint = Fingerprint::of_public_key(b"abc");
        let rendered = fingerprint.to_string();

        assert_eq!(
            rendered,
            "90:01:50:98:3c:d2:4f:b0:d6:96:3f:7d:28:e1:7f:72"
        );
        assert_eq!(rendered.len(), 47);
        assert_eq!(rendered.matches(':').count(), 15);
    }
}
