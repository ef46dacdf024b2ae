use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixsigError {
    #[error("failed to read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to parse RSA private key: {0}")]
    KeyParse(String),

    #[error("failed to write metadata tag: {0}")]
    MetadataWrite(String),

    #[error("image carries no signature tag")]
    NotSigned,

    #[error("malformed signature metadata: {0}")]
    MalformedMetadata(String),

    #[error("embedded public key is not a usable RSA key: {0}")]
    InvalidKey(String),

    #[error("signature check failed: content does not match the signed digest")]
    TamperedOrInvalid,

    #[error("metadata tool failed: {0}")]
    ExternalTool(String),
}

pub type Result<T> = std::result::Result<T, PixsigError>;
