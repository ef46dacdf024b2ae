//! Exit codes following sysexits.h conventions, with project-specific codes
//! for the protocol outcomes sysexits has no slot for.
//!
//! Every core error kind maps to its own stable code so scripts can tell
//! "not signed" from "tampered" from "tool unavailable".

#![allow(dead_code)] // Constants may be used in future or for documentation

use pixsig_core::PixsigError;

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// General error (catch-all).
pub const GENERAL_ERROR: i32 = 1;

/// Command line usage error (invalid arguments).
/// Maps to EX_USAGE from sysexits.h.
pub const USAGE_ERROR: i32 = 64;

/// Signature does not match the image's current content.
/// Maps to EX_DATAERR from sysexits.h.
pub const VERIFICATION_FAILED: i32 = 65;

/// Cannot open an input file.
/// Maps to EX_NOINPUT from sysexits.h.
pub const INPUT_ERROR: i32 = 66;

/// The image carries no signature envelope.
pub const NOT_SIGNED: i32 = 67;

/// The tag is present but does not decode as an envelope.
pub const MALFORMED_METADATA: i32 = 68;

/// The external metadata tool could not be run.
/// Maps to EX_UNAVAILABLE from sysexits.h.
pub const TOOL_UNAVAILABLE: i32 = 69;

/// The image container could not be decoded.
pub const DECODE_ERROR: i32 = 70;

/// The metadata write failed.
/// Maps to EX_IOERR from sysexits.h.
pub const WRITE_ERROR: i32 = 74;

/// The embedded public key is not a usable RSA key.
pub const INVALID_KEY: i32 = 76;

/// The private key file could not be parsed.
/// Maps to EX_CONFIG from sysexits.h.
pub const KEY_ERROR: i32 = 78;

/// Map an error chain to its exit code.
///
/// Core errors are classified by kind wherever they sit in the context
/// chain; anything else falls through to the general error code.
pub fn classify(err: &anyhow::Error) -> i32 {
    let core = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<PixsigError>());

    match core {
        Some(PixsigError::FileAccess { .. }) => INPUT_ERROR,
        Some(PixsigError::Decode(_)) => DECODE_ERROR,
        Some(PixsigError::KeyParse(_)) => KEY_ERROR,
        Some(PixsigError::MetadataWrite(_)) => WRITE_ERROR,
        Some(PixsigError::NotSigned) => NOT_SIGNED,
        Some(PixsigError::MalformedMetadata(_)) => MALFORMED_METADATA,
        Some(PixsigError::InvalidKey(_)) => INVALID_KEY,
        Some(PixsigError::TamperedOrInvalid) => VERIFICATION_FAILED,
        Some(PixsigError::ExternalTool(_)) => TOOL_UNAVAILABLE,
        None => GENERAL_ERROR,
    }
}
