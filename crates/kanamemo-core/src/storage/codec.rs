//! Slot Payload Codec
//!
//! Aggregate -> JSON bytes -> LZ4 (size-prepended) -> base64 string, and the
//! inverse. The slot store only holds strings, hence the base64 leg. Every
//! failure on the read path is a decode error: the repository treats them
//! all as corruption and falls back to the backup slot.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::progress::LearningProgress;

use super::{ProgressError, Result};

/// Encode an aggregate into a slot value.
pub fn encode(progress: &LearningProgress) -> Result<String> {
    let json = serde_json::to_vec(progress)?;
    let compressed = lz4_flex::compress_prepend_size(&json);
    Ok(BASE64.encode(compressed))
}

/// Decode a slot value back into an aggregate.
pub fn decode(data: &str) -> Result<LearningProgress> {
    let compressed = BASE64
        .decode(data)
        .map_err(|err| ProgressError::Decode(format!("base64: {err}")))?;
    let json = lz4_flex::decompress_size_prepended(&compressed)
        .map_err(|err| ProgressError::Decode(format!("decompress: {err}")))?;
    serde_json::from_slice(&json).map_err(|err| ProgressError::Decode(format!("json: {err}")))
}
