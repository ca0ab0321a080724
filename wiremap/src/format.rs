//! Format-specific encoding and decoding of wire mappings (feature-gated).
//!
//! Provides [`encode`] and [`decode`] functions that convert a mapping
//! [`Value`] to and from byte buffers in RON or bincode format. The
//! conversion engine itself never touches bytes; these are the seam to an
//! external encoder.

use crate::error::ConvertError;
use crate::value::Value;

/// Supported serialization formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// RON (Rusty Object Notation), human-readable text format.
    #[cfg(feature = "serialize-ron")]
    Ron,
    /// Bincode, compact binary format.
    #[cfg(feature = "serialize-bincode")]
    Bincode,
}

/// Encode a wire mapping to bytes in the given format.
#[allow(unused_variables)]
pub fn encode(value: &Value, format: Format) -> Result<Vec<u8>, ConvertError> {
    match format {
        #[cfg(feature = "serialize-ron")]
        Format::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
            .map(|s| s.into_bytes())
            .map_err(|e| ConvertError::Format(e.to_string())),
        #[cfg(feature = "serialize-bincode")]
        Format::Bincode => {
            bincode::serialize(value).map_err(|e| ConvertError::Format(e.to_string()))
        }
    }
}

/// Decode bytes in the given format back into a wire mapping.
#[allow(unused_variables)]
pub fn decode(bytes: &[u8], format: Format) -> Result<Value, ConvertError> {
    match format {
        #[cfg(feature = "serialize-ron")]
        Format::Ron => {
            let s = std::str::from_utf8(bytes)
                .map_err(|e| ConvertError::Format(e.to_string()))?;
            ron::from_str(s).map_err(|e| ConvertError::Format(e.to_string()))
        }
        #[cfg(feature = "serialize-bincode")]
        Format::Bincode => {
            bincode::deserialize(bytes).map_err(|e| ConvertError::Format(e.to_string()))
        }
    }
}
