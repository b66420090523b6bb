use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, BridgeResult};

/// Custom font embedded into the bootstrap document as a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    #[serde(rename = "fontFamily")]
    family: String,
    #[serde(rename = "base64")]
    source: String,
}

impl FontFace {
    /// Wraps an existing `data:` URL.
    pub fn new(family: impl Into<String>, source: impl Into<String>) -> BridgeResult<Self> {
        let face = Self {
            family: family.into(),
            source: source.into(),
        };
        face.validate()?;
        Ok(face)
    }

    /// Encodes raw TrueType bytes into a `data:font/ttf;base64,...` URL.
    pub fn from_truetype_bytes(family: impl Into<String>, bytes: &[u8]) -> BridgeResult<Self> {
        Self::new(
            family,
            format!("data:font/ttf;base64,{}", STANDARD.encode(bytes)),
        )
    }

    #[must_use]
    pub fn family(&self) -> &str {
        &self.family
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Faces deserialized from config bypass `new`, so callers re-check here.
    pub fn validate(&self) -> BridgeResult<()> {
        if self.family.trim().is_empty() {
            return Err(BridgeError::InvalidData(
                "font family must not be empty".to_owned(),
            ));
        }
        if self.family.contains(['"', '<', '>', '\\', '\n', '\r']) {
            return Err(BridgeError::InvalidData(format!(
                "font family `{}` contains characters that cannot be embedded",
                self.family
            )));
        }
        if !self.source.starts_with("data:") {
            return Err(BridgeError::InvalidData(format!(
                "font `{}` source must be a data URL",
                self.family
            )));
        }
        if self.source.contains(['\'', '<', '>', '\\', '\n']) {
            return Err(BridgeError::InvalidData(format!(
                "font `{}` source contains characters that cannot be embedded",
                self.family
            )));
        }
        Ok(())
    }

    /// `@font-face` rule declaring this font.
    #[must_use]
    pub fn declaration(&self) -> String {
        format!(
            "@font-face {{\n    font-family: \"{}\";\n    src: url('{}') format('truetype');\n}}",
            self.family, self.source
        )
    }
}
