use std::fmt::Display;

use serde::Serialize;

/// Value of the `kind` field marking a track produced by speech recognition
pub const ASR_KIND: &str = "asr";

/// One caption stream of a video, as listed by the watch page caption index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionTrack {
    /// URL of the timed-text document. Never empty.
    pub base_url: String,
    /// e.g. "en", "en-US"
    pub language_code: String,
    /// Human-readable language name, e.g. "English (auto-generated)"
    pub language: String,
    pub is_generated: bool,
}

impl Display for CaptionTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<8} {}", self.language_code, self.language)?;
        if self.is_generated {
            write!(f, " [auto-generated]")?;
        }
        Ok(())
    }
}
