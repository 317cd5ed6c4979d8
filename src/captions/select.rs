use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{CaptionTrack, VideoId},
};

/// Language code prefix preferred when no language is requested
pub const DEFAULT_LANGUAGE_PREFIX: &str = "en";

/// How to pick one track among the ones a video offers
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// First English track (any regional variant), else the first track
    #[default]
    PreferEnglish,
    /// First track whose language code starts with the given code.
    /// No fallback.
    Language(String),
}

impl Selection {
    pub fn from_language(language: Option<String>) -> Self {
        language.map_or(Self::PreferEnglish, Self::Language)
    }

    /// Pick a track according to the policy.
    pub fn select<'a>(
        &self,
        tracks: &'a [CaptionTrack],
        video_id: &VideoId,
    ) -> Result<&'a CaptionTrack> {
        let first = tracks.first().ok_or_else(|| Error::NoTranscriptFound {
            video_id: video_id.to_string(),
        })?;

        let track = match self {
            Selection::PreferEnglish => {
                find_prefixed(tracks, DEFAULT_LANGUAGE_PREFIX).unwrap_or(first)
            }
            Selection::Language(language) => find_prefixed(tracks, language).ok_or_else(|| {
                Error::RequestedLanguageUnavailable {
                    video_id: video_id.to_string(),
                    language: language.clone(),
                    available: tracks.iter().map(|t| t.language_code.clone()).collect(),
                }
            })?,
        };

        debug!("Selected track '{}' for video {video_id}", track.language_code);
        Ok(track)
    }
}

fn find_prefixed<'a>(tracks: &'a [CaptionTrack], prefix: &str) -> Option<&'a CaptionTrack> {
    tracks.iter().find(|t| t.language_code.starts_with(prefix))
}
