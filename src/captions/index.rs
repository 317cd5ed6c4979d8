use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::scan::{object_after, ScanError};
use crate::{
    error::{Error, Result},
    types::{CaptionTrack, VideoId, ASR_KIND},
};

/// Start of the caption index inside the watch page
pub const CAPTIONS_MARKER: &str = r#""captions":"#;
const RENDERER_KEY: &str = "playerCaptionsTracklistRenderer";
const TRACKS_KEY: &str = "captionTracks";

/// Anything shorter cannot hold a renderer and is a partial match
const MIN_INDEX_LEN: usize = 10;

/// Extract the caption tracks listed in a watch page.
///
/// A page without any caption index is reported as [`Error::VideoUnavailable`]:
/// removed, private and nonexistent videos all render that way.
///
/// The returned list keeps the page order and may be empty.
pub fn extract_tracks(page: &str, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
    let index = object_after(page, CAPTIONS_MARKER).map_err(|err| match err {
        ScanError::MarkerNotFound => Error::VideoUnavailable {
            video_id: video_id.to_string(),
        },
        ScanError::NoOpeningBrace => Error::malformed_index("no object follows the captions field"),
        ScanError::Unbalanced => Error::malformed_index("unbalanced braces in the captions object"),
    })?;

    trace!("caption index is {} bytes long", index.len());
    if index.len() < MIN_INDEX_LEN {
        return Err(Error::malformed_index(format!(
            "captions object is too short: {index}"
        )));
    }

    let json: Value = serde_json::from_str(index)
        .map_err(|err| Error::malformed_index(format!("invalid JSON: {err}")))?;

    let tracks = json
        .get(RENDERER_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| Error::malformed_index(format!("'{RENDERER_KEY}' not found")))?
        .get(TRACKS_KEY)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            Error::malformed_index(format!("'{TRACKS_KEY}' not found in '{RENDERER_KEY}'"))
        })?;

    let tracks: Vec<CaptionTrack> = tracks
        .iter()
        .filter_map(|track| {
            let parsed = track.as_object().and_then(parse_track);
            if parsed.is_none() {
                debug!("Skipping ill-formed caption track: {track}");
            }
            parsed
        })
        .collect();

    debug!("{} caption tracks found for video {video_id}", tracks.len());
    Ok(tracks)
}

/// Build a track out of one `captionTracks` element.
/// Return `None` when the element has no usable `baseUrl`.
fn parse_track(track: &Map<String, Value>) -> Option<CaptionTrack> {
    let get_str = |key: &str| track.get(key).and_then(Value::as_str).unwrap_or_default();

    let base_url = get_str("baseUrl");
    if base_url.is_empty() {
        return None;
    }

    Some(CaptionTrack {
        base_url: base_url.to_owned(),
        language_code: get_str("languageCode").to_owned(),
        language: track.get("name").map(display_name).unwrap_or_default(),
        is_generated: get_str("kind") == ASR_KIND,
    })
}

/// `name` is either `{"simpleText": ...}` or `{"runs": [{"text": ...}, ...]}`.
/// Runs are joined back into a single name.
fn display_name(name: &Value) -> String {
    if let Some(text) = name.get("simpleText").and_then(Value::as_str) {
        return text.to_owned();
    }

    name.get("runs")
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}
