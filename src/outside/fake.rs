//! In-memory [`Fetch`] implementation for tests

use std::{collections::HashMap, sync::Mutex};

use serde_json::json;

use super::Fetch;
use crate::{
    error::{Error, Result},
    types::{CaptionTrack, VideoId},
};

#[derive(Debug, Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    documents: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with_page(mut self, video_id: &str, page: impl Into<String>) -> Self {
        self.pages.insert(video_id.to_owned(), page.into());
        self
    }

    pub fn with_document(mut self, url: &str, document: impl Into<String>) -> Self {
        self.documents.insert(url.to_owned(), document.into());
        self
    }

    /// Register a video whose page lists one track per `(language code, document)`.
    /// Track URLs are `https://timedtext.test/<video_id>/<language code>`.
    pub fn with_video(mut self, video_id: &str, tracks: &[(&str, &str)]) -> Self {
        let urls: Vec<String> = tracks
            .iter()
            .map(|(language, _)| track_url(video_id, language))
            .collect();
        let languages: Vec<&str> = tracks.iter().map(|(language, _)| *language).collect();

        self = self.with_page(video_id, page_with_tracks(&urls, &languages));
        for (url, (_, document)) in urls.iter().zip(tracks) {
            self = self.with_document(url, *document);
        }
        self
    }

    /// Every URL or video ID requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, request: &str) {
        self.requests.lock().unwrap().push(request.to_owned());
    }
}

impl Fetch for FakeFetcher {
    fn watch_page(&self, video_id: &VideoId) -> Result<String> {
        self.record(video_id);
        self.pages
            .get(video_id.as_str())
            .cloned()
            .ok_or_else(|| Error::VideoUnavailable {
                video_id: video_id.to_string(),
            })
    }

    fn timed_text(&self, track: &CaptionTrack) -> Result<String> {
        self.record(&track.base_url);
        self.documents
            .get(&track.base_url)
            .cloned()
            .ok_or_else(|| Error::TimedTextUnavailable {
                url: track.base_url.clone(),
                source: None,
            })
    }
}

pub fn track_url(video_id: &str, language: &str) -> String {
    format!("https://timedtext.test/{video_id}/{language}")
}

/// A minimal watch page embedding a caption index
pub fn page_with_tracks(urls: &[String], languages: &[&str]) -> String {
    let tracks: Vec<_> = urls
        .iter()
        .zip(languages)
        .map(|(url, language)| {
            let kind = if language.ends_with("-asr") { "asr" } else { "" };
            json!({
                "baseUrl": url,
                "name": { "simpleText": format!("Language {language}") },
                "languageCode": language,
                "kind": kind,
                "isTranslatable": true,
            })
        })
        .collect();

    let player_response = json!({
        "playabilityStatus": { "status": "OK" },
        "captions": {
            "playerCaptionsTracklistRenderer": {
                "captionTracks": tracks,
                "audioTracks": [{ "captionTrackIndices": [0] }],
            }
        },
        "videoDetails": { "title": "A video {with braces}" },
    });

    format!(
        "<!DOCTYPE html><html><body><script>var ytInitialPlayerResponse = {player_response};</script></body></html>"
    )
}

/// A timed-text document with one cue per text, one second each
pub fn document(texts: &[&str]) -> String {
    let cues: String = texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!(r#"<text start="{i}" dur="1">{text}</text>"#))
        .collect();
    format!(r#"<?xml version="1.0" encoding="utf-8" ?><transcript>{cues}</transcript>"#)
}
