use tracing::{debug, info};

use crate::{
    captions::{extract_tracks, Selection},
    error::{Error, Result},
    outside::{Fetch, HttpFetcher, HttpOptions},
    timedtext,
    types::{concatenate, CaptionTrack, TranscriptEntry, VideoId},
};

/// Entry point for retrieving transcripts.
///
/// Every retrieval is done from scratch: the watch page is fetched, its caption
/// index parsed, a track selected, and the track's timed-text document decoded.
/// Nothing is cached between calls.
///
/// The client is read-only once built and can be shared between threads.
#[derive(Debug, Clone)]
pub struct Client<F = HttpFetcher> {
    fetcher: F,
}

impl Client<HttpFetcher> {
    /// Client with the default HTTP settings and no proxy
    pub fn new() -> Result<Self> {
        Self::with_options(&HttpOptions::default())
    }

    pub fn with_options(options: &HttpOptions) -> Result<Self> {
        Ok(Self::from_fetcher(HttpFetcher::new(options)?))
    }
}

impl<F: Fetch> Client<F> {
    pub fn from_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// List every caption track of the video, without fetching any of them.
    pub fn list_transcripts(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let page = self.fetch_page(video_id)?;
        extract_tracks(&page, video_id)
    }

    /// Get the transcript of the video, in English if available,
    /// else in the language of its first track.
    pub fn transcript(&self, video_id: &VideoId) -> Result<Vec<TranscriptEntry>> {
        self.transcript_with(video_id, &Selection::PreferEnglish)
    }

    /// Get the transcript of the video in the given language.
    ///
    /// Any track whose language code starts with `language` matches,
    /// so "en" also selects "en-GB".
    pub fn transcript_with_language(
        &self,
        video_id: &VideoId,
        language: &str,
    ) -> Result<Vec<TranscriptEntry>> {
        self.transcript_with(video_id, &Selection::Language(language.to_owned()))
    }

    /// Same as [`Self::transcript`], with the entries text joined by newlines.
    pub fn transcript_string(&self, video_id: &VideoId) -> Result<String> {
        Ok(concatenate(&self.transcript(video_id)?))
    }

    pub fn transcript_with(
        &self,
        video_id: &VideoId,
        selection: &Selection,
    ) -> Result<Vec<TranscriptEntry>> {
        let tracks = self.list_transcripts(video_id)?;
        let track = selection.select(&tracks, video_id)?;
        self.fetch_track(track)
    }

    /// Fetch and decode the timed-text document of one track.
    pub fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptEntry>> {
        let document = self.fetcher.timed_text(track)?;
        let entries = timedtext::decode(&document)?;
        info!(
            "{} entries in the '{}' transcript",
            entries.len(),
            track.language_code
        );
        Ok(entries)
    }

    fn fetch_page(&self, video_id: &VideoId) -> Result<String> {
        if video_id.is_blank() {
            debug!("Blank video ID, not fetching anything");
            return Err(Error::VideoUnavailable {
                video_id: video_id.to_string(),
            });
        }

        self.fetcher.watch_page(video_id)
    }
}
