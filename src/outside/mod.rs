#[cfg(test)]
pub(crate) mod fake;
mod http;

pub use http::{
    watch_url, HttpFetcher, HttpOptions, DEFAULT_ACCEPT_LANGUAGE, DEFAULT_USER_AGENT, WATCH_URL,
};

use crate::{
    error::Result,
    types::{CaptionTrack, VideoId},
};

/// Interface for retrieving the documents the pipeline reads
pub trait Fetch: Send + Sync {
    /// Get the raw HTML of the video watch page.
    ///
    /// Every failure, whatever its cause, is reported as
    /// [`Error::VideoUnavailable`](crate::Error::VideoUnavailable).
    fn watch_page(&self, video_id: &VideoId) -> Result<String>;

    /// Get the timed-text document of a caption track.
    fn timed_text(&self, track: &CaptionTrack) -> Result<String>;
}
