use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The watch page could not be retrieved, answered with a non-success
    /// status, or did not contain any caption index at all.
    #[error("Video {video_id} is unavailable")]
    #[diagnostic(
        code(yt_words::video_unavailable),
        help("check that the video exists and is public")
    )]
    VideoUnavailable { video_id: String },

    /// Captions are explicitly turned off for the video.
    ///
    /// The watch page does not currently let us tell this apart from a missing
    /// video, so the extraction never produces it.
    #[error("Transcripts are disabled for video {video_id}")]
    #[diagnostic(code(yt_words::transcripts_disabled))]
    TranscriptsDisabled { video_id: String },

    #[error("No transcript found for video {video_id}")]
    #[diagnostic(code(yt_words::no_transcript))]
    NoTranscriptFound { video_id: String },

    #[error(
        "No transcript found for video {video_id} in language '{language}' (available: {})",
        .available.join(", ")
    )]
    #[diagnostic(code(yt_words::language_unavailable))]
    RequestedLanguageUnavailable {
        video_id: String,
        language: String,
        available: Vec<String>,
    },

    #[error("Malformed caption index: {reason}")]
    #[diagnostic(
        code(yt_words::malformed_caption_index),
        help("the watch page layout may have changed")
    )]
    MalformedCaptionIndex { reason: String },

    #[error("Malformed timed-text document: {reason}")]
    #[diagnostic(code(yt_words::malformed_transcript))]
    MalformedTranscriptDocument { reason: String },

    #[error("Could not retrieve the timed-text document at {url}")]
    #[diagnostic(code(yt_words::timed_text_unavailable))]
    TimedTextUnavailable {
        url: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("'{input}' is neither a video ID nor a recognized video URL")]
    #[diagnostic(code(yt_words::unrecognized_input))]
    UnrecognizedInput { input: String },

    #[error("Could not build the HTTP client")]
    #[diagnostic(code(yt_words::http_client))]
    HttpClient(#[source] reqwest::Error),

    #[error("Invalid settings")]
    #[diagnostic(code(yt_words::config))]
    Config(#[from] config::ConfigError),

    #[error("Could not start a worker thread")]
    #[diagnostic(code(yt_words::spawn))]
    Spawn(#[source] std::io::Error),
}

impl Error {
    pub(crate) fn malformed_index(reason: impl Into<String>) -> Self {
        Error::MalformedCaptionIndex {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_document(reason: impl Into<String>) -> Self {
        Error::MalformedTranscriptDocument {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
