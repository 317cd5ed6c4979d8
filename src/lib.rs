//! Retrieve the transcripts of videos by reading the caption index embedded
//! in their watch page, then decoding the timed-text document of one track.
//!
//! ```no_run
//! use yt_words::{Client, VideoId};
//!
//! # fn main() -> yt_words::Result<()> {
//! let client = Client::new()?;
//! let video_id: VideoId = "https://youtu.be/VO6XEQIsCoM".parse()?;
//! println!("{}", client.transcript_string(&video_id)?);
//! # Ok(())
//! # }
//! ```

mod batch;
pub mod captions;
mod client;
mod error;
pub mod outside;
mod settings;
pub mod timedtext;
mod types;

pub use batch::BatchReport;
pub use captions::Selection;
pub use client::Client;
pub use error::{Error, Result};
pub use outside::{Fetch, HttpFetcher, HttpOptions};
pub use settings::Settings;
pub use types::{concatenate, CaptionTrack, TranscriptEntry, VideoId, ASR_KIND, VIDEO_ID_LEN};
