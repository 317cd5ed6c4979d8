mod entry;
mod track;
mod video_id;

pub use entry::{concatenate, TranscriptEntry};
pub use track::{CaptionTrack, ASR_KIND};
pub use video_id::{VideoId, VIDEO_ID_LEN};
