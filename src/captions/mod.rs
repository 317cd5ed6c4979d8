mod index;
pub mod scan;
mod select;

pub use index::{extract_tracks, CAPTIONS_MARKER};
pub use select::{Selection, DEFAULT_LANGUAGE_PREFIX};
