use std::{fmt::Display, ops::Deref, str::FromStr};

use serde::Serialize;
use url::Url;

use crate::error::Error;

/// Length of every video ID handed out by the platform
pub const VIDEO_ID_LEN: usize = 11;

const WATCH_MARKER: &str = "youtube.com/watch";
const SHORT_MARKER: &str = "youtu.be/";
const VIDEO_PARAM: &str = "v";

/// Identifier of a video on the platform.
///
/// The value is not validated on construction: a blank ID is representable and
/// is rejected by the page fetcher before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize user input into a video ID.
    ///
    /// Accepted shapes, tested in this order:
    /// - a bare ID (exactly [`VIDEO_ID_LEN`] bytes, no `/` nor `.`)
    /// - a watch-page URL carrying the ID in its `v` query parameter
    /// - a short link `youtu.be/<id>`, optionally followed by `?<query>`
    ///
    /// Anything else is not guessed at and returns `None`.
    pub fn resolve(input: &str) -> Option<Self> {
        if input.len() == VIDEO_ID_LEN && !input.contains(['/', '.']) {
            return Some(Self::new(input));
        }

        if input.contains(WATCH_MARKER) {
            if let Some(id) = watch_url_param(input) {
                return Some(Self(id));
            }
        }

        if input.contains(SHORT_MARKER) {
            let parts: Vec<&str> = input.split(SHORT_MARKER).collect();
            if let [_, tail] = parts.as_slice() {
                let id = tail.split('?').next().unwrap_or_default();
                if !id.is_empty() {
                    return Some(Self::new(id));
                }
            }
        }

        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Extract the `v` query parameter of a watch-page URL.
/// Scheme-less inputs such as `www.youtube.com/watch?v=...` are accepted too.
/// Percent-decoded control characters make the parameter unusable.
fn watch_url_param(input: &str) -> Option<String> {
    let url = Url::parse(input)
        .or_else(|_| Url::parse(&format!("https://{input}")))
        .ok()?;

    url.query_pairs()
        .find(|(key, _)| key == VIDEO_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty() && !value.contains(char::is_control))
}

impl FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| Error::UnrecognizedInput {
            input: s.to_owned(),
        })
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for VideoId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
