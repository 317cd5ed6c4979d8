use serde::Serialize;

/// One timed caption unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptEntry {
    pub text: String,
    /// Offset from the beginning of the video, in seconds
    pub start: f64,
    /// In seconds
    pub duration: f64,
}

/// Join the entries text with newlines, without a trailing separator
pub fn concatenate(entries: &[TranscriptEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, start: f64) -> TranscriptEntry {
        TranscriptEntry {
            text: text.to_owned(),
            start,
            duration: 1.0,
        }
    }

    #[test]
    fn concatenate_joins_with_newlines() {
        let entries = [entry("a", 0.0), entry("b", 1.0), entry("c", 2.0)];
        assert_eq!(concatenate(&entries), "a\nb\nc");
    }

    #[test]
    fn concatenate_edge_cases() {
        assert_eq!(concatenate(&[]), "");
        assert_eq!(concatenate(&[entry("only", 0.0)]), "only");
    }
}
