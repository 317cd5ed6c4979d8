//! Decoding of the XML timed-text documents served for each caption track:
//!
//! ```xml
//! <transcript>
//!     <text start="0.21" dur="2.34">it&amp;#39;s here</text>
//!     ...
//! </transcript>
//! ```
//!
//! The cue text is escaped twice: once as XML, and once more as HTML inside it.

use std::borrow::Cow;

use html_escape::decode_html_entities;
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use tracing::trace;

use crate::{
    error::{Error, Result},
    types::TranscriptEntry,
};

const ROOT: &[u8] = b"transcript";
const CUE: &[u8] = b"text";

/// A `<text>` element being read
struct PendingCue {
    start: f64,
    duration: f64,
    text: String,
}

impl PendingCue {
    fn from_element(element: &BytesStart) -> Result<Self> {
        let mut start = 0.0;
        let mut duration = 0.0;

        for attr in element.attributes() {
            let attr = attr.map_err(|err| Error::malformed_document(err.to_string()))?;
            let target = match attr.key.as_ref() {
                b"start" => &mut start,
                b"dur" => &mut duration,
                _ => continue,
            };

            let value = String::from_utf8_lossy(&attr.value);
            *target = value.trim().parse().map_err(|_| {
                Error::malformed_document(format!(
                    "attribute '{}' is not a number: '{value}'",
                    String::from_utf8_lossy(attr.key.as_ref())
                ))
            })?;
        }

        Ok(Self {
            start,
            duration,
            text: String::new(),
        })
    }

    fn finish(self) -> TranscriptEntry {
        TranscriptEntry {
            text: decode_html_entities(&self.text).into_owned(),
            start: self.start,
            duration: self.duration,
        }
    }
}

/// Decode a timed-text document into its entries, in document order.
///
/// Timings are carried through as written: negative or zero durations are
/// left for the consumer to judge.
pub fn decode(document: &str) -> Result<Vec<TranscriptEntry>> {
    let mut reader = Reader::from_str(document);

    let mut entries = Vec::new();
    let mut root_opened = false;
    let mut root_closed = false;
    let mut pending: Option<PendingCue> = None;

    loop {
        let event = reader.read_event().map_err(|err| {
            Error::malformed_document(format!(
                "{err} (at byte {})",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(element) if !root_opened => {
                expect_root(&element)?;
                root_opened = true;
            }
            Event::Empty(element) if !root_opened => {
                // `<transcript/>`: a track without any cue
                expect_root(&element)?;
                root_opened = true;
                root_closed = true;
            }
            Event::Start(element) if element.name().as_ref() == CUE => {
                pending = Some(PendingCue::from_element(&element)?);
            }
            Event::Empty(element) if element.name().as_ref() == CUE => {
                entries.push(PendingCue::from_element(&element)?.finish());
            }
            Event::End(element) if element.name().as_ref() == CUE => {
                if let Some(cue) = pending.take() {
                    entries.push(cue.finish());
                }
            }
            Event::End(element) if element.name().as_ref() == ROOT => root_closed = true,
            Event::Text(text) => {
                if let Some(cue) = pending.as_mut() {
                    // XML level unescaping, the HTML level happens in `finish`
                    let raw = String::from_utf8_lossy(&text);
                    cue.text.push_str(&decode_html_entities(&raw));
                }
            }
            Event::CData(data) => {
                if let Some(cue) = pending.as_mut() {
                    cue.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            // Declaration, comments, and markup nested in a cue such as `<font>`
            _ => {}
        }
    }

    if !root_opened {
        return Err(Error::malformed_document("missing <transcript> element"));
    }
    if !root_closed {
        return Err(Error::malformed_document("document ends before </transcript>"));
    }

    trace!("{} entries decoded", entries.len());
    Ok(entries)
}

fn expect_root(element: &BytesStart) -> Result<()> {
    let qname = element.name();
    if qname.as_ref() == ROOT {
        Ok(())
    } else {
        let name: Cow<str> = String::from_utf8_lossy(qname.as_ref());
        Err(Error::malformed_document(format!(
            "root element is <{name}> instead of <transcript>"
        )))
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn entry(text: &str, start: f64, duration: f64) -> TranscriptEntry {
        TranscriptEntry {
            text: text.to_owned(),
            start,
            duration,
        }
    }

    #[test]
    fn decodes_entries_in_document_order() {
        let document = indoc! {r#"
            <?xml version="1.0" encoding="utf-8" ?>
            <transcript>
                <text start="12.5" dur="1.2">second in time</text>
                <text start="0.21" dur="2.34">Hello world</text>
                <text start="3" dur="4.05">multi
            line</text>
            </transcript>
        "#};

        assert_eq!(
            decode(document).unwrap(),
            vec![
                entry("second in time", 12.5, 1.2),
                entry("Hello world", 0.21, 2.34),
                entry("multi\nline", 3.0, 4.05),
            ]
        );
    }

    #[test]
    fn unescapes_entities() {
        let document = r#"<transcript><text start="0" dur="1">Tom &amp; Jerry</text><text start="1" dur="1">it&#39;s</text><text start="2" dur="1">don&amp;#39;t &amp;quot;quote&amp;quot; &lt;3</text></transcript>"#;

        let texts: Vec<String> = decode(document)
            .unwrap()
            .into_iter()
            .map(|entry| entry.text)
            .collect();
        assert_eq!(texts, ["Tom & Jerry", "it's", r#"don't "quote" <3"#]);
    }

    #[test]
    fn cdata_and_nested_markup() {
        let document = r##"<transcript><text start="0" dur="1"><![CDATA[a & b]]></text><text start="1" dur="1"><font color="#fff">styled</font> text</text></transcript>"##;

        let texts: Vec<String> = decode(document)
            .unwrap()
            .into_iter()
            .map(|entry| entry.text)
            .collect();
        assert_eq!(texts, ["a & b", "styled text"]);
    }

    #[test]
    fn timings_are_not_validated() {
        let document = r#"<transcript><text start="-1.5" dur="0">odd</text><text>no timing</text><text start="4" dur="1"/></transcript>"#;

        assert_eq!(
            decode(document).unwrap(),
            vec![
                entry("odd", -1.5, 0.0),
                entry("no timing", 0.0, 0.0),
                entry("", 4.0, 1.0),
            ]
        );
    }

    #[test]
    fn empty_transcripts() {
        assert_eq!(decode("<transcript></transcript>").unwrap(), vec![]);
        assert_eq!(decode(r#"<?xml version="1.0"?><transcript/>"#).unwrap(), vec![]);
    }

    #[test]
    fn malformed_documents() {
        let cases = [
            "",
            "not xml at all",
            "<timedtext><text start=\"0\" dur=\"1\">a</text></timedtext>",
            "<transcript><text start=\"0\" dur=\"1\">a</txt></transcript>",
            "<transcript><text start=\"zero\" dur=\"1\">a</text></transcript>",
            "<transcript><text start=\"0\" dur=\"1\">truncated",
        ];

        for document in cases {
            assert!(
                matches!(
                    decode(document),
                    Err(Error::MalformedTranscriptDocument { .. })
                ),
                "document should be rejected: {document:?}"
            );
        }
    }
}
