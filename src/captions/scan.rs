//! Locate a JSON object embedded in a larger text (HTML, inline scripts)
//! when nothing but its balanced braces marks where it ends.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The marker does not appear in the text
    MarkerNotFound,
    /// No `{` follows the marker
    NoOpeningBrace,
    /// The text ends before the braces balance
    Unbalanced,
}

/// Return the JSON object starting at the first `{` following the first
/// occurrence of `marker`, up to and including its matching `}`.
///
/// Braces inside JSON string literals (escape sequences included) do not count.
pub fn object_after<'a>(text: &'a str, marker: &str) -> Result<&'a str, ScanError> {
    let marker_pos = text.find(marker).ok_or(ScanError::MarkerNotFound)?;
    let open = text[marker_pos..]
        .find('{')
        .map(|offset| marker_pos + offset)
        .ok_or(ScanError::NoOpeningBrace)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[open..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    // Both ends are ASCII so the slice is on char boundaries
                    return Ok(&text[open..=open + offset]);
                }
            }
            _ => {}
        }
    }

    Err(ScanError::Unbalanced)
}
