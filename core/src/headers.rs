//! Response header-block parsing.
//!
//! # Design
//! The transport hands back the header block exactly as it came off the
//! wire, one line per header. Parsing is a line-by-line split on the first
//! colon: repeated names collapse into an ordered sequence, tab-prefixed
//! lines continue the previous header's value, and a bare line before any
//! named header (the HTTP status line) is kept under the synthetic key
//! `"0"`. Every extracted value is whitespace-trimmed.

/// Value of a parsed header: a single value, or the ordered repeats of a
/// header name that occurred more than once (first-seen order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Single(String),
    Sequence(Vec<String>),
}

impl HeaderValue {
    /// The first (or only) value.
    pub fn first(&self) -> &str {
        match self {
            HeaderValue::Single(value) => value,
            HeaderValue::Sequence(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            HeaderValue::Single(_) => 1,
            HeaderValue::Sequence(values) => values.len(),
        }
    }
}

/// Parsed response headers, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, HeaderValue)>,
}

impl Headers {
    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// The HTTP status line, when the block started with one.
    pub fn status_line(&self) -> Option<&str> {
        self.get("0").map(HeaderValue::first)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Record one `name: value` line. A repeated name turns its entry into
    /// a sequence; further repeats append to it.
    fn push(&mut self, name: &str, value: String) {
        match self.entries.iter().position(|(n, _)| n == name) {
            Some(index) => match &mut self.entries[index].1 {
                HeaderValue::Single(existing) => {
                    let first = std::mem::take(existing);
                    self.entries[index].1 = HeaderValue::Sequence(vec![first, value]);
                }
                HeaderValue::Sequence(values) => values.push(value),
            },
            None => self
                .entries
                .push((name.to_string(), HeaderValue::Single(value))),
        }
    }

    /// Append a folded continuation line to `name`'s value (to the last
    /// element when that value is already a sequence).
    fn continue_value(&mut self, name: &str, text: &str) {
        if let Some((_, value)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            let target = match value {
                HeaderValue::Single(existing) => existing,
                HeaderValue::Sequence(values) => match values.last_mut() {
                    Some(last) => last,
                    None => return,
                },
            };
            target.push_str("\r\n\t");
            target.push_str(text);
        }
    }

    /// Store (or overwrite) the synthetic status-line entry.
    fn set_status_line(&mut self, value: String) {
        match self.entries.iter_mut().find(|(n, _)| n == "0") {
            Some((_, existing)) => *existing = HeaderValue::Single(value),
            None => self.entries.push(("0".to_string(), HeaderValue::Single(value))),
        }
    }
}

/// Parse a raw header block (CRLF or LF separated lines) into [`Headers`].
pub fn parse_header_block(raw: &str) -> Headers {
    let mut headers = Headers::default();
    let mut last_name: Option<String> = None;

    for line in raw.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        match line.split_once(':') {
            Some((name, value)) => {
                headers.push(name, value.trim().to_string());
                last_name = Some(name.to_string());
            }
            None => {
                if let Some(rest) = line.strip_prefix('\t') {
                    if let Some(name) = &last_name {
                        headers.continue_value(name, rest.trim());
                    }
                } else if last_name.is_none() {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        headers.set_status_line(trimmed.to_string());
                    }
                }
            }
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_headers_are_trimmed() {
        let headers = parse_header_block("Content-Type:  text/html \nServer: axum\n");
        assert_eq!(
            headers.get("Content-Type"),
            Some(&HeaderValue::Single("text/html".to_string()))
        );
        assert_eq!(
            headers.get("Server"),
            Some(&HeaderValue::Single("axum".to_string()))
        );
    }

    #[test]
    fn repeated_name_collapses_to_ordered_sequence() {
        let headers = parse_header_block("Set-Cookie: a=1\nSet-Cookie: b=2\n");
        assert_eq!(
            headers.get("Set-Cookie"),
            Some(&HeaderValue::Sequence(vec![
                "a=1".to_string(),
                "b=2".to_string()
            ]))
        );
    }

    #[test]
    fn third_repeat_appends_to_existing_sequence() {
        let headers = parse_header_block("Set-Cookie: a=1\nSet-Cookie: b=2\nSet-Cookie: c=3\n");
        assert_eq!(headers.get("Set-Cookie").unwrap().count(), 3);
    }

    #[test]
    fn status_line_lands_under_synthetic_key() {
        let headers = parse_header_block("HTTP/1.1 200 OK\r\nServer: axum\r\n");
        assert_eq!(headers.status_line(), Some("HTTP/1.1 200 OK"));
        assert_eq!(headers.get("0").unwrap().first(), "HTTP/1.1 200 OK");
    }

    #[test]
    fn tab_continuation_extends_previous_value() {
        let headers = parse_header_block("X-Long: first part\n\tsecond part\n");
        assert_eq!(
            headers.get("X-Long").unwrap().first(),
            "first part\r\n\tsecond part"
        );
    }

    #[test]
    fn continuation_after_repeat_extends_last_element() {
        let headers = parse_header_block("Warning: one\nWarning: two\n\tmore\n");
        assert_eq!(
            headers.get("Warning"),
            Some(&HeaderValue::Sequence(vec![
                "one".to_string(),
                "two\r\n\tmore".to_string()
            ]))
        );
    }

    #[test]
    fn crlf_and_lf_parse_identically() {
        let crlf = parse_header_block("HTTP/1.1 200 OK\r\nA: 1\r\nB: 2\r\n\r\n");
        let lf = parse_header_block("HTTP/1.1 200 OK\nA: 1\nB: 2\n\n");
        assert_eq!(crlf, lf);
    }

    #[test]
    fn value_with_colon_splits_on_first_colon_only() {
        let headers = parse_header_block("Location: http://example.test/x\n");
        assert_eq!(
            headers.get("Location").unwrap().first(),
            "http://example.test/x"
        );
    }

    #[test]
    fn empty_block_parses_to_empty_headers() {
        assert!(parse_header_block("").is_empty());
    }
}
