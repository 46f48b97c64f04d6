//! Raw message and MIME part types.

/// A parsed raw email message: decoded headers plus MIME content.
///
/// Constructed once per raw file by the parser, read-only afterwards.
#[derive(Debug, Clone)]
pub struct RawMessage {
    /// Header `(name, value)` pairs in original order. Names are lowercase;
    /// values have RFC 2047 encoded-words resolved.
    pub headers: Vec<(String, String)>,

    /// Message content.
    pub body: Body,
}

impl RawMessage {
    /// First value for a header name, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Message content: a single part, or the flattened leaves of a multipart
/// tree in document order.
#[derive(Debug, Clone)]
pub enum Body {
    Single(Part),
    Multi(Vec<Part>),
}

/// One MIME leaf part with its transfer-decoded payload.
#[derive(Debug, Clone)]
pub struct Part {
    /// Lowercase MIME type (e.g. `"text/plain"`, `"application/pdf"`).
    pub content_type: String,

    /// Charset declared on the Content-Type, if any.
    pub charset: Option<String>,

    /// Parsed Content-Disposition; `None` when the header is absent.
    pub disposition: Option<Disposition>,

    /// Declared filename (disposition `filename` param, else the
    /// content-type `name` param).
    pub filename: Option<String>,

    /// Transfer-decoded content bytes.
    pub bytes: Vec<u8>,
}

/// Content-Disposition of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}
