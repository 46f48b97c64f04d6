//! Body text extraction and cleanup.

use tracing::warn;

use crate::model::message::{Body, Part, RawMessage};

/// Placeholder body for messages that carry no usable text.
pub const EMPTY_BODY_PLACEHOLDER: &str =
    "This email has no text in the body. Maybe it contained only an attachment?";

/// Pull the plain-text body out of a parsed message.
///
/// Single-part messages decode their payload whatever the declared
/// content type. Multipart messages use the first `text/plain` part;
/// when none exists the result is empty and the caller substitutes
/// [`EMPTY_BODY_PLACEHOLDER`].
pub fn extract_body(message: &RawMessage) -> String {
    match &message.body {
        Body::Single(part) => decode_text(part),
        Body::Multi(parts) => parts
            .iter()
            .find(|p| p.content_type == "text/plain")
            .map(decode_text)
            .unwrap_or_default(),
    }
}

/// Decode a part's payload to a string using its declared charset.
///
/// Unknown charset labels fall back to lossy UTF-8 rather than failing
/// the whole message.
fn decode_text(part: &Part) -> String {
    match part.charset.as_deref() {
        None | Some("utf-8") | Some("utf8") => String::from_utf8_lossy(&part.bytes).into_owned(),
        Some(label) => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(encoding) => {
                let (text, _, _) = encoding.decode(&part.bytes);
                text.into_owned()
            }
            None => {
                warn!(charset = label, "Unknown charset, decoding as UTF-8");
                String::from_utf8_lossy(&part.bytes).into_owned()
            }
        },
    }
}

/// Cut a trailing quoted reply off a body.
///
/// Gmail-style replies open with a line like
/// `On Mon, Jul 1, 2013 at 9:00 AM, Ada <ada@example.com> wrote:`.
/// Everything from the first such line onward is dropped; the newline
/// that ended the kept text stays, so the body still terminates cleanly.
pub fn strip_quoted_reply(body: &str) -> &str {
    match body.find("\nOn ") {
        Some(pos) => &body[..pos + 1],
        None => body,
    }
}
