//! Parser for raw `.eml` files (bare RFC 5322 messages, as saved by the
//! fetch step).
//!
//! Message structure and transfer decoding are delegated to `mailparse`;
//! this module reshapes its part tree into [`RawMessage`]. Multipart
//! containers are descended into depth-first, so the leaves of a nested
//! `multipart/alternative` inside a `multipart/mixed` land in the flat
//! part list in document order. Charset decoding of text payloads is left
//! to the caller: parts carry transfer-decoded bytes, not strings.

use std::path::Path;

use mailparse::{DispositionType, MailHeaderMap, ParsedMail};

use crate::error::{Result, StashError};
use crate::model::message::{Body, Disposition, Part, RawMessage};

/// Parse a raw `.eml` file into a [`RawMessage`].
pub fn parse_raw_file(path: impl AsRef<Path>) -> Result<RawMessage> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StashError::FileNotFound(path.to_path_buf())
        } else {
            StashError::io(path, e)
        }
    })?;
    parse_at(path, &data)
}

/// Parse raw message bytes already in memory.
pub fn parse_raw_bytes(data: &[u8]) -> Result<RawMessage> {
    parse_at(Path::new("<memory>"), data)
}

fn parse_at(path: &Path, data: &[u8]) -> Result<RawMessage> {
    let mail = mailparse::parse_mail(data).map_err(|e| parse_err(path, e))?;

    let headers = decoded_headers(&mail);

    // The declared content type decides the shape, not whether any
    // subparts actually parsed.
    let body = if mail.ctype.mimetype.starts_with("multipart/") {
        let mut parts = Vec::new();
        collect_leaves(&mail, &mut parts).map_err(|e| parse_err(path, e))?;
        Body::Multi(parts)
    } else {
        Body::Single(leaf_part(&mail).map_err(|e| parse_err(path, e))?)
    };

    Ok(RawMessage { headers, body })
}

fn parse_err(path: &Path, e: mailparse::MailParseError) -> StashError {
    StashError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

/// Header `(lowercase_name, decoded_value)` pairs in original order.
fn decoded_headers(mail: &ParsedMail<'_>) -> Vec<(String, String)> {
    mail.headers
        .iter()
        .map(|h| (h.get_key().to_lowercase(), h.get_value()))
        .collect()
}

/// Collect the leaf parts of a multipart subtree, depth-first.
///
/// `message/rfc822` parts are treated as leaves; forwarded messages are
/// archived as attachments, not descended into.
fn collect_leaves(
    mail: &ParsedMail<'_>,
    out: &mut Vec<Part>,
) -> std::result::Result<(), mailparse::MailParseError> {
    for sub in &mail.subparts {
        if sub.ctype.mimetype.starts_with("multipart/") {
            collect_leaves(sub, out)?;
        } else {
            out.push(leaf_part(sub)?);
        }
    }
    Ok(())
}

/// Convert one leaf of the `mailparse` tree into a [`Part`].
fn leaf_part(mail: &ParsedMail<'_>) -> std::result::Result<Part, mailparse::MailParseError> {
    let content_type = mail.ctype.mimetype.clone();

    // ctype.charset defaults to "us-ascii" when undeclared; only the
    // params map distinguishes a declared charset from the default.
    let charset = mail
        .ctype
        .params
        .get("charset")
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let cd = mail.get_content_disposition();
    let disposition = mail
        .headers
        .get_first_value("content-disposition")
        .map(|_| match cd.disposition {
            DispositionType::Attachment => Disposition::Attachment,
            _ => Disposition::Inline,
        });

    let filename = cd
        .params
        .get("filename")
        .or_else(|| mail.ctype.params.get("name"))
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    let bytes = mail.get_body_raw()?;

    Ok(Part {
        content_type,
        charset,
        disposition,
        filename,
        bytes,
    })
}
