//! Email cleaning pipeline.
//!
//! Turns a raw `.eml` file into a readable text document named after
//! the message's date and subject, extracting attachments along the
//! way. Each step shrugs off bad input instead of failing the message:
//! unparseable dates become `Unknown`, empty subjects become `None`,
//! and bodies that decode to nothing get a placeholder.

pub mod attachments;
pub mod body;
pub mod date;
pub mod document;
pub mod subject;

pub use attachments::save_attachments;
pub use body::{extract_body, strip_quoted_reply, EMPTY_BODY_PLACEHOLDER};
pub use date::{normalize_date, UNKNOWN_DATE};
pub use document::{assemble_document, document_filename};
pub use subject::{slugify_subject, NO_SUBJECT};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, StashError};
use crate::model::attachment::AttachmentRecord;
use crate::parser::eml::parse_raw_file;

/// What cleaning one message produced.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// Path of the cleaned text document.
    pub document_path: PathBuf,
    /// Attachments saved, in message order.
    pub attachments: Vec<AttachmentRecord>,
}

/// Clean one raw email file into `clean_dir`, saving attachments into
/// `attachments_dir`.
pub fn process(raw_file: &Path, clean_dir: &Path, attachments_dir: &Path) -> Result<CleanOutcome> {
    process_with_id(raw_file, clean_dir, attachments_dir, None)
}

/// Like [`process`], with a message id appended to the document name so
/// same-day messages with identical subjects cannot clobber each other.
pub fn process_with_id(
    raw_file: &Path,
    clean_dir: &Path,
    attachments_dir: &Path,
    message_id: Option<&str>,
) -> Result<CleanOutcome> {
    let message = parse_raw_file(raw_file)?;

    let date = normalize_date(message.header("date"));
    let slug = slugify_subject(message.header("subject"));

    let attachments = save_attachments(&message, attachments_dir)?;

    let body = extract_body(&message);
    let body = if body.is_empty() {
        EMPTY_BODY_PLACEHOLDER.to_string()
    } else {
        body
    };
    let body = strip_quoted_reply(&body);

    let doc = assemble_document(
        &date,
        message.header("subject"),
        message.header("to"),
        message.header("from"),
        &attachments,
        body,
    );
    let document_path = clean_dir.join(document_filename(&date, &slug, message_id));
    fs::write(&document_path, doc).map_err(|e| StashError::io(&document_path, e))?;

    info!(
        document = %document_path.display(),
        attachments = attachments.len(),
        "Cleaned message"
    );

    Ok(CleanOutcome {
        document_path,
        attachments,
    })
}
