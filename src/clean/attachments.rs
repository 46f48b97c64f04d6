//! Attachment extraction.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, StashError};
use crate::model::attachment::AttachmentRecord;
use crate::model::message::{Body, Disposition, RawMessage};

/// Write a message's attachments into `dir` and report what was saved.
///
/// Only multipart parts explicitly marked `Content-Disposition:
/// attachment` that carry a filename are saved; inline parts and
/// unnamed blobs are skipped. Files keep their original names, so a
/// later message reusing a name overwrites the earlier file. Records
/// come back in message order.
pub fn save_attachments(message: &RawMessage, dir: &Path) -> Result<Vec<AttachmentRecord>> {
    let parts = match &message.body {
        Body::Single(_) => return Ok(Vec::new()),
        Body::Multi(parts) => parts,
    };

    let mut records = Vec::new();
    for part in parts {
        if part.disposition != Some(Disposition::Attachment) {
            continue;
        }
        let Some(filename) = &part.filename else {
            continue;
        };
        let target = dir.join(filename);
        fs::write(&target, &part.bytes).map_err(|e| StashError::io(&target, e))?;
        debug!(
            filename = filename.as_str(),
            size = part.bytes.len(),
            "Saved attachment"
        );
        records.push(AttachmentRecord {
            filename: filename.clone(),
            content_type: part.content_type.clone(),
            size: part.bytes.len() as u64,
        });
    }
    Ok(records)
}
