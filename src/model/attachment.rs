//! Attachment records.

/// Record of one attachment written to disk.
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    /// Filename as declared by the sender, used verbatim on disk.
    pub filename: String,

    /// MIME content type (e.g. `"image/png"`, `"application/pdf"`).
    pub content_type: String,

    /// Decoded size in bytes.
    pub size: u64,
}
