//! Core data model types for raw messages, MIME parts, and attachments.

pub mod attachment;
pub mod message;
