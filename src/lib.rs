//! `mailstash` — archive Gmail messages as tidy local text files.
//!
//! This crate provides the core library for parsing raw `.eml` files,
//! normalizing their headers, extracting attachments, and writing
//! cleaned plain-text documents into a local archive.

pub mod clean;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod purge;
