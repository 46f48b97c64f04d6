//! Raw message parsing: `.eml` files into the [`crate::model`] types.

pub mod eml;
