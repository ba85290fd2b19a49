//! Support crate for the stilo CSS parser.
//!
//! This crate holds the pieces that sit below the tokenizer: the
//! preprocessed character stream with source-location tracking, and the
//! byte-stream decoder that turns raw stylesheet bytes into text.

pub mod char_stream;
pub mod encoding;
