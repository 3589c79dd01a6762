//! weft HTML
//!
//! Parses response bodies into detached `weft-dom` documents.

mod parser;

pub use parser::{parse, parse_with_url};
