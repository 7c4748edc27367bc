//! Basic I/O helpers for PA-TNC attribute values
//!
//! All multi-byte fields are big-endian. Variable-length fields carry a
//! 16-bit length prefix.

pub mod reader;
pub mod writer;

pub use reader::BioReader;
pub use writer::BioWriter;
