//! Error types for the attribute codecs

pub use swima_core::error::{SwimaError, SwimaResult};
