//! PA-TNC attribute contract
//!
//! The outer message layer owns attribute headers, segmentation and
//! reassembly timeouts. It talks to every attribute codec through the
//! [`PaTncAttr`] trait:
//!
//! - Sending: set the fields, call [`PaTncAttr::build`] and hand
//!   [`PaTncAttr::value`] to the message writer.
//! - Receiving: create the attribute from the declared length and the
//!   first chunk, call [`PaTncAttr::process`], and on
//!   [`ProcessStatus::NeedMore`] feed further bytes through
//!   [`PaTncAttr::add_segment`] before processing again.

use crate::error::SwimaResult;
use bytes::Bytes;
use std::any::Any;
use std::fmt;
use swima_core::PenType;

/// Non-failing outcome of [`PaTncAttr::process`]
///
/// A failed decode is reported as `Err`, carrying the number of bytes
/// consumed before the failure (see [`swima_core::SwimaError::offset`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Decoding made progress or finished
    Success,
    /// More value bytes are required before decoding can continue
    NeedMore,
}

/// Capability set shared by all PA-TNC attribute codecs
///
/// Handles are reference counted. [`PaTncAttr::get_ref`] returns another
/// handle to the same attribute: segments added, entries processed or
/// flags set through one handle are seen through every other. Dropping a
/// handle releases its reference and the last one frees the value buffer
/// and the contained software identities.
pub trait PaTncAttr: fmt::Debug + Send + Sync {
    /// Get the vendor-specific attribute type
    fn attr_type(&self) -> PenType;

    /// Get the encoded attribute value, or the not yet processed remainder
    fn value(&self) -> Bytes;

    /// Get the noskip flag
    fn noskip_flag(&self) -> bool;

    /// Set the noskip flag
    fn set_noskip_flag(&mut self, noskip: bool);

    /// Encode the attribute value
    ///
    /// Encodes at most once; later calls leave the cached value untouched.
    fn build(&mut self);

    /// Decode the attribute value received so far
    fn process(&mut self) -> SwimaResult<ProcessStatus>;

    /// Append a further segment of the attribute value
    fn add_segment(&mut self, segment: &[u8]);

    /// Get a new reference to this attribute
    fn get_ref(&self) -> Box<dyn PaTncAttr>;

    /// Number of live handles to this attribute
    fn ref_count(&self) -> usize;

    /// Access the concrete attribute type
    fn as_any(&self) -> &dyn Any;

    /// Access the concrete attribute type mutably
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
