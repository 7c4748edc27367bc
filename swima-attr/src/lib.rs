//! PA-TNC attribute codecs for SW inventory exchange (SWIMA)
//!
//! This crate implements the wire format of two IETF attributes:
//!
//! - [`SwRequestAttr`]: SW Request, sent by a posture validator to ask
//!   an endpoint for its software identifiers
//! - [`SwIdInventoryAttr`]: SW Identifier Inventory, the endpoint's answer,
//!   which may arrive split over several PA-TNC messages
//!
//! Both implement [`PaTncAttr`], the contract the outer message layer
//! uses to build, process and reassemble attributes.

pub mod attr;
pub mod bio;
pub mod error;
pub mod req;
pub mod sw_id_inv;

pub use attr::{PaTncAttr, ProcessStatus};
pub use error::{SwimaError, SwimaResult};
pub use req::{
    FLAG_C, FLAG_NONE, FLAG_R, FLAG_S, IETF_SWIMA_REQ_MIN_SIZE, SW_REQ_RESERVED_MASK,
    SwRequestAttr,
};
pub use sw_id_inv::{IETF_SWIMA_SW_ID_INV_MIN_SIZE, SwIdInventoryAttr};
