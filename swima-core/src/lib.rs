//! Core types for SWIMA PA-TNC attributes
//!
//! This crate provides the value types shared by the SW Request and
//! SW Identifier Inventory codecs: attribute type tags, software
//! identities and inventories, decoder configuration and error handling.

pub mod config;
pub mod error;
pub mod inventory;
pub mod pen_type;
pub mod sw_id;

pub use config::{SWID_MAX_ATTR_SIZE, SwimaConfig, SwimaConfigBuilder};
pub use error::{SwimaError, SwimaResult};
pub use inventory::Inventory;
pub use pen_type::{IETF_ATTR_SW_ID_INVENTORY, IETF_ATTR_SW_REQUEST, PEN_IETF, PenType};
pub use sw_id::{SoftwareIdentity, SwIdRef};
