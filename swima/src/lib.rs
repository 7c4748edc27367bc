//! SWIMA - Rust implementation of the PA-TNC software inventory attributes
//!
//! This library provides wire-exact encoding and incremental decoding of
//! the IETF SW Request and SW Identifier Inventory attributes exchanged
//! between a posture validator and an endpoint in Trusted Network Connect.
//!
//! # Architecture
//!
//! - `swima-core`: Software identities, inventories, attribute types,
//!   configuration and error handling
//! - `swima-attr`: Attribute codecs and the `PaTncAttr` contract
//!
//! # Usage
//!
//! ```rust
//! use swima::{FLAG_R, PaTncAttr, ProcessStatus, SoftwareIdentity, SwRequestAttr};
//!
//! let mut attr = SwRequestAttr::create(FLAG_R, 2, 15);
//! attr.add_target(SoftwareIdentity::create(b"strongswan.org_strongSwan_5.3.3", b""));
//! attr.build();
//!
//! let value = attr.value();
//! let mut received = SwRequestAttr::create_from_data(value.len(), &value);
//! assert_eq!(received.process(), Ok(ProcessStatus::Success));
//! assert_eq!(received.targets().count(), 1);
//! ```

pub use swima_core::{
    IETF_ATTR_SW_ID_INVENTORY, IETF_ATTR_SW_REQUEST, Inventory, PEN_IETF, PenType,
    SWID_MAX_ATTR_SIZE, SoftwareIdentity, SwIdRef, SwimaConfig, SwimaConfigBuilder, SwimaError,
    SwimaResult,
};

pub use swima_attr::{
    FLAG_C, FLAG_NONE, FLAG_R, FLAG_S, IETF_SWIMA_REQ_MIN_SIZE, IETF_SWIMA_SW_ID_INV_MIN_SIZE,
    PaTncAttr, ProcessStatus, SW_REQ_RESERVED_MASK, SwIdInventoryAttr, SwRequestAttr,
};

/// Low-level big-endian reader and writer
pub mod bio {
    pub use swima_attr::bio::*;
}
