use serde::{Deserialize, Serialize};
use std::fmt;

/// Private Enterprise Number assigned to the IETF
pub const PEN_IETF: u32 = 0;

/// PA-TNC attribute type of the IETF SW Request attribute
pub const IETF_ATTR_SW_REQUEST: u32 = 13;

/// PA-TNC attribute type of the IETF SW Identifier Inventory attribute
pub const IETF_ATTR_SW_ID_INVENTORY: u32 = 14;

/// Vendor-specific PA-TNC attribute type
///
/// A PA-TNC attribute is identified by the 24-bit Private Enterprise Number
/// of the vendor that defined it and a 32-bit type within that vendor's
/// namespace. The outer message layer writes both into the attribute header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PenType {
    vendor_id: u32,
    attr_type: u32,
}

impl PenType {
    /// IETF SW Request
    pub const IETF_SW_REQUEST: PenType = PenType::new(PEN_IETF, IETF_ATTR_SW_REQUEST);

    /// IETF SW Identifier Inventory
    pub const IETF_SW_ID_INVENTORY: PenType = PenType::new(PEN_IETF, IETF_ATTR_SW_ID_INVENTORY);

    /// Create a new attribute type
    ///
    /// # Arguments
    ///
    /// * `vendor_id` - Private Enterprise Number (only the low 24 bits are used on the wire)
    /// * `attr_type` - Attribute type within the vendor namespace
    pub const fn new(vendor_id: u32, attr_type: u32) -> Self {
        Self {
            vendor_id: vendor_id & 0x00FF_FFFF,
            attr_type,
        }
    }

    /// Get the Private Enterprise Number
    pub fn vendor_id(&self) -> u32 {
        self.vendor_id
    }

    /// Get the attribute type
    pub fn attr_type(&self) -> u32 {
        self.attr_type
    }

    fn ietf_attr_name(attr_type: u32) -> Option<&'static str> {
        match attr_type {
            IETF_ATTR_SW_REQUEST => Some("SW Request"),
            IETF_ATTR_SW_ID_INVENTORY => Some("SW Identifier Inventory"),
            _ => None,
        }
    }
}

impl fmt::Display for PenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vendor_id == PEN_IETF {
            if let Some(name) = Self::ietf_attr_name(self.attr_type) {
                return write!(f, "IETF/{}", name);
            }
            return write!(f, "IETF/{}", self.attr_type);
        }
        write!(f, "{:#08x}/{}", self.vendor_id, self.attr_type)
    }
}
