//! Software Identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shared handle to an immutable software identity
pub type SwIdRef = Arc<SoftwareIdentity>;

/// Software Identity with an optional Software Locator
///
/// A software identifier names one installed software product (for SWID
/// tags this is `<tag creator regid>_<unique software id>`). The locator,
/// if present, points at where the software or its tag lives on the
/// endpoint. Both are kept as raw bytes since the wire carries them as
/// opaque length-prefixed strings.
///
/// The value is immutable after construction. Inventories and attributes
/// share it through [`SwIdRef`]; the buffers are freed when the last
/// reference is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoftwareIdentity {
    #[serde(with = "serde_bytes")]
    sw_id: Vec<u8>,
    #[serde(with = "serde_bytes")]
    sw_locator: Option<Vec<u8>>,
}

impl SoftwareIdentity {
    /// Create a software identity, copying both inputs
    ///
    /// An empty locator is stored as absent.
    pub fn new(sw_id: &[u8], sw_locator: &[u8]) -> Self {
        Self {
            sw_id: sw_id.to_vec(),
            sw_locator: if sw_locator.is_empty() {
                None
            } else {
                Some(sw_locator.to_vec())
            },
        }
    }

    /// Create a shared software identity
    pub fn create(sw_id: &[u8], sw_locator: &[u8]) -> SwIdRef {
        Arc::new(Self::new(sw_id, sw_locator))
    }

    /// Get a new reference to a shared software identity
    ///
    /// Equivalent to `Arc::clone`; the reference count is atomic, so the
    /// returned handle may be moved to another thread.
    pub fn get_ref(this: &SwIdRef) -> SwIdRef {
        Arc::clone(this)
    }

    /// Get the software identifier
    pub fn sw_id(&self) -> &[u8] {
        &self.sw_id
    }

    /// Get the optional software locator
    pub fn sw_locator(&self) -> Option<&[u8]> {
        self.sw_locator.as_deref()
    }

    /// Get the software identifier together with its locator
    ///
    /// The locator is empty if absent, which is how it is encoded on the wire.
    pub fn sw_id_with_locator(&self) -> (&[u8], &[u8]) {
        (&self.sw_id, self.sw_locator.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for SoftwareIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.sw_id))?;
        if let Some(locator) = &self.sw_locator {
            write!(f, " @ {}", String::from_utf8_lossy(locator))?;
        }
        Ok(())
    }
}
