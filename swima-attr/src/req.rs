//! IETF SW Request attribute
//!
//! ```text
//!                      1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |C|S|R| Reserved|           Software Identifier Count           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          Request ID                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         Earliest EID                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Software Identifier Length  | Software Identifier (var len) ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ~             Software Identifier (variable length)             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use crate::attr::{PaTncAttr, ProcessStatus};
use crate::bio::{BioReader, BioWriter};
use crate::error::{SwimaError, SwimaResult};
use bytes::{Bytes, BytesMut};
use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use swima_core::{Inventory, PenType, SoftwareIdentity, SwIdRef, SwimaConfig};

/// Size of the fixed SW Request header
pub const IETF_SWIMA_REQ_MIN_SIZE: usize = 12;

/// No flags set
pub const FLAG_NONE: u8 = 0x00;
/// Clear subscriptions
pub const FLAG_C: u8 = 0x80;
/// Establish a subscription
pub const FLAG_S: u8 = 0x40;
/// Report software inventory records rather than identifiers only
pub const FLAG_R: u8 = 0x20;

/// Flag bits defined by the SW Request; the remaining bits are reserved
pub const SW_REQ_RESERVED_MASK: u8 = FLAG_C | FLAG_S | FLAG_R;

#[derive(Debug)]
struct RequestState {
    length: usize,
    value: Bytes,
    noskip_flag: bool,
    flags: u8,
    request_id: u32,
    earliest_eid: u32,
    targets: Inventory,
    config: SwimaConfig,
}

impl RequestState {
    fn build(&mut self) {
        if !self.value.is_empty() {
            return;
        }

        let mut writer = BioWriter::with_capacity(IETF_SWIMA_REQ_MIN_SIZE);
        writer.write_u8(self.flags);
        writer.write_u24(self.targets.count() as u32);
        writer.write_u32(self.request_id);
        writer.write_u32(self.earliest_eid);

        for target in &self.targets {
            writer.write_data16(target.sw_id());
        }

        self.value = writer.extract_buf();
        self.length = self.value.len();
        log::debug!(
            "built {} with {} target(s), {} bytes",
            PenType::IETF_SW_REQUEST,
            self.targets.count(),
            self.length
        );
    }

    fn process(&mut self) -> SwimaResult<ProcessStatus> {
        let limit = self.config.max_attr_size();
        if self.length > limit {
            log::warn!(
                "{} of {} bytes exceeds the limit of {} bytes",
                PenType::IETF_SW_REQUEST,
                self.length,
                limit
            );
            return Err(SwimaError::AttributeTooLarge {
                length: self.length,
                limit,
            });
        }
        if self.value.len() < self.length {
            return Ok(ProcessStatus::NeedMore);
        }
        if self.value.len() < IETF_SWIMA_REQ_MIN_SIZE {
            log::warn!("insufficient data for {}", PenType::IETF_SW_REQUEST);
            return Err(Self::malformed(0, "insufficient data for SW Request"));
        }

        let value = self.value.clone();
        let mut reader = BioReader::new(&value);
        let flags = reader.read_u8()?;
        let sw_id_count = reader.read_u24()?;
        self.request_id = reader.read_u32()?;
        self.earliest_eid = reader.read_u32()?;
        self.flags = flags & SW_REQ_RESERVED_MASK;

        let mut offset = IETF_SWIMA_REQ_MIN_SIZE;
        for _ in 0..sw_id_count {
            let sw_id = reader.read_data16().map_err(|_| {
                log::warn!("insufficient data for Software ID");
                Self::malformed(offset, "insufficient data for Software ID")
            })?;
            offset += 2 + sw_id.len();
            self.targets.add(SoftwareIdentity::create(sw_id, &[]));
        }

        log::debug!(
            "processed {}: flags 0x{:02x}, request id {}, earliest eid {}, {} target(s)",
            PenType::IETF_SW_REQUEST,
            self.flags,
            self.request_id,
            self.earliest_eid,
            sw_id_count
        );
        Ok(ProcessStatus::Success)
    }

    fn add_segment(&mut self, segment: &[u8]) {
        let mut value = BytesMut::with_capacity(self.value.len() + segment.len());
        value.extend_from_slice(&self.value);
        value.extend_from_slice(segment);
        self.value = value.freeze();
    }

    fn malformed(offset: usize, reason: &str) -> SwimaError {
        SwimaError::Malformed {
            attr: PenType::IETF_SW_REQUEST,
            offset,
            reason: reason.to_string(),
        }
    }
}

/// IETF SW Request attribute
///
/// Cloning the handle is the same as [`PaTncAttr::get_ref`]; all clones
/// share one attribute state.
#[derive(Debug, Clone)]
pub struct SwRequestAttr {
    state: Arc<Mutex<RequestState>>,
}

impl SwRequestAttr {
    /// Create an SW Request attribute for sending
    ///
    /// # Arguments
    ///
    /// * `flags` - Any of [`FLAG_C`], [`FLAG_S`], [`FLAG_R`]; reserved bits are cleared
    /// * `request_id` - Request ID
    /// * `eid` - Earliest EID
    pub fn create(flags: u8, request_id: u32, eid: u32) -> Self {
        Self::from_state(RequestState {
            length: 0,
            value: Bytes::new(),
            noskip_flag: false,
            flags: flags & SW_REQ_RESERVED_MASK,
            request_id,
            earliest_eid: eid,
            targets: Inventory::new(),
            config: SwimaConfig::default(),
        })
    }

    /// Create an SW Request attribute from received data
    ///
    /// # Arguments
    ///
    /// * `length` - Total length of the attribute value declared by the envelope
    /// * `data` - Complete attribute value or its first segment
    pub fn create_from_data(length: usize, data: &[u8]) -> Self {
        Self::create_from_data_with_config(SwimaConfig::default(), length, data)
    }

    /// Create an SW Request attribute from received data with custom limits
    pub fn create_from_data_with_config(config: SwimaConfig, length: usize, data: &[u8]) -> Self {
        Self::from_state(RequestState {
            length,
            value: Bytes::copy_from_slice(data),
            noskip_flag: false,
            flags: FLAG_NONE,
            request_id: 0,
            earliest_eid: 0,
            targets: Inventory::new(),
            config,
        })
    }

    fn from_state(state: RequestState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RequestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the SW Request flags
    pub fn flags(&self) -> u8 {
        self.lock().flags
    }

    /// Get the Request ID
    pub fn request_id(&self) -> u32 {
        self.lock().request_id
    }

    /// Get the Earliest EID
    pub fn earliest_eid(&self) -> u32 {
        self.lock().earliest_eid
    }

    /// Add a target software identity, taking over the supplied reference
    ///
    /// Only the identifier is encoded; a locator is never sent in a request.
    pub fn add_target(&mut self, sw_id: SwIdRef) {
        self.lock().targets.add(sw_id);
    }

    /// Get the target software identities in insertion order
    ///
    /// The returned inventory holds its own references to the targets.
    pub fn targets(&self) -> Inventory {
        self.lock().targets.clone()
    }
}

impl PaTncAttr for SwRequestAttr {
    fn attr_type(&self) -> PenType {
        PenType::IETF_SW_REQUEST
    }

    fn value(&self) -> Bytes {
        self.lock().value.clone()
    }

    fn noskip_flag(&self) -> bool {
        self.lock().noskip_flag
    }

    fn set_noskip_flag(&mut self, noskip: bool) {
        self.lock().noskip_flag = noskip;
    }

    fn build(&mut self) {
        self.lock().build();
    }

    fn process(&mut self) -> SwimaResult<ProcessStatus> {
        self.lock().process()
    }

    fn add_segment(&mut self, segment: &[u8]) {
        self.lock().add_segment(segment);
    }

    fn get_ref(&self) -> Box<dyn PaTncAttr> {
        Box::new(self.clone())
    }

    fn ref_count(&self) -> usize {
        Arc::strong_count(&self.state)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
