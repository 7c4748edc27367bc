//! IETF SW Identifier Inventory attribute
//!
//! ```text
//!                      1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Reserved    |           Software Identifier Count           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |               Request ID Copy / Subscription ID               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           EID Epoch                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           Last EID                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Software Identifier Length  | Software Identifier (var len) ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Software Locator Length    | Software Locator (var. len.)  ~
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! An inventory easily exceeds the maximum PA-TNC message size, so the
//! receiving side parses it incrementally: every `process()` call consumes
//! as many complete (identifier, locator) entries as the buffered bytes
//! allow and keeps the incomplete tail for the next segment.

use crate::attr::{PaTncAttr, ProcessStatus};
use crate::bio::{BioReader, BioWriter};
use crate::error::{SwimaError, SwimaResult};
use bytes::{Bytes, BytesMut};
use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use swima_core::{Inventory, PenType, SoftwareIdentity, SwIdRef, SwimaConfig};

/// Size of the fixed SW Identifier Inventory header
pub const IETF_SWIMA_SW_ID_INV_MIN_SIZE: usize = 16;

const IETF_SWIMA_SW_ID_INV_RESERVED: u8 = 0x00;

#[derive(Debug)]
struct InventoryState {
    /// Declared length of the attribute value
    length: usize,
    /// Bytes of the value processed so far
    offset: usize,
    /// Unprocessed remainder of the value
    value: Bytes,
    noskip_flag: bool,
    request_id: u32,
    eid_epoch: u32,
    last_eid: u32,
    /// Entries still to be parsed
    sw_id_count: u32,
    inventory: Inventory,
    config: SwimaConfig,
}

impl InventoryState {
    fn build(&mut self) {
        if !self.value.is_empty() {
            return;
        }

        let mut writer = BioWriter::with_capacity(IETF_SWIMA_SW_ID_INV_MIN_SIZE);
        writer.write_u8(IETF_SWIMA_SW_ID_INV_RESERVED);
        writer.write_u24(self.inventory.count() as u32);
        writer.write_u32(self.request_id);
        writer.write_u32(self.eid_epoch);
        writer.write_u32(self.last_eid);

        for sw_id in &self.inventory {
            let (id, locator) = sw_id.sw_id_with_locator();
            writer.write_data16(id);
            writer.write_data16(locator);
        }

        self.value = writer.extract_buf();
        self.length = self.value.len();
        log::debug!(
            "built {} with {} entries, {} bytes",
            PenType::IETF_SW_ID_INVENTORY,
            self.inventory.count(),
            self.length
        );
    }

    fn process(&mut self) -> SwimaResult<ProcessStatus> {
        if self.offset == 0 {
            let limit = self.config.max_attr_size();
            if self.length > limit {
                log::warn!(
                    "{} of {} bytes exceeds the limit of {} bytes",
                    PenType::IETF_SW_ID_INVENTORY,
                    self.length,
                    limit
                );
                return Err(SwimaError::AttributeTooLarge {
                    length: self.length,
                    limit,
                });
            }
            if self.length < IETF_SWIMA_SW_ID_INV_MIN_SIZE {
                log::warn!("insufficient data for {}", PenType::IETF_SW_ID_INVENTORY);
                return Err(SwimaError::Malformed {
                    attr: PenType::IETF_SW_ID_INVENTORY,
                    offset: 0,
                    reason: "insufficient data for SW Identifier Inventory".to_string(),
                });
            }
            if self.value.len() < IETF_SWIMA_SW_ID_INV_MIN_SIZE {
                return Ok(ProcessStatus::NeedMore);
            }
            self.process_header()?;
        }

        let mut status = ProcessStatus::NeedMore;
        while self.sw_id_count > 0 {
            if !self.process_entry() {
                // incomplete entry, wait for the next segment
                return Ok(status);
            }
            // at least one entry was processed
            status = ProcessStatus::Success;
        }

        if self.length != self.offset {
            log::warn!(
                "inconsistent length for {}: processed {} of {} bytes",
                PenType::IETF_SW_ID_INVENTORY,
                self.offset,
                self.length
            );
            return Err(SwimaError::LengthMismatch {
                attr: PenType::IETF_SW_ID_INVENTORY,
                offset: self.offset,
                length: self.length,
            });
        }
        Ok(ProcessStatus::Success)
    }

    fn process_header(&mut self) -> SwimaResult<()> {
        let value = self.value.clone();
        let mut reader = BioReader::new(&value);
        let _reserved = reader.read_u8()?;
        self.sw_id_count = reader.read_u24()?;
        self.request_id = reader.read_u32()?;
        self.eid_epoch = reader.read_u32()?;
        self.last_eid = reader.read_u32()?;

        self.offset = IETF_SWIMA_SW_ID_INV_MIN_SIZE;
        self.value = value.slice(reader.position()..);
        log::debug!(
            "processing {}: request id {}, eid epoch 0x{:08x}, last eid {}, {} entries",
            PenType::IETF_SW_ID_INVENTORY,
            self.request_id,
            self.eid_epoch,
            self.last_eid,
            self.sw_id_count
        );
        Ok(())
    }

    /// Parse one (identifier, locator) entry, returning false if it is incomplete
    fn process_entry(&mut self) -> bool {
        let value = self.value.clone();
        let mut reader = BioReader::new(&value);
        let Ok(sw_id) = reader.read_data16() else {
            return false;
        };
        let Ok(sw_locator) = reader.read_data16() else {
            return false;
        };

        let sw_id = SoftwareIdentity::create(sw_id, sw_locator);
        log::trace!("received software identity {}", sw_id);
        self.inventory.add(sw_id);

        self.offset += reader.position();
        self.value = value.slice(reader.position()..);
        self.sw_id_count -= 1;
        true
    }

    fn add_segment(&mut self, segment: &[u8]) {
        let mut value = BytesMut::with_capacity(self.value.len() + segment.len());
        value.extend_from_slice(&self.value);
        value.extend_from_slice(segment);
        self.value = value.freeze();
    }
}

/// IETF SW Identifier Inventory attribute
///
/// Cloning the handle is the same as [`PaTncAttr::get_ref`]; all clones
/// share one attribute state.
#[derive(Debug, Clone)]
pub struct SwIdInventoryAttr {
    state: Arc<Mutex<InventoryState>>,
}

impl SwIdInventoryAttr {
    /// Create an SW Identifier Inventory attribute for sending
    ///
    /// # Arguments
    ///
    /// * `request_id` - Copy of the Request ID or the Subscription ID
    /// * `eid_epoch` - EID Epoch
    /// * `eid` - Last EID
    pub fn create(request_id: u32, eid_epoch: u32, eid: u32) -> Self {
        Self::from_state(InventoryState {
            length: 0,
            offset: 0,
            value: Bytes::new(),
            noskip_flag: false,
            request_id,
            eid_epoch,
            last_eid: eid,
            sw_id_count: 0,
            inventory: Inventory::new(),
            config: SwimaConfig::default(),
        })
    }

    /// Create an SW Identifier Inventory attribute from received data
    ///
    /// # Arguments
    ///
    /// * `length` - Total length of the attribute value declared by the envelope
    /// * `data` - Complete attribute value or its first segment
    pub fn create_from_data(length: usize, data: &[u8]) -> Self {
        Self::create_from_data_with_config(SwimaConfig::default(), length, data)
    }

    /// Create an SW Identifier Inventory attribute from received data with custom limits
    pub fn create_from_data_with_config(config: SwimaConfig, length: usize, data: &[u8]) -> Self {
        Self::from_state(InventoryState {
            length,
            offset: 0,
            value: Bytes::copy_from_slice(data),
            noskip_flag: false,
            request_id: 0,
            eid_epoch: 0,
            last_eid: 0,
            sw_id_count: 0,
            inventory: Inventory::new(),
            config,
        })
    }

    fn from_state(state: InventoryState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, InventoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a software identity, taking over the supplied reference
    pub fn add(&mut self, sw_id: SwIdRef) {
        self.lock().inventory.add(sw_id);
    }

    /// Get the Request ID copy or Subscription ID
    pub fn request_id(&self) -> u32 {
        self.lock().request_id
    }

    /// Get the Last EID
    pub fn last_eid(&self) -> u32 {
        self.lock().last_eid
    }

    /// Get the EID Epoch
    pub fn eid_epoch(&self) -> u32 {
        self.lock().eid_epoch
    }

    /// Get the number of entries that still have to be processed
    pub fn sw_id_count(&self) -> u32 {
        self.lock().sw_id_count
    }

    /// Get the software identities collected so far
    ///
    /// The returned inventory holds its own references to the identities.
    pub fn inventory(&self) -> Inventory {
        self.lock().inventory.clone()
    }

    /// Release the collected software identities
    ///
    /// Used between collection cycles when a large inventory is handed on
    /// in batches while its value is still being reassembled.
    pub fn clear_inventory(&mut self) {
        self.lock().inventory = Inventory::new();
    }
}

impl PaTncAttr for SwIdInventoryAttr {
    fn attr_type(&self) -> PenType {
        PenType::IETF_SW_ID_INVENTORY
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

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: [(&[u8], &[u8]); 3] = [
        (b"strongswan.org_strongSwan_5.3.3", b"/usr/share/strongswan"),
        (b"strongswan.org_62251aa6-1a01-479b-aea6-f3dcf0ab1f1a", b""),
        (b"regid.2004-03.org.strongswan_strongSwan-5-6-0", b"/usr/sbin/ipsec"),
    ];

    fn entry(sw_id: &[u8], sw_locator: &[u8]) -> Vec<u8> {
        let mut data = (sw_id.len() as u16).to_be_bytes().to_vec();
        data.extend_from_slice(sw_id);
        data.extend_from_slice(&(sw_locator.len() as u16).to_be_bytes());
        data.extend_from_slice(sw_locator);
        data
    }

    fn header(count: u8) -> Vec<u8> {
        vec![
            0x00, 0x00, 0x00, count, 0x00, 0x00, 0x00, 0x07, 0x12, 0x34, 0x56, 0x78, 0x00, 0x00,
            0x00, 0x2A,
        ]
    }

    fn encoded() -> Vec<u8> {
        let mut data = header(ENTRIES.len() as u8);
        for (sw_id, sw_locator) in ENTRIES {
            data.extend(entry(sw_id, sw_locator));
        }
        data
    }

    fn assert_decoded(attr: &SwIdInventoryAttr) {
        assert_eq!(attr.request_id(), 7);
        assert_eq!(attr.eid_epoch(), 0x1234_5678);
        assert_eq!(attr.last_eid(), 42);
        assert_eq!(attr.sw_id_count(), 0);
        let inventory = attr.inventory();
        let decoded: Vec<(&[u8], &[u8])> = inventory
            .iter()
            .map(|sw_id| sw_id.sw_id_with_locator())
            .collect();
        assert_eq!(decoded, ENTRIES.to_vec());
    }

    #[test]
    fn test_sw_id_inv_build() {
        let mut attr = SwIdInventoryAttr::create(7, 0x1234_5678, 42);
        assert_eq!(attr.attr_type(), PenType::IETF_SW_ID_INVENTORY);
        for (sw_id, sw_locator) in ENTRIES {
            attr.add(SoftwareIdentity::create(sw_id, sw_locator));
        }
        attr.build();
        attr.build();
        assert_eq!(attr.value().as_ref(), encoded().as_slice());
    }

    #[test]
    fn test_sw_id_inv_process_complete() {
        let data = encoded();
        let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &data);
        assert_eq!(attr.process(), Ok(ProcessStatus::Success));
        assert_decoded(&attr);
        assert!(attr.value().is_empty());
    }

    #[test]
    fn test_sw_id_inv_process_empty() {
        let data = header(0);
        let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &data);
        assert_eq!(attr.process(), Ok(ProcessStatus::Success));
        assert!(attr.inventory().is_empty());
    }

    #[test]
    fn test_sw_id_inv_header_too_short() {
        let data = header(0);
        let mut attr = SwIdInventoryAttr::create_from_data(15, &data[..15]);
        let err = attr.process().unwrap_err();
        assert!(matches!(err, SwimaError::Malformed { .. }));
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_sw_id_inv_per_entry_reassembly() {
        let data = encoded();
        let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &data[..10]);
        assert_eq!(attr.process(), Ok(ProcessStatus::NeedMore));

        attr.add_segment(&data[10..16]);
        assert_eq!(attr.process(), Ok(ProcessStatus::NeedMore));
        assert_eq!(attr.sw_id_count(), 3);
        assert!(attr.value().is_empty());

        let mut pos = 16;
        for (i, (sw_id, sw_locator)) in ENTRIES.into_iter().enumerate() {
            let len = entry(sw_id, sw_locator).len();

            // identifier complete, locator still missing
            attr.add_segment(&data[pos..pos + 2 + sw_id.len()]);
            assert_eq!(attr.process(), Ok(ProcessStatus::NeedMore));
            assert_eq!(attr.inventory().count(), i);

            attr.add_segment(&data[pos + 2 + sw_id.len()..pos + len]);
            assert_eq!(attr.process(), Ok(ProcessStatus::Success));
            assert_eq!(attr.inventory().count(), i + 1);
            pos += len;
        }
        assert_eq!(pos, data.len());
        assert_decoded(&attr);
    }

    #[test]
    fn test_sw_id_inv_segmentation_equivalence() {
        let data = encoded();
        for split in 0..data.len() {
            let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &data[..split]);
            let status = attr.process().unwrap();
            if split < IETF_SWIMA_SW_ID_INV_MIN_SIZE {
                assert_eq!(status, ProcessStatus::NeedMore);
            }
            attr.add_segment(&data[split..]);
            assert_eq!(attr.process(), Ok(ProcessStatus::Success));
            assert_decoded(&attr);
        }
    }

    #[test]
    fn test_sw_id_inv_byte_by_byte() {
        let data = encoded();
        let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &[]);
        let mut successes = 0;
        for byte in &data {
            attr.add_segment(std::slice::from_ref(byte));
            if attr.process().unwrap() == ProcessStatus::Success {
                successes += 1;
            }
        }
        assert_eq!(successes, ENTRIES.len());
        assert_decoded(&attr);
    }

    #[test]
    fn test_sw_id_inv_trailing_bytes() {
        let mut data = encoded();
        data.extend_from_slice(&[0xDE, 0xAD]);
        let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &data);
        assert_eq!(
            attr.process(),
            Err(SwimaError::LengthMismatch {
                attr: PenType::IETF_SW_ID_INVENTORY,
                offset: data.len() - 2,
                length: data.len(),
            })
        );
    }

    #[test]
    fn test_sw_id_inv_declared_length_too_short() {
        let data = encoded();
        let first = 16 + entry(ENTRIES[0].0, ENTRIES[0].1).len();
        let mut attr = SwIdInventoryAttr::create_from_data(first, &data);
        let err = attr.process().unwrap_err();
        assert!(matches!(err, SwimaError::LengthMismatch { .. }));
        assert_eq!(err.offset(), data.len());
    }

    #[test]
    fn test_sw_id_inv_attribute_too_large() {
        let config = SwimaConfig::builder().max_attr_size(1000).build();
        let mut attr = SwIdInventoryAttr::create_from_data_with_config(config, 1001, &header(1));
        assert_eq!(
            attr.process(),
            Err(SwimaError::AttributeTooLarge {
                length: 1001,
                limit: 1000
            })
        );
    }

    #[test]
    fn test_sw_id_inv_clear_inventory() {
        let data = encoded();
        let split = 16 + entry(ENTRIES[0].0, ENTRIES[0].1).len();
        let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &data[..split]);
        assert_eq!(attr.process(), Ok(ProcessStatus::Success));
        assert_eq!(attr.inventory().count(), 1);

        attr.clear_inventory();
        assert!(attr.inventory().is_empty());

        attr.add_segment(&data[split..]);
        assert_eq!(attr.process(), Ok(ProcessStatus::Success));
        assert_eq!(attr.inventory().count(), 2);
        assert_eq!(attr.sw_id_count(), 0);
    }

    #[test]
    fn test_sw_id_inv_get_ref() {
        let sw_id = SoftwareIdentity::create(ENTRIES[0].0, ENTRIES[0].1);
        let mut attr = SwIdInventoryAttr::create(1, 2, 3);
        attr.add(SoftwareIdentity::get_ref(&sw_id));
        attr.set_noskip_flag(true);
        attr.build();

        let attr1 = attr.get_ref();
        assert_eq!(attr.ref_count(), 2);
        drop(attr);

        assert_eq!(attr1.ref_count(), 1);
        assert!(attr1.noskip_flag());
        let attr1 = attr1
            .as_any()
            .downcast_ref::<SwIdInventoryAttr>()
            .expect("inventory attribute");
        assert_eq!(attr1.last_eid(), 3);
        assert_eq!(attr1.eid_epoch(), 2);
        assert_eq!(attr1.inventory().count(), 1);
        assert_eq!(Arc::strong_count(&sw_id), 2);
    }

    #[test]
    fn test_sw_id_inv_retained_handle_sees_processed_entries() {
        let data = encoded();
        let mut attr = SwIdInventoryAttr::create_from_data(data.len(), &data);
        let retained = attr.clone();

        assert_eq!(attr.process(), Ok(ProcessStatus::Success));
        assert_eq!(retained.ref_count(), 2);
        assert_decoded(&retained);
        assert!(retained.value().is_empty());
    }

    #[test]
    fn test_sw_id_inv_batches_through_shared_handles() {
        let data = encoded();
        let mut holder = SwIdInventoryAttr::create_from_data(data.len(), &[]);
        let mut collected: Vec<Vec<u8>> = Vec::new();

        for segment in data.chunks(13) {
            holder.add_segment(segment);

            let mut message = holder.get_ref();
            assert_eq!(holder.ref_count(), 2);
            if message.process().unwrap() == ProcessStatus::Success {
                let consumer = message
                    .as_any_mut()
                    .downcast_mut::<SwIdInventoryAttr>()
                    .expect("inventory attribute");
                let batch = consumer.inventory();
                collected.extend(batch.iter().map(|sw_id| sw_id.sw_id().to_vec()));
                consumer.clear_inventory();
            }
        }

        let expected: Vec<Vec<u8>> = ENTRIES.iter().map(|(sw_id, _)| sw_id.to_vec()).collect();
        assert_eq!(collected, expected);
        assert_eq!(holder.ref_count(), 1);
        assert_eq!(holder.sw_id_count(), 0);
        assert!(holder.inventory().is_empty());
        assert!(holder.value().is_empty());
    }
}
