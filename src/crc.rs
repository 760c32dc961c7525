//! CRC-16/CCITT-FALSE over the serialized payload, stored in the trailing tag 63 field.

use bytes::{Bytes, BytesMut};
use log::trace;

use crate::{
    constants::{CRC_INIT, CRC_POLYNOMIAL, CRC_VALUE_LEN, TAG_CRC},
    error::Result,
    payload::Payload,
};

/// Compute the CRC-16/CCITT-FALSE checksum of `data`.
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = CRC_INIT;

    for &byte in data {
        crc ^= u16::from(byte) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ CRC_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}

/// The bytes the checksum covers: every field before the checksum field, followed by the
/// checksum's own tag and length prefix.
fn covered_bytes(payload: &Payload, index: usize) -> Bytes {
    let mut buf = BytesMut::new();

    for field in &payload.fields()[..index] {
        field.encode(&mut buf);
    }

    buf.extend_from_slice(TAG_CRC.as_bytes());
    buf.extend_from_slice(format!("{:02}", CRC_VALUE_LEN).as_bytes());

    buf.freeze()
}

fn checksum_of(payload: &Payload, index: usize) -> String {
    format!("{:04X}", crc16(&covered_bytes(payload, index)))
}

/// Returns `payload` with the value of its checksum field recomputed over the bytes preceding it.
///
/// A payload without a checksum field is returned unchanged.
pub fn recompute_checksum(mut payload: Payload) -> Result<Payload> {
    let index = match payload.position(TAG_CRC) {
        Some(index) => index,
        None => return Ok(payload),
    };

    let checksum = checksum_of(&payload, index);

    trace!("Recomputed checksum {}", checksum);

    let field = payload.fields()[index].with_value(checksum)?;

    payload.replace(index, field);

    Ok(payload)
}

/// Whether the stored checksum matches the bytes it covers.
pub fn verify_checksum(payload: &Payload) -> bool {
    let index = match payload.position(TAG_CRC) {
        Some(index) => index,
        None => return false,
    };

    let stored = payload.fields()[index].value();

    stored.len() == CRC_VALUE_LEN
        && checksum_of(payload, index)
            .as_bytes()
            .eq_ignore_ascii_case(stored)
}
