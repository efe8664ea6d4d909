//! Low-level read helpers shared by the container and payload codecs.

use std::io::{self, Read, Seek, SeekFrom};

/// Byte width of the fixed name slot in a parameter record.
pub(crate) const PARAM_NAME_SLOT: usize = 128;

pub(crate) fn read_fourcc<R: Read>(reader: &mut R) -> io::Result<[u8; 4]> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

pub(crate) fn fourcc_lossy(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

pub(crate) fn read_bytes<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

pub(crate) fn read_string<R: Read>(reader: &mut R, len: usize) -> io::Result<String> {
    let buf = read_bytes(reader, len)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read a null-terminated single-byte string, consuming the terminator.
pub(crate) fn read_cstring<R: Read>(reader: &mut R) -> io::Result<String> {
    let mut bytes = Vec::new();
    let mut b = [0u8; 1];
    loop {
        reader.read_exact(&mut b)?;
        if b[0] == 0 {
            break;
        }
        bytes.push(b[0]);
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a null-terminated UTF-16-LE string occupying a fixed byte slot,
/// skipping whatever padding follows the terminator.
pub(crate) fn read_utf16_slot<R: Read + Seek>(reader: &mut R, slot_len: u64) -> io::Result<String> {
    let mut units = Vec::new();
    let mut consumed = 0u64;
    let mut b = [0u8; 2];
    while consumed < slot_len {
        reader.read_exact(&mut b)?;
        consumed += 2;
        let unit = u16::from_le_bytes(b);
        if unit == 0 {
            break;
        }
        units.push(unit);
    }
    if consumed < slot_len {
        reader.seek(SeekFrom::Current((slot_len - consumed) as i64))?;
    }
    Ok(String::from_utf16_lossy(&units))
}

/// Write `name` into the fixed 128-byte record slot, NUL padded, truncated
/// if longer than the slot.
pub(crate) fn push_padded_name(buf: &mut Vec<u8>, name: &str) {
    let bytes = name.as_bytes();
    let n = bytes.len().min(PARAM_NAME_SLOT);
    buf.extend_from_slice(&bytes[..n]);
    buf.resize(buf.len() + (PARAM_NAME_SLOT - n), 0);
}
