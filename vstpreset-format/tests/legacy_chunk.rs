//! Wrapped legacy FXP/FXB chunks inside preset files: wrapper detection,
//! single/bank consistency and file-size checks.

use vstpreset_format::{Error, FxpKind, MetaInfo, VstPreset};

const HEADER_SIZE: usize = 48;
const UNKNOWN_ID: &str = "0123456789ABCDEF0123456789ABCDEF";

fn info_bytes() -> Vec<u8> {
    let meta = MetaInfo {
        category: "Fx".into(),
        name: "Legacy".into(),
        vendor: "Acme".into(),
    };
    meta.canonicalize().unwrap().1
}

fn legacy_chunk(sub_magic: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut chunk = Vec::new();
    chunk.extend_from_slice(b"CcnK");
    chunk.extend_from_slice(&((4 + body.len()) as u32).to_be_bytes());
    chunk.extend_from_slice(sub_magic);
    chunk.extend_from_slice(body);
    chunk
}

fn header(class_id: &str, list_pos: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE);
    buf.extend_from_slice(b"VST3");
    buf.extend_from_slice(&1u32.to_le_bytes());
    buf.extend_from_slice(class_id.as_bytes());
    buf.extend_from_slice(&list_pos.to_le_bytes());
    buf
}

fn list_entry(buf: &mut Vec<u8>, tag: &[u8; 4], offset: u64, size: u64) {
    buf.extend_from_slice(tag);
    buf.extend_from_slice(&offset.to_le_bytes());
    buf.extend_from_slice(&size.to_le_bytes());
}

/// A single-preset file: `LPXF` marker, legacy chunk, info, then a
/// two-entry table occupying the last 48 bytes (which is what the `LPXF`
/// file-size check demands).
fn lpxf_file(sub_magic: &[u8; 4]) -> Vec<u8> {
    let chunk = legacy_chunk(sub_magic, &[0x11; 32]);
    let info = info_bytes();

    let comp_offset = HEADER_SIZE as u64;
    let comp_size = (4 + chunk.len()) as u64;
    let info_offset = comp_offset + comp_size;
    let list_pos = info_offset + info.len() as u64;

    let mut file = header(UNKNOWN_ID, list_pos);
    file.extend_from_slice(b"LPXF");
    file.extend_from_slice(&chunk);
    file.extend_from_slice(&info);
    file.extend_from_slice(b"List");
    file.extend_from_slice(&2u32.to_le_bytes());
    list_entry(&mut file, b"Comp", comp_offset, comp_size);
    list_entry(&mut file, b"Info", info_offset, info.len() as u64);

    assert_eq!(file.len() as u64, list_pos + 48);
    file
}

/// A bank file: `VstW` wrapper, legacy chunk, info, then the canonical
/// three-entry table.
fn vstw_file(sub_magic: &[u8; 4]) -> Vec<u8> {
    let chunk = legacy_chunk(sub_magic, &[0x22; 48]);
    let info = info_bytes();

    let comp_offset = HEADER_SIZE as u64;
    let comp_size = (16 + chunk.len()) as u64;
    let cont_offset = comp_offset + comp_size;
    let info_offset = cont_offset;
    let list_pos = info_offset + info.len() as u64;

    let mut file = header(UNKNOWN_ID, list_pos);
    file.extend_from_slice(b"VstW");
    file.extend_from_slice(&8u32.to_be_bytes());
    file.extend_from_slice(&1u32.to_be_bytes());
    file.extend_from_slice(&0u32.to_be_bytes());
    file.extend_from_slice(&chunk);
    file.extend_from_slice(&info);
    file.extend_from_slice(b"List");
    file.extend_from_slice(&3u32.to_le_bytes());
    list_entry(&mut file, b"Comp", comp_offset, comp_size);
    list_entry(&mut file, b"Cont", cont_offset, 0);
    list_entry(&mut file, b"Info", info_offset, info.len() as u64);

    assert_eq!(file.len() as u64, list_pos + 68);
    file
}

fn read_bytes(data: Vec<u8>) -> vstpreset_format::Result<VstPreset> {
    let len = data.len() as u64;
    VstPreset::read(&mut std::io::Cursor::new(data), len)
}

#[test]
fn lpxf_single_preset_parses() {
    let preset = read_bytes(lpxf_file(b"FxCk")).unwrap();
    let fxp = preset.fxp().unwrap();
    assert_eq!(fxp.kind, FxpKind::Preset);
    assert_eq!(&fxp.sub_magic, b"FxCk");
    assert_eq!(preset.meta().unwrap().name, "Legacy");
}

#[test]
fn lpxf_opaque_preset_chunk_parses() {
    let preset = read_bytes(lpxf_file(b"FPCh")).unwrap();
    assert_eq!(preset.fxp().unwrap().kind, FxpKind::Preset);
}

#[test]
fn bank_chunk_under_single_wrapper_is_a_structural_mismatch() {
    let err = read_bytes(lpxf_file(b"FxBk")).unwrap_err();
    assert!(matches!(err, Error::StructuralMismatch { .. }), "{err}");
}

#[test]
fn vstw_bank_parses() {
    let preset = read_bytes(vstw_file(b"FBCh")).unwrap();
    let fxp = preset.fxp().unwrap();
    assert_eq!(fxp.kind, FxpKind::Bank);

    // set_fxp wraps the captured chunk back into the VstW envelope, which
    // is exactly the original Comp chunk
    let comp = preset.comp_chunk_data().unwrap();
    assert_eq!(&comp[..4], b"VstW");
    assert_eq!(&comp[16..], &fxp.data[..]);
}

#[test]
fn preset_chunk_under_bank_wrapper_is_a_structural_mismatch() {
    let err = read_bytes(vstw_file(b"FxCk")).unwrap_err();
    assert!(matches!(err, Error::StructuralMismatch { .. }), "{err}");
}

#[test]
fn rewritten_bank_file_is_byte_identical() {
    let original = vstw_file(b"FxBk");
    let mut preset = read_bytes(original.clone()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.vstpreset");
    preset.write_file(&path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), original);
}

#[test]
fn wrapper_file_size_check_rejects_trailing_garbage() {
    let mut file = lpxf_file(b"FxCk");
    file.push(0);
    let err = read_bytes(file).unwrap_err();
    assert!(matches!(err, Error::SizeMismatch { .. }), "{err}");
}

#[test]
fn bare_legacy_chunk_without_wrapper_is_captured() {
    // no LPXF/VstW marker at all: the chunk sits directly at the start of
    // Comp, found by the opaque fallback
    let chunk = legacy_chunk(b"FBCh", &[0x33; 16]);
    let info = info_bytes();

    let comp_offset = HEADER_SIZE as u64;
    let comp_size = chunk.len() as u64;
    let info_offset = comp_offset + comp_size;
    let list_pos = info_offset + info.len() as u64;

    let mut file = header(UNKNOWN_ID, list_pos);
    file.extend_from_slice(&chunk);
    file.extend_from_slice(&info);
    file.extend_from_slice(b"List");
    file.extend_from_slice(&3u32.to_le_bytes());
    list_entry(&mut file, b"Comp", comp_offset, comp_size);
    list_entry(&mut file, b"Cont", info_offset, 0);
    list_entry(&mut file, b"Info", info_offset, info.len() as u64);

    let preset = read_bytes(file).unwrap();
    let fxp = preset.fxp().unwrap();
    assert_eq!(fxp.kind, FxpKind::Bank);
    // the raw chunk stays as Comp, unwrapped
    assert_eq!(preset.comp_chunk_data(), Some(&chunk[..]));
}
