//! End-to-end read/write round trips over real files on disk.

use vstpreset_format::{ids, ClassId, Error, MetaInfo, PayloadKind, VstPreset};

fn compressor_preset() -> VstPreset {
    let mut preset = VstPreset::new(ClassId::new(ids::STEINBERG_COMPRESSOR).unwrap());
    let params = preset.parameters_mut();
    params.add_bytes("StartBytes", 1, vec![1, 0, 0, 0]);
    params.add_number("threshold", 0, -20.0);
    params.add_number("ratio", 1, 4.0);
    params.add_number("attack", 2, 10.0);
    preset
        .set_meta(MetaInfo {
            category: "Fx|Dynamics".into(),
            name: "Compressor".into(),
            vendor: "Steinberg Media Technologies".into(),
        })
        .unwrap();
    preset
}

#[test]
fn write_then_read_reproduces_the_preset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compressor.vstpreset");

    let mut preset = compressor_preset();
    preset.write_file(&path).unwrap();

    let read_back = VstPreset::from_file(&path).unwrap();
    assert_eq!(read_back.class_id(), &ids::STEINBERG_COMPRESSOR);
    assert_eq!(read_back.payload_kind(), PayloadKind::ParameterBlock);
    assert_eq!(read_back.parameters().number("threshold"), Some(-20.0));
    assert_eq!(read_back.parameters().number("ratio"), Some(4.0));
    assert_eq!(read_back.parameters().number("attack"), Some(10.0));
    assert_eq!(
        read_back.parameters().bytes("StartBytes"),
        Some(&[1u8, 0, 0, 0][..])
    );
    assert_eq!(read_back.meta().unwrap().name, "Compressor");

    // three 140-byte records behind the four-byte stamp, no drift
    assert_eq!(read_back.chunks().comp.size, 4 + 3 * 140);
}

#[test]
fn rewriting_a_file_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.vstpreset");
    let second = dir.path().join("second.vstpreset");

    compressor_preset().write_file(&first).unwrap();

    let mut read_back = VstPreset::from_file(&first).unwrap();
    read_back.write_file(&second).unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn written_tables_tile_the_data_area() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiled.vstpreset");

    compressor_preset().write_file(&path).unwrap();
    let preset = VstPreset::from_file(&path).unwrap();

    let chunks = preset.chunks();
    assert_eq!(chunks.comp.offset, 48);
    assert_eq!(chunks.comp.end(), chunks.cont.offset);
    assert_eq!(chunks.cont.end(), chunks.info.offset);
    assert_eq!(chunks.info.end(), chunks.list_pos);

    let file_len = std::fs::read(&path).unwrap().len() as u64;
    // 8 bytes of list header plus three 20-byte entries behind the table
    assert_eq!(file_len, chunks.list_pos + 8 + 3 * 20);
}

#[test]
fn undersized_files_are_rejected_before_parsing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.vstpreset");
    std::fs::write(&path, vec![0u8; 63]).unwrap();

    let err = VstPreset::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::TooSmall { len: 63 }), "{err}");
}

#[test]
fn wrong_magic_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-preset.bin");
    let mut data = b"RIFF".to_vec();
    data.resize(128, 0);
    std::fs::write(&path, data).unwrap();

    let err = VstPreset::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidMagic { .. }), "{err}");
}

#[test]
fn missing_file_is_not_found() {
    let err = VstPreset::from_file("/no/such/file.vstpreset").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "{err}");
}

#[test]
fn unknown_class_id_round_trips_opaquely() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("unknown.vstpreset");
    let second = dir.path().join("unknown2.vstpreset");

    let blob = vec![0x10, 0x20, 0x30, 0x40, 0x55, 0x66, 0x77];
    let mut preset = VstPreset::new(ClassId::new("0123456789ABCDEF0123456789ABCDEF").unwrap());
    preset.set_comp_chunk_data(blob.clone());
    preset.set_cont_chunk_data(vec![0xAA, 0xBB]);
    preset.write_file(&first).unwrap();

    let mut read_back = VstPreset::from_file(&first).unwrap();
    assert_eq!(read_back.payload_kind(), PayloadKind::Opaque);
    assert_eq!(read_back.comp_chunk_data(), Some(&blob[..]));
    assert_eq!(read_back.cont_chunk_data(), Some(&[0xAAu8, 0xBB][..]));
    assert!(read_back.fxp().is_none());

    read_back.write_file(&second).unwrap();
    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn writing_without_computed_positions_fails() {
    let mut preset = VstPreset::new(ClassId::new(ids::STEINBERG_EQ).unwrap());
    preset.set_comp_chunk_data(vec![0u8; 16]);

    let mut sink = Vec::new();
    let err = preset.write_to(&mut sink).unwrap_err();
    assert!(matches!(err, Error::MissingPositions), "{err}");

    preset.compute_positions();
    preset.set_meta(MetaInfo::default()).unwrap();
    preset.compute_positions();
    preset.write_to(&mut sink).unwrap();
}

#[test]
fn preset_without_any_chunk_data_cannot_be_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.vstpreset");
    let mut preset = VstPreset::new(ClassId::new("0123456789ABCDEF0123456789ABCDEF").unwrap());
    let err = preset.write_file(&path).unwrap_err();
    assert!(matches!(err, Error::MissingChunkData { .. }), "{err}");
}
