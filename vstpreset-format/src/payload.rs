//! Payload grammars: the per-plugin-family binary layouts of the `Comp`
//! and `Cont` chunks.
//!
//! Every class identifier maps to exactly one [`PayloadKind`] through the
//! registry in [`crate::ids`]; identifiers nobody has mapped yet fall back
//! to [`PayloadKind::Opaque`], which captures the chunk bytes verbatim so
//! the file still round-trips losslessly.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::fxp::{Fxp, FXP_MAGIC};
use crate::header::ClassId;
use crate::ids::REGISTRY;
use crate::preset::{VstPreset, COMP_CHUNK_DATA, CONT_CHUNK_DATA};
use crate::stream::{
    fourcc_lossy, push_padded_name, read_bytes, read_cstring, read_fourcc, read_string,
    read_utf16_slot, PARAM_NAME_SLOT,
};

/// Byte width of the UTF-16 path slots in the convolution-reverb layout.
const WIDE_PATH_SLOT: u64 = 1024;

/// Fixed framing around the two XML sections of the vendor-XML layout:
/// three big-endian words, preset-type, set-type, length, `XPst`, post tag.
const VENDOR_XML_FRAMING: u64 = 32;

/// The binary grammar applied to a preset's `Comp`/`Cont` chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// 140-byte fixed records: NUL-padded name slot, index, raw
    /// little-endian `f64`. The bulk of the simple Steinberg effects.
    ParameterBlock,
    /// The whole `Comp` chunk is a single XML document.
    RawXml,
    /// Chunks captured verbatim. Also the terminal fallback for any
    /// unrecognized class identifier.
    Opaque,
    /// Convolution reverb: wide-string path slots, image list, then fixed
    /// records.
    Reverence,
    /// Two floats and three ints.
    Panner,
    /// Big-endian length-prefixed XML sections bracketed by `XPst` framing.
    VendorXml,
    /// A leading word, then fixed records.
    Kontakt,
}

impl PayloadKind {
    /// Look up the grammar for a class identifier. Unknown identifiers are
    /// not an error; they land on [`PayloadKind::Opaque`].
    pub fn for_class_id(class_id: &ClassId) -> PayloadKind {
        class_id
            .as_utf8()
            .and_then(|id| REGISTRY.get(id).copied())
            .unwrap_or(PayloadKind::Opaque)
    }
}

pub(crate) fn decode<R: Read + Seek>(
    kind: PayloadKind,
    preset: &mut VstPreset,
    reader: &mut R,
    file_len: u64,
) -> Result<()> {
    match kind {
        PayloadKind::ParameterBlock => decode_parameter_block(preset, reader),
        PayloadKind::RawXml => decode_raw_xml(preset, reader),
        PayloadKind::Opaque => decode_opaque(preset, reader, file_len),
        PayloadKind::Reverence => decode_reverence(preset, reader),
        PayloadKind::Panner => decode_panner(preset, reader),
        PayloadKind::VendorXml => decode_vendor_xml(preset, reader),
        PayloadKind::Kontakt => decode_kontakt(preset, reader),
    }
}

/// Rebuild the `Comp` chunk from decoded parameters, for the grammars whose
/// parameter set captures the chunk completely. The others keep their raw
/// chunk bytes, which the write path prefers anyway.
pub(crate) fn encode(kind: PayloadKind, preset: &VstPreset) -> Option<Vec<u8>> {
    match kind {
        PayloadKind::ParameterBlock => encode_parameter_block(preset),
        PayloadKind::RawXml => preset
            .parameters
            .text("XmlContent")
            .map(|xml| xml.as_bytes().to_vec()),
        PayloadKind::Panner => encode_panner(preset),
        _ => None,
    }
}

fn overrun(class_id: &ClassId, position: u64, end: u64) -> Error {
    Error::RegionOverrun {
        class_id: class_id.to_string(),
        position,
        end,
    }
}

/// One fixed record: name in a 128-byte NUL-padded slot, `u32` index, and
/// the value as 8 raw bytes reinterpreted as a little-endian `f64`. The
/// value must not be read as a host-order double; the field is raw bytes.
fn read_record<R: Read + Seek>(
    reader: &mut R,
    class_id: &ClassId,
    end: u64,
) -> Result<(String, i32, f64)> {
    let slot_start = reader.stream_position()?;
    let name = read_cstring(reader)?;
    let after_name = reader.stream_position()?;
    let slot_end = slot_start + PARAM_NAME_SLOT as u64;
    if after_name > slot_end {
        return Err(overrun(class_id, after_name, end));
    }
    reader.seek(SeekFrom::Start(slot_end))?;

    let index = reader.read_u32::<LittleEndian>()? as i32;
    let mut raw = [0u8; 8];
    reader.read_exact(&mut raw)?;
    Ok((name, index, f64::from_le_bytes(raw)))
}

fn capture_comp<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    let comp = preset.chunks.comp;
    if comp.size > 0 {
        reader.seek(SeekFrom::Start(comp.offset))?;
        let data = read_bytes(reader, comp.size as usize)?;
        preset.parameters.set_bytes(COMP_CHUNK_DATA, data);
    }
    Ok(())
}

fn capture_cont<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    let cont = preset.chunks.cont;
    if cont.size > 0 {
        reader.seek(SeekFrom::Start(cont.offset))?;
        let data = read_bytes(reader, cont.size as usize)?;
        preset.parameters.set_bytes(CONT_CHUNK_DATA, data);
    }
    Ok(())
}

fn decode_parameter_block<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    let comp = preset.chunks.comp;
    reader.seek(SeekFrom::Start(comp.offset))?;

    // Four bytes of preset-version stamp precede the records.
    let mut start_bytes = [0u8; 4];
    reader.read_exact(&mut start_bytes)?;
    preset.parameters.add_bytes(
        "StartBytes",
        i32::from_le_bytes(start_bytes),
        start_bytes.to_vec(),
    );

    let end = comp.end();
    loop {
        let position = reader.stream_position()?;
        if position == end {
            break;
        }
        if position > end {
            return Err(overrun(&preset.class_id, position, end));
        }
        let (name, index, value) = read_record(reader, &preset.class_id, end)?;
        preset.parameters.add_number(&name, index, value);
    }
    Ok(())
}

fn encode_parameter_block(preset: &VstPreset) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(start_bytes) = preset.parameters.bytes("StartBytes") {
        buf.extend_from_slice(start_bytes);
    }
    for param in preset.parameters.iter() {
        if let crate::parameter::ParamValue::Number(value) = param.value {
            push_padded_name(&mut buf, &param.name);
            buf.extend_from_slice(&(param.index as u32).to_le_bytes());
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }
    if buf.is_empty() {
        None
    } else {
        Some(buf)
    }
}

fn decode_raw_xml<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    let comp = preset.chunks.comp;
    reader.seek(SeekFrom::Start(comp.offset))?;
    let xml = read_string(reader, comp.size as usize)?;
    preset.parameters.add_text("XmlContent", 1, xml);
    Ok(())
}

fn decode_opaque<R: Read + Seek>(
    preset: &mut VstPreset,
    reader: &mut R,
    file_len: u64,
) -> Result<()> {
    capture_comp(preset, reader)?;
    capture_cont(preset, reader)?;

    // A bare legacy chunk sometimes sits at the start of Comp with no
    // wrapper at all. If its magic is there it must parse; a broken chunk
    // is a structural error, not something to discard quietly.
    let has_legacy_magic = preset
        .comp_chunk_data()
        .is_some_and(|data| data.starts_with(FXP_MAGIC));
    if has_legacy_magic {
        reader.seek(SeekFrom::Start(preset.chunks.comp.offset))?;
        let fxp = Fxp::parse(reader, file_len, None)?;
        preset.fxp = Some(fxp);
    }
    Ok(())
}

fn decode_reverence<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    // The layout has fields the parameter model cannot hold, so the raw
    // chunk is kept for rewriting; the decoded parameters are a view.
    capture_comp(preset, reader)?;

    let comp = preset.chunks.comp;
    reader.seek(SeekFrom::Start(comp.offset))?;

    let wave_path_1 = read_utf16_slot(reader, WIDE_PATH_SLOT)?;
    tracing::debug!(path = %wave_path_1, "wave file path 1");
    preset.parameters.add_text("wave-file-path-1", 0, wave_path_1);

    let wave_count = reader.read_u32::<LittleEndian>()?;
    preset
        .parameters
        .add_number("wave-count", 0, f64::from(wave_count));
    let _unknown = reader.read_u32::<LittleEndian>()?;

    let mut parameter_count = -1i64;
    if wave_count > 0 {
        let wave_path_2 = read_utf16_slot(reader, WIDE_PATH_SLOT)?;
        preset.parameters.add_text("wave-file-path-2", 0, wave_path_2);

        let wave_file_name = read_utf16_slot(reader, WIDE_PATH_SLOT)?;
        preset.parameters.add_text("wave-file-name", 0, wave_file_name);

        let image_count = reader.read_u32::<LittleEndian>()?;
        preset
            .parameters
            .add_number("image-count", 0, f64::from(image_count));
        for i in 0..image_count {
            let image_path = read_utf16_slot(reader, WIDE_PATH_SLOT)?;
            preset
                .parameters
                .add_text(&format!("image-file-name-{}", i + 1), 0, image_path);
        }

        let count = reader.read_i32::<LittleEndian>()?;
        preset
            .parameters
            .add_number("parameter-count", 0, f64::from(count));
        parameter_count = i64::from(count);
    }

    let end = comp.end();
    let mut counter = 0i64;
    loop {
        let position = reader.stream_position()?;
        if position == end {
            break;
        }
        if position > end {
            return Err(overrun(&preset.class_id, position, end));
        }
        counter += 1;
        if parameter_count > 0 && counter > parameter_count {
            break;
        }
        let (name, index, value) = read_record(reader, &preset.class_id, end)?;
        preset.parameters.add_number(&name, index, value);
    }
    Ok(())
}

fn decode_panner<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    let comp = preset.chunks.comp;
    reader.seek(SeekFrom::Start(comp.offset))?;

    let pan_1 = reader.read_f32::<LittleEndian>()?;
    let pan_2 = reader.read_f32::<LittleEndian>()?;
    preset.parameters.add_number("Unknown1", 1, f64::from(pan_1));
    preset.parameters.add_number("Unknown2", 2, f64::from(pan_2));
    for (name, index) in [("Unknown3", 3), ("Unknown4", 4), ("Unknown5", 5)] {
        let value = reader.read_u32::<LittleEndian>()?;
        preset.parameters.add_number(name, index, f64::from(value));
    }
    Ok(())
}

fn encode_panner(preset: &VstPreset) -> Option<Vec<u8>> {
    let mut buf = Vec::with_capacity(20);
    for key in ["Unknown1", "Unknown2"] {
        let value = preset.parameters.number(key)?;
        buf.extend_from_slice(&(value as f32).to_le_bytes());
    }
    for key in ["Unknown3", "Unknown4", "Unknown5"] {
        let value = preset.parameters.number(key)?;
        buf.extend_from_slice(&(value as u32).to_le_bytes());
    }
    Some(buf)
}

fn decode_vendor_xml<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    capture_comp(preset, reader)?;

    let comp = preset.chunks.comp;
    reader.seek(SeekFrom::Start(comp.offset))?;

    let _ = reader.read_u32::<BigEndian>()?;
    let _ = reader.read_u32::<BigEndian>()?;
    let _ = reader.read_u32::<BigEndian>()?;

    let preset_type = read_fourcc(reader)?;
    tracing::debug!(preset_type = %fourcc_lossy(&preset_type), "vendor preset type");
    let set_type = read_fourcc(reader)?;
    tracing::debug!(set_type = %fourcc_lossy(&set_type), "vendor set type");

    let main_len = u64::from(reader.read_u32::<BigEndian>()?);
    let xps = read_fourcc(reader)?;
    if &xps != b"XPst" {
        tracing::warn!(got = %fourcc_lossy(&xps), "expected 'XPst' content marker");
    }

    // The post section fills whatever the main section and its framing
    // leave of the chunk.
    let post_len = comp
        .size
        .checked_sub(main_len + VENDOR_XML_FRAMING)
        .ok_or_else(|| {
            overrun(
                &preset.class_id,
                comp.offset + VENDOR_XML_FRAMING + main_len,
                comp.end(),
            )
        })?;

    let xml = read_string(reader, main_len as usize)?;
    preset.parameters.add_text("XmlContent", 1, xml);

    let post_type = read_fourcc(reader)?;
    tracing::debug!(post_type = %fourcc_lossy(&post_type), "vendor post type");

    let post = read_string(reader, post_len as usize)?;
    preset.parameters.add_text("XmlContentPost", 2, post);
    Ok(())
}

fn decode_kontakt<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    capture_comp(preset, reader)?;

    let comp = preset.chunks.comp;
    reader.seek(SeekFrom::Start(comp.offset))?;
    let _unknown = reader.read_u32::<LittleEndian>()?;

    let end = comp.end();
    loop {
        let position = reader.stream_position()?;
        if position == end {
            break;
        }
        if position > end {
            return Err(overrun(&preset.class_id, position, end));
        }
        let (name, index, value) = read_record(reader, &preset.class_id, end)?;
        preset.parameters.add_number(&name, index, value);
    }
    Ok(())
}

/// The FabFilter wrapper, dispatched on its `FabF` magic rather than the
/// class identifier. The reader is positioned just past the magic.
pub(crate) fn decode_fabf<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    let version = reader.read_u32::<LittleEndian>()?;
    let name_len = reader.read_u32::<LittleEndian>()?;
    let name = read_string(reader, name_len as usize)?;
    let _unknown = reader.read_u32::<LittleEndian>()?;
    let parameter_count = reader.read_u32::<LittleEndian>()?;
    tracing::debug!(%name, version, parameter_count, "FabFilter wrapper");

    preset.parameters.add_text("PresetName", 0, name);
    for counter in 0..parameter_count {
        let value = reader.read_f32::<LittleEndian>()?;
        preset
            .parameters
            .add_number(&format!("unknown{counter}"), counter as i32, f64::from(value));
    }

    capture_cont(preset, reader)?;
    // keep the raw chunk so a rewrite reproduces the wrapper bit for bit
    capture_comp(preset, reader)?;
    Ok(())
}
