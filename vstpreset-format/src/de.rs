//! Deserialization: the container envelope, wrapper detection, payload
//! dispatch, and the advisory trailing-list verification.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

use crate::chunk::{ChunkEntry, ChunkId, ChunkTable};
use crate::error::{Error, Result};
use crate::fxp::Fxp;
use crate::header::{ClassId, LIST_MAGIC, MAGIC_BYTES, MIN_FILE_SIZE};
use crate::meta::{strip_bom, MetaInfo};
use crate::payload::{self, PayloadKind};
use crate::preset::VstPreset;
use crate::stream::{fourcc_lossy, read_bytes, read_fourcc};

pub(crate) fn read_preset<R: Read + Seek>(reader: &mut R, file_len: u64) -> Result<VstPreset> {
    let (version, class_id, list_pos) = read_header(reader, file_len)?;

    let data_pos = reader.stream_position()?;
    reader.seek(SeekFrom::Start(list_pos))?;
    let chunks = read_chunk_list(reader, list_pos)?;
    reader.seek(SeekFrom::Start(data_pos))?;

    let mut preset = VstPreset::from_read(version, class_id, chunks);
    read_data(&mut preset, reader, file_len)?;
    read_info_xml(&mut preset, reader)?;
    verify_chunk_list(reader, file_len);
    Ok(preset)
}

/// Read only the header, chunk list and `Info` chunk. This recovers the
/// metadata even from files whose payload grammar fails to decode.
pub(crate) fn read_meta_only<R: Read + Seek>(
    reader: &mut R,
    file_len: u64,
) -> Result<(MetaInfo, String)> {
    let (_, _, list_pos) = read_header(reader, file_len)?;
    reader.seek(SeekFrom::Start(list_pos))?;
    let chunks = read_chunk_list(reader, list_pos)?;

    let info = chunks.info;
    if info.size == 0 {
        return Ok((MetaInfo::default(), String::new()));
    }
    reader.seek(SeekFrom::Start(info.offset))?;
    let bytes = read_bytes(reader, info.size as usize)?;
    let text = String::from_utf8_lossy(strip_bom(&bytes)).into_owned();
    let meta = MetaInfo::parse(&bytes)?;
    Ok((meta, text))
}

fn read_header<R: Read + Seek>(reader: &mut R, file_len: u64) -> Result<(u32, ClassId, u64)> {
    if file_len < MIN_FILE_SIZE {
        return Err(Error::TooSmall { len: file_len });
    }

    let magic = read_fourcc(reader)?;
    if &magic != MAGIC_BYTES {
        return Err(Error::InvalidMagic {
            expected: "VST3",
            actual: fourcc_lossy(&magic),
        });
    }

    let version = reader.read_u32::<LittleEndian>()?;
    let mut raw = [0u8; ClassId::LEN];
    reader.read_exact(&mut raw)?;
    let class_id = ClassId::from_raw(raw);
    let list_pos = reader.read_u64::<LittleEndian>()?;

    tracing::debug!(
        version,
        class_id = %class_id,
        list_pos = format_args!("{:#x}", list_pos),
        "read preset header"
    );
    Ok((version, class_id, list_pos))
}

fn read_chunk_list<R: Read + Seek>(reader: &mut R, list_pos: u64) -> Result<ChunkTable> {
    let magic = read_fourcc(reader)?;
    let count = reader.read_u32::<LittleEndian>()?;

    let mut table = ChunkTable {
        list_pos,
        ..Default::default()
    };
    if &magic != LIST_MAGIC {
        tracing::warn!(
            got = %fourcc_lossy(&magic),
            offset = format_args!("{:#x}", list_pos),
            "expected 'List' at the table offset"
        );
        return Ok(table);
    }

    for _ in 0..count {
        let tag = read_fourcc(reader)?;
        let entry = ChunkEntry {
            offset: reader.read_u64::<LittleEndian>()?,
            size: reader.read_u64::<LittleEndian>()?,
        };
        tracing::debug!(
            tag = %fourcc_lossy(&tag),
            offset = format_args!("{:#x}", entry.offset),
            size = entry.size,
            "chunk list entry"
        );
        match ChunkId::from_tag(tag) {
            ChunkId::Comp => table.comp = entry,
            ChunkId::Cont => table.cont = entry,
            ChunkId::Info => table.info = entry,
            ChunkId::Other(tag) => {
                tracing::warn!(tag = %fourcc_lossy(&tag), "unexpected chunk id in list");
            }
        }
    }
    Ok(table)
}

/// Decode the data area. The wrapper magics (`LPXF`, `VstW`, `FabF`) are
/// checked before any class-identifier dispatch, which is the order hosts
/// write them in.
fn read_data<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R, file_len: u64) -> Result<()> {
    let wrapper = read_fourcc(reader)?;
    match &wrapper {
        b"LPXF" => {
            let position = reader.stream_position()?;
            let expected = preset.chunks.list_pos + position - 4;
            if file_len != expected {
                return Err(Error::SizeMismatch {
                    context: "LPXF wrapper",
                    expected,
                    actual: file_len,
                });
            }
            let fxp = Fxp::parse(reader, file_len, Some(true))?;
            preset.set_fxp(fxp);
        }
        b"VstW" => {
            let _chunk_size = reader.read_u32::<BigEndian>()?;
            let _chunk_version = reader.read_u32::<BigEndian>()?;
            let _bypass = reader.read_u32::<BigEndian>()?;

            let position = reader.stream_position()?;
            let expected = preset.chunks.list_pos + position + 4;
            // Cubase tends to forget the wrapper items, hence the second
            // accepted size.
            let forgiving = (preset.chunks.list_pos + position).checked_sub(16);
            if file_len != expected && Some(file_len) != forgiving {
                return Err(Error::SizeMismatch {
                    context: "VstW wrapper",
                    expected,
                    actual: file_len,
                });
            }
            let fxp = Fxp::parse(reader, file_len, Some(false))?;
            preset.set_fxp(fxp);
        }
        b"FabF" => payload::decode_fabf(preset, reader)?,
        _ => {
            let kind = PayloadKind::for_class_id(&preset.class_id);
            tracing::debug!(class_id = %preset.class_id, ?kind, "dispatching payload grammar");
            payload::decode(kind, preset, reader, file_len).map_err(|e| {
                tracing::error!(class_id = %preset.class_id, error = %e, "payload decode failed");
                e
            })?;
        }
    }
    Ok(())
}

fn read_info_xml<R: Read + Seek>(preset: &mut VstPreset, reader: &mut R) -> Result<()> {
    let info = preset.chunks.info;
    if info.size == 0 {
        return Ok(());
    }

    let position = reader.stream_position()?;
    if info.offset > position {
        tracing::debug!(skipped = info.offset - position, "skipping to info xml");
    }
    reader.seek(SeekFrom::Start(info.offset))?;
    let bytes = read_bytes(reader, info.size as usize)?;

    match MetaInfo::parse(&bytes) {
        Ok(meta) => preset.meta = Some(meta),
        Err(e) => tracing::warn!(error = %e, "failed to parse info xml attributes"),
    }
    preset.info_xml = Some(String::from_utf8_lossy(strip_bom(&bytes)).into_owned());
    preset.info_xml_bytes = Some(bytes);
    Ok(())
}

/// Advisory re-read of a trailing `List` structure. Some hosts leave a
/// second copy of the table after the data area; its purpose is not
/// established, so mismatches are only ever logged.
fn verify_chunk_list<R: Read + Seek>(reader: &mut R, file_len: u64) {
    let outcome: Result<()> = (|| {
        let position = reader.stream_position()?;
        if file_len.saturating_sub(position) < 8 {
            return Ok(());
        }

        let magic = read_fourcc(reader)?;
        let count = reader.read_u32::<LittleEndian>()?;
        if &magic != LIST_MAGIC {
            tracing::error!(
                got = %fourcc_lossy(&magic),
                count,
                "expected trailing 'List' structure"
            );
            return Ok(());
        }

        for _ in 0..count {
            let tag = read_fourcc(reader)?;
            let offset = reader.read_u64::<LittleEndian>()?;
            let size = reader.read_u64::<LittleEndian>()?;
            if matches!(ChunkId::from_tag(tag), ChunkId::Other(_)) {
                tracing::error!(
                    tag = %fourcc_lossy(&tag),
                    offset,
                    size,
                    "expected 'Comp', 'Cont' or 'Info' in trailing list"
                );
            }
        }
        Ok(())
    })();

    if let Err(e) = outcome {
        tracing::debug!(error = %e, "trailing list verification stopped early");
    }
}
