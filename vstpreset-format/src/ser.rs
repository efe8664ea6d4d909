//! Serialization of the container envelope.
//!
//! The data area is written in `Comp`, `Cont`, `Info` order and the table
//! offset in the header must equal the actual post-data position, so a
//! preset is only writable after its positions have been computed.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::chunk::ChunkId;
use crate::error::{Error, Result};
use crate::header::{LIST_MAGIC, MAGIC_BYTES};
use crate::preset::VstPreset;

pub(crate) fn write_preset<W: Write>(preset: &VstPreset, writer: &mut W) -> Result<()> {
    if !preset.positions_computed {
        return Err(Error::MissingPositions);
    }

    writer.write_all(MAGIC_BYTES)?;
    writer.write_u32::<LittleEndian>(preset.version)?;
    writer.write_all(preset.class_id.as_bytes())?;
    writer.write_u64::<LittleEndian>(preset.chunks.list_pos)?;

    if let Some(data) = preset.comp_chunk_data() {
        writer.write_all(data)?;
    }
    if let Some(data) = preset.cont_chunk_data() {
        writer.write_all(data)?;
    }
    if let Some(bytes) = preset.info_xml_bytes() {
        writer.write_all(bytes)?;
    }

    writer.write_all(LIST_MAGIC)?;
    writer.write_u32::<LittleEndian>(3)?;
    let entries = [
        (ChunkId::Comp, preset.chunks.comp),
        (ChunkId::Cont, preset.chunks.cont),
        (ChunkId::Info, preset.chunks.info),
    ];
    for (id, entry) in entries {
        writer.write_all(&id.tag())?;
        writer.write_u64::<LittleEndian>(entry.offset)?;
        writer.write_u64::<LittleEndian>(entry.size)?;
    }
    Ok(())
}
