//! The chunk list: named regions of the data area, addressed by absolute
//! byte offset and size.

use crate::header::HEADER_SIZE;

/// Identifier of a chunk-list entry.
///
/// Only the three canonical ids are given meaning; anything else is carried
/// as [`ChunkId::Other`] and flagged in the log, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkId {
    /// Component state. Grammar selected by the class identifier.
    Comp,
    /// Controller state. Optional, frequently empty.
    Cont,
    /// UTF-8 XML metadata, BOM prefixed.
    Info,
    Other([u8; 4]),
}

impl ChunkId {
    pub fn from_tag(tag: [u8; 4]) -> ChunkId {
        match &tag {
            b"Comp" => ChunkId::Comp,
            b"Cont" => ChunkId::Cont,
            b"Info" => ChunkId::Info,
            _ => ChunkId::Other(tag),
        }
    }

    pub fn tag(&self) -> [u8; 4] {
        match self {
            ChunkId::Comp => *b"Comp",
            ChunkId::Cont => *b"Cont",
            ChunkId::Info => *b"Info",
            ChunkId::Other(tag) => *tag,
        }
    }
}

/// A single chunk-list entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkEntry {
    /// Absolute offset from the start of the file.
    pub offset: u64,
    pub size: u64,
}

impl ChunkEntry {
    /// One past the last byte of the chunk.
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// Offsets and sizes of the three canonical chunks plus the position of the
/// list itself.
///
/// Once finalized the chunks tile the data area contiguously: `Comp` starts
/// right after the header, `Cont` right after `Comp`, `Info` right after
/// `Cont`, and the list right after `Info`. Writers that break this tiling
/// are the usual source of "Invalid file size" rejections in hosts, so
/// [`ChunkTable::compute`] is the only way positions are produced here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkTable {
    pub comp: ChunkEntry,
    pub cont: ChunkEntry,
    pub info: ChunkEntry,
    /// Absolute offset of the `List` structure.
    pub list_pos: u64,
}

impl ChunkTable {
    /// Lay the chunks out contiguously for the given region sizes. Empty
    /// regions still tile: a zero-size `Cont` starts and ends where `Info`
    /// starts.
    pub fn compute(comp_size: u64, cont_size: u64, info_size: u64) -> ChunkTable {
        let comp = ChunkEntry {
            offset: HEADER_SIZE,
            size: comp_size,
        };
        let cont = ChunkEntry {
            offset: comp.end(),
            size: cont_size,
        };
        let info = ChunkEntry {
            offset: cont.end(),
            size: info_size,
        };
        ChunkTable {
            comp,
            cont,
            info,
            list_pos: info.end(),
        }
    }
}
