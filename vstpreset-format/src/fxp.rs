//! The embedded legacy FXP/FXB chunk.
//!
//! Several payload grammars wrap an older, self-contained preset format:
//! a `CcnK` chunk whose sub-magic distinguishes a single preset from a
//! whole bank. The chunk is captured verbatim; its interior is never
//! interpreted here.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::stream::{fourcc_lossy, read_bytes, read_fourcc};

pub(crate) const FXP_MAGIC: &[u8; 4] = b"CcnK";

/// Classification carried by the chunk's sub-magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxpKind {
    /// `FxCk` or `FPCh`.
    Preset,
    /// `FxBk` or `FBCh`.
    Bank,
}

impl FxpKind {
    fn describe(self) -> &'static str {
        match self {
            FxpKind::Preset => "preset file",
            FxpKind::Bank => "bank file",
        }
    }
}

/// A raw legacy chunk captured from the data area, from its `CcnK` magic
/// through its declared size.
#[derive(Debug, Clone)]
pub struct Fxp {
    pub kind: FxpKind,
    pub sub_magic: [u8; 4],
    pub data: Vec<u8>,
}

impl Fxp {
    /// Parse a legacy chunk at the current stream position.
    ///
    /// `expect_single` is the classification implied by the outer wrapper
    /// (`LPXF` means single preset, `VstW` means bank). When the wrapper and
    /// the sub-magic disagree the chunk is rejected, never silently
    /// reclassified. `None` skips the check for chunks found without a
    /// wrapper.
    pub(crate) fn parse<R: Read + Seek>(
        reader: &mut R,
        file_len: u64,
        expect_single: Option<bool>,
    ) -> Result<Fxp> {
        let chunk_start = reader.stream_position()?;
        let magic = read_fourcc(reader)?;
        if &magic != FXP_MAGIC {
            return Err(Error::InvalidMagic {
                expected: "CcnK",
                actual: fourcc_lossy(&magic),
            });
        }

        // The size field counts from the sub-magic; the 8 bytes of magic and
        // size field themselves are added back to span the whole chunk.
        let chunk_size = u64::from(reader.read_u32::<BigEndian>()?) + 8;
        let pos = reader.stream_position()?;
        if pos + chunk_size >= file_len {
            return Err(Error::InvalidChunkSize {
                size: chunk_size,
                offset: chunk_start,
                file_len,
            });
        }

        let sub_magic = read_fourcc(reader)?;
        let kind = match &sub_magic {
            b"FxCk" | b"FPCh" => FxpKind::Preset,
            b"FxBk" | b"FBCh" => FxpKind::Bank,
            _ => {
                return Err(Error::InvalidSubMagic {
                    actual: fourcc_lossy(&sub_magic),
                });
            }
        };

        if let Some(single) = expect_single {
            let expected = if single { FxpKind::Preset } else { FxpKind::Bank };
            if kind != expected {
                return Err(Error::StructuralMismatch {
                    expected_kind: expected.describe(),
                    actual_kind: kind.describe(),
                    sub_magic: fourcc_lossy(&sub_magic),
                });
            }
        }

        reader.seek(SeekFrom::Start(chunk_start))?;
        let data = read_bytes(reader, chunk_size as usize)?;
        tracing::debug!(
            offset = format_args!("{:#x}", chunk_start),
            bytes = data.len(),
            kind = kind.describe(),
            "captured legacy chunk"
        );

        Ok(Fxp {
            kind,
            sub_magic,
            data,
        })
    }

    /// Wrap the chunk in the 16-byte `VstW` envelope hosts expect in the
    /// `Comp` chunk of a rewritten preset.
    pub fn to_comp_chunk(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(16 + self.data.len());
        buf.extend_from_slice(b"VstW");
        buf.extend_from_slice(&8u32.to_be_bytes()); // VstW chunk size
        buf.extend_from_slice(&1u32.to_be_bytes()); // VstW chunk version
        buf.extend_from_slice(&0u32.to_be_bytes()); // bypass
        buf.extend_from_slice(&self.data);
        buf
    }
}
