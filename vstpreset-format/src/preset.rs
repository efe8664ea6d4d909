//! The preset container itself: the public read/write API.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use crate::chunk::ChunkTable;
use crate::de;
use crate::error::{Error, Result};
use crate::fxp::Fxp;
use crate::header::{ClassId, VERSION};
use crate::meta::MetaInfo;
use crate::parameter::ParameterMap;
use crate::payload::{self, PayloadKind};
use crate::ser;

/// Reserved parameter key holding the raw `Comp` chunk bytes.
pub const COMP_CHUNK_DATA: &str = "CompChunkData";
/// Reserved parameter key holding the raw `Cont` chunk bytes.
pub const CONT_CHUNK_DATA: &str = "ContChunkData";

/// A Steinberg `.vstpreset` file.
///
/// One instance corresponds to one file or stream. Reading and writing each
/// hold the stream only for the duration of the call; nothing is shared
/// between presets, so distinct presets are free to live on distinct
/// threads.
pub struct VstPreset {
    pub(crate) version: u32,
    pub(crate) class_id: ClassId,
    pub(crate) chunks: ChunkTable,
    pub(crate) parameters: ParameterMap,
    pub(crate) fxp: Option<Fxp>,
    pub(crate) meta: Option<MetaInfo>,
    pub(crate) info_xml: Option<String>,
    pub(crate) info_xml_bytes: Option<Vec<u8>>,
    pub(crate) positions_computed: bool,
}

impl fmt::Debug for VstPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VstPreset")
            .field("class_id", &self.class_id)
            .field("version", &self.version)
            .field("chunks", &self.chunks)
            .field("parameters", &self.parameters.len())
            .finish_non_exhaustive()
    }
}

impl VstPreset {
    /// Create an empty preset for the given class identifier.
    pub fn new(class_id: ClassId) -> VstPreset {
        VstPreset {
            version: VERSION,
            class_id,
            chunks: ChunkTable::default(),
            parameters: ParameterMap::new(),
            fxp: None,
            meta: None,
            info_xml: None,
            info_xml_bytes: None,
            positions_computed: false,
        }
    }

    pub(crate) fn from_read(version: u32, class_id: ClassId, chunks: ChunkTable) -> VstPreset {
        VstPreset {
            version,
            class_id,
            chunks,
            parameters: ParameterMap::new(),
            fxp: None,
            meta: None,
            info_xml: None,
            info_xml_bytes: None,
            positions_computed: true,
        }
    }

    /// Read a preset from a file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<VstPreset> {
        let path = path.as_ref();
        let file = open_file(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);
        de::read_preset(&mut reader, file_len).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to read preset");
            e
        })
    }

    /// Read a preset from any seekable stream of `len` bytes, positioned at
    /// the start of the container.
    pub fn read<R: Read + Seek>(reader: &mut R, len: u64) -> Result<VstPreset> {
        de::read_preset(reader, len)
    }

    #[inline]
    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    #[inline]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[inline]
    pub fn chunks(&self) -> &ChunkTable {
        &self.chunks
    }

    /// The grammar the class identifier selects.
    pub fn payload_kind(&self) -> PayloadKind {
        PayloadKind::for_class_id(&self.class_id)
    }

    #[inline]
    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    #[inline]
    pub fn parameters_mut(&mut self) -> &mut ParameterMap {
        &mut self.parameters
    }

    /// Plugin metadata extracted from the `Info` chunk, if any.
    pub fn meta(&self) -> Option<&MetaInfo> {
        self.meta.as_ref()
    }

    /// Set the plugin metadata, regenerating the canonical `Info` document
    /// so the string and byte forms stay in lockstep.
    pub fn set_meta(&mut self, meta: MetaInfo) -> Result<()> {
        let (xml, bytes) = meta.canonicalize()?;
        self.meta = Some(meta);
        self.info_xml = Some(xml);
        self.info_xml_bytes = Some(bytes);
        Ok(())
    }

    /// The `Info` document as text, BOM stripped.
    pub fn info_xml(&self) -> Option<&str> {
        self.info_xml.as_deref()
    }

    /// The `Info` document exactly as stored in the file, BOM included.
    pub fn info_xml_bytes(&self) -> Option<&[u8]> {
        self.info_xml_bytes.as_deref()
    }

    pub fn comp_chunk_data(&self) -> Option<&[u8]> {
        self.parameters.bytes(COMP_CHUNK_DATA)
    }

    pub fn set_comp_chunk_data(&mut self, data: Vec<u8>) {
        self.parameters.set_bytes(COMP_CHUNK_DATA, data);
    }

    pub fn cont_chunk_data(&self) -> Option<&[u8]> {
        self.parameters.bytes(CONT_CHUNK_DATA)
    }

    pub fn set_cont_chunk_data(&mut self, data: Vec<u8>) {
        self.parameters.set_bytes(CONT_CHUNK_DATA, data);
    }

    /// The embedded legacy chunk, when the data area carried one.
    pub fn fxp(&self) -> Option<&Fxp> {
        self.fxp.as_ref()
    }

    /// Attach a legacy chunk. Its `VstW`-wrapped form becomes the `Comp`
    /// chunk, which is how hosts expect rewrapped FXP/FXB data.
    pub fn set_fxp(&mut self, fxp: Fxp) {
        self.set_comp_chunk_data(fxp.to_comp_chunk());
        self.fxp = Some(fxp);
    }

    /// Recompute the chunk layout from the current chunk contents: `Comp`
    /// directly after the header, `Cont` after `Comp`, `Info` after `Cont`,
    /// the list after `Info`.
    pub fn compute_positions(&mut self) {
        let comp_size = self.comp_chunk_data().map_or(0, |d| d.len() as u64);
        let cont_size = self.cont_chunk_data().map_or(0, |d| d.len() as u64);
        let info_size = self.info_xml_bytes.as_ref().map_or(0, |d| d.len() as u64);
        self.chunks = ChunkTable::compute(comp_size, cont_size, info_size);
        self.positions_computed = true;
    }

    /// Make sure chunk data and metadata exist, then lay out the chunks.
    ///
    /// Grammars whose parameters capture the `Comp` chunk completely are
    /// re-encoded from the parameter map; everything else must already
    /// carry raw chunk data.
    pub fn prepare_for_writing(&mut self) -> Result<()> {
        if self.comp_chunk_data().is_none() {
            if let Some(encoded) = payload::encode(self.payload_kind(), self) {
                self.set_comp_chunk_data(encoded);
            }
        }
        if self.comp_chunk_data().is_none() && self.cont_chunk_data().is_none() {
            return Err(Error::MissingChunkData {
                class_id: self.class_id.to_string(),
            });
        }

        if self.info_xml_bytes.is_none() {
            let meta = self.meta.clone().unwrap_or_default();
            self.set_meta(meta)?;
        }

        self.compute_positions();
        Ok(())
    }

    /// Write the preset to a file, creating or truncating it. Chunk data,
    /// metadata and positions are prepared first.
    pub fn write_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.prepare_for_writing()?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        ser::write_preset(self, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the preset to a stream. Fails with
    /// [`Error::MissingPositions`] unless positions have been computed.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        ser::write_preset(self, writer)
    }
}

impl fmt::Display for VstPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vst3ID: {}", self.class_id)?;
        for parameter in self.parameters.iter() {
            writeln!(f, "{parameter}")?;
        }
        if let Some(xml) = &self.info_xml {
            writeln!(f, "{xml}")?;
        }
        Ok(())
    }
}

/// Recover just the `Info` metadata from a preset file, without decoding
/// the payload. Useful when the payload grammar of a third-party file is
/// broken but the metadata is still wanted.
pub fn read_meta_info<P: AsRef<Path>>(path: P) -> Result<(MetaInfo, String)> {
    let path = path.as_ref();
    let file = open_file(path)?;
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::new(file);
    de::read_meta_only(&mut reader, file_len)
}

fn open_file(path: &Path) -> Result<File> {
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::NotFound(path.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}
