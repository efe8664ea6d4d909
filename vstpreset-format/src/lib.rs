//! Herein lies the brains of the Steinberg `.vstpreset` file format.
//!
//! Use [`VstPreset::from_file`] to read presets and [`VstPreset::write_file`]
//! to write them back out. The container envelope (header, chunk list, data
//! area) is decoded for every file; the plugin-specific payload inside the
//! `Comp`/`Cont` chunks is decoded according to the grammar registered for
//! the file's class identifier, falling back to a lossless opaque capture
//! for identifiers nobody has reverse engineered yet.

mod chunk;
mod de;
mod error;
mod fxp;
mod header;
pub mod ids;
mod meta;
mod parameter;
mod payload;
mod preset;
mod ser;
mod stream;

pub use chunk::{ChunkEntry, ChunkId, ChunkTable};
pub use error::{Error, Result};
pub use fxp::{Fxp, FxpKind};
pub use header::{ClassId, HEADER_SIZE, MIN_FILE_SIZE};
pub use meta::MetaInfo;
pub use parameter::{ParamValue, Parameter, ParameterMap};
pub use payload::PayloadKind;
pub use preset::{read_meta_info, VstPreset, COMP_CHUNK_DATA, CONT_CHUNK_DATA};
