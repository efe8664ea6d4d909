use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while reading or writing a `.vstpreset` file.
///
/// Everything here is fatal for the current file. Advisory conditions
/// (unexpected chunk ids in the trailing list, duplicate parameter names)
/// are logged and never surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("file too small to be a preset: {len} bytes (minimum is 64)")]
    TooSmall { len: u64 },

    #[error("invalid file size reading {context}: {actual} (expected {expected})")]
    SizeMismatch {
        context: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("invalid legacy chunk size: {size} bytes at {offset:#x} does not fit in a file of {file_len} bytes")]
    InvalidChunkSize { size: u64, offset: u64, file_len: u64 },

    #[error("invalid file type: expected '{expected}', got '{actual}'")]
    InvalidMagic {
        expected: &'static str,
        actual: String,
    },

    #[error("legacy chunk sub-magic not recognized: '{actual}'")]
    InvalidSubMagic { actual: String },

    #[error("header indicates a {expected_kind} but chunk data is a {actual_kind} ('{sub_magic}')")]
    StructuralMismatch {
        expected_kind: &'static str,
        actual_kind: &'static str,
        sub_magic: String,
    },

    #[error("payload for class id '{class_id}' did not stop at its chunk boundary: position {position:#x}, chunk ends at {end:#x}")]
    RegionOverrun {
        class_id: String,
        position: u64,
        end: u64,
    },

    #[error("class identifier must be exactly 32 ASCII characters: '{actual}'")]
    InvalidClassId { actual: String },

    #[error("byte positions have not been computed; call compute_positions or prepare_for_writing first")]
    MissingPositions,

    #[error("no chunk data to write for class id '{class_id}'")]
    MissingChunkData { class_id: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid metadata xml")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid metadata xml attribute")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
}
