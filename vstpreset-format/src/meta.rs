//! The `Info` chunk: the canonical `MetaInfo` XML document.
//!
//! Hosts compare this chunk byte for byte, so the writer pins every detail
//! of the serialization: declaration included, tab indentation, CRLF line
//! endings, one trailing CRLF, and no space before self-closing terminators.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::Result;

pub(crate) const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

const MEDIA_TYPE: &str = "VstPreset";

/// Plugin metadata carried in the `Info` chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaInfo {
    pub category: String,
    pub name: String,
    pub vendor: String,
}

impl MetaInfo {
    /// Render the canonical `MetaInfo` document.
    ///
    /// Returns the document string and its UTF-8-BOM-prefixed byte form as
    /// one unit; the bytes are always the BOM followed by the string, so the
    /// two can never diverge.
    pub fn canonicalize(&self) -> Result<(String, Vec<u8>)> {
        let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("MetaInfo")))?;

        let attributes = [
            ("MediaType", MEDIA_TYPE),
            ("PlugInCategory", self.category.as_str()),
            ("PlugInName", self.name.as_str()),
            ("PlugInVendor", self.vendor.as_str()),
        ];
        for (id, value) in attributes {
            let mut element = BytesStart::new("Attribute");
            element.push_attribute(("id", id));
            element.push_attribute(("value", value));
            element.push_attribute(("type", "string"));
            element.push_attribute(("flags", "writeProtected"));
            writer.write_event(Event::Empty(element))?;
        }

        writer.write_event(Event::End(BytesEnd::new("MetaInfo")))?;

        let mut xml = String::from_utf8(writer.into_inner())
            .expect("writer only ever emits UTF-8");
        // Pin the byte layout: the serializer's newline and self-closing
        // conventions differ from what hosts expect.
        xml = xml.replace("\r\n", "\n").replace('\n', "\r\n");
        xml = xml.replace(" />", "/>");
        xml.push_str("\r\n");

        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + xml.len());
        bytes.extend_from_slice(&UTF8_BOM);
        bytes.extend_from_slice(xml.as_bytes());
        Ok((xml, bytes))
    }

    /// Extract the plugin attributes from `Info` chunk bytes. A leading (or
    /// trailing) BOM is tolerated.
    pub fn parse(bytes: &[u8]) -> Result<MetaInfo> {
        let text = String::from_utf8_lossy(strip_bom(bytes));
        let mut reader = Reader::from_str(&text);
        let mut meta = MetaInfo::default();

        loop {
            match reader.read_event()? {
                Event::Empty(element) | Event::Start(element)
                    if element.name().as_ref() == b"Attribute" =>
                {
                    let mut id = None;
                    let mut value = None;
                    for attribute in element.attributes() {
                        let attribute = attribute?;
                        match attribute.key.as_ref() {
                            b"id" => id = Some(attribute.unescape_value()?.into_owned()),
                            b"value" => value = Some(attribute.unescape_value()?.into_owned()),
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(value)) = (id, value) {
                        match id.as_str() {
                            "PlugInCategory" => meta.category = value,
                            "PlugInName" => meta.name = value,
                            "PlugInVendor" => meta.vendor = value,
                            _ => {}
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(meta)
    }
}

/// Strip a UTF-8 BOM from either end of the chunk. Some writers append one.
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    let mut bytes = bytes;
    if bytes.starts_with(&UTF8_BOM) {
        bytes = &bytes[UTF8_BOM.len()..];
    }
    if bytes.ends_with(&UTF8_BOM) {
        bytes = &bytes[..bytes.len() - UTF8_BOM.len()];
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_byte_exact() {
        let meta = MetaInfo {
            category: "Fx".into(),
            name: "Delay".into(),
            vendor: "Acme".into(),
        };
        let (xml, bytes) = meta.canonicalize().unwrap();

        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n\
                        <MetaInfo>\r\n\
                        \t<Attribute id=\"MediaType\" value=\"VstPreset\" type=\"string\" flags=\"writeProtected\"/>\r\n\
                        \t<Attribute id=\"PlugInCategory\" value=\"Fx\" type=\"string\" flags=\"writeProtected\"/>\r\n\
                        \t<Attribute id=\"PlugInName\" value=\"Delay\" type=\"string\" flags=\"writeProtected\"/>\r\n\
                        \t<Attribute id=\"PlugInVendor\" value=\"Acme\" type=\"string\" flags=\"writeProtected\"/>\r\n\
                        </MetaInfo>\r\n";
        assert_eq!(xml, expected);

        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(&bytes[3..], xml.as_bytes());
        assert!(!xml.contains(" />"));
    }

    #[test]
    fn parse_recovers_the_attributes() {
        let meta = MetaInfo {
            category: "Fx|Dynamics".into(),
            name: "Compressor".into(),
            vendor: "Steinberg Media Technologies".into(),
        };
        let (_, bytes) = meta.canonicalize().unwrap();
        let parsed = MetaInfo::parse(&bytes).unwrap();
        assert_eq!(parsed, meta);
    }

    #[test]
    fn parse_tolerates_missing_bom() {
        let meta = MetaInfo {
            category: "Instrument".into(),
            name: "Padshop".into(),
            vendor: "Steinberg".into(),
        };
        let (xml, _) = meta.canonicalize().unwrap();
        let parsed = MetaInfo::parse(xml.as_bytes()).unwrap();
        assert_eq!(parsed.name, "Padshop");
    }

    #[test]
    fn escaped_values_round_trip() {
        let meta = MetaInfo {
            category: "Fx".into(),
            name: "Tom & Jerry <3".into(),
            vendor: "A\"B".into(),
        };
        let (_, bytes) = meta.canonicalize().unwrap();
        let parsed = MetaInfo::parse(&bytes).unwrap();
        assert_eq!(parsed, meta);
    }
}
