// quick-xml adapter for the structural token stream
//
// Self-closing tags (<item ... />) are expanded into a start/end pair so the
// inflater sees the same shape for both spellings.

use super::{Attributes, TagEvent, TokenStream};
use crate::error::InflateError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;

/// Token stream over an in-memory XML document
pub struct XmlTokenStream<'a> {
    reader: Reader<&'a [u8]>,
    pending_end: Option<String>,
    finished: bool,
}

impl<'a> XmlTokenStream<'a> {
    pub fn from_str(contents: &'a str) -> Self {
        let mut reader = Reader::from_str(contents);
        reader.trim_text(true);

        Self {
            reader,
            pending_end: None,
            finished: false,
        }
    }

    fn start_event(e: &BytesStart<'_>) -> Result<(String, Attributes), InflateError> {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let mut attributes = Attributes::new();

        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            // Namespace declarations and design-time tools: attributes are
            // not menu attributes
            if key == "xmlns" || key.starts_with("xmlns:") || key.starts_with("tools:") {
                continue;
            }
            let value = attr.unescape_value()?.into_owned();
            attributes.push(key, value);
        }

        Ok((name, attributes))
    }
}

impl TokenStream for XmlTokenStream<'_> {
    fn next_event(&mut self) -> Result<TagEvent, InflateError> {
        if let Some(name) = self.pending_end.take() {
            return Ok(TagEvent::End { name });
        }
        if self.finished {
            return Ok(TagEvent::EndDocument);
        }

        loop {
            match self.reader.read_event()? {
                Event::Start(ref e) => {
                    let (name, attributes) = Self::start_event(e)?;
                    trace!("<{}> with {} attributes", name, attributes.len());
                    return Ok(TagEvent::Start { name, attributes });
                }
                Event::Empty(ref e) => {
                    let (name, attributes) = Self::start_event(e)?;
                    trace!("<{} /> with {} attributes", name, attributes.len());
                    self.pending_end = Some(name.clone());
                    return Ok(TagEvent::Start { name, attributes });
                }
                Event::End(ref e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    trace!("</{}>", name);
                    return Ok(TagEvent::End { name });
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(TagEvent::EndDocument);
                }
                // Text, comments, declarations and doctype carry no structure
                _ => {}
            }
        }
    }
}
