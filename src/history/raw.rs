//! Single pull-reader pass over the Burp XML export.
//!
//! Everything is optional here; required-field checks happen when the raw
//! item is lifted into a [`Record`](crate::record::Record). A field's value is
//! all text and CDATA nested inside it, so markup within a field is flattened
//! to its text. Request and response text is kept verbatim, every other field
//! is trimmed.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;

/// Name of the document root.
const ROOT_ELEMENT: &[u8] = b"items";
const ITEM_ELEMENT: &[u8] = b"item";

/// `<items>` root.
#[derive(Debug, Default)]
pub(super) struct RawHistory {
    pub items: Vec<RawItem>,
}

#[derive(Debug, Default)]
pub(super) struct RawItem {
    pub time: Option<String>,
    pub url: Option<String>,
    pub host: Option<RawHost>,
    pub port: Option<String>,
    pub protocol: Option<String>,
    pub method: Option<String>,
    pub path: Option<String>,
    pub extension: Option<String>,
    pub request: Option<RawBody>,
    pub status: Option<String>,
    pub responselength: Option<String>,
    pub mimetype: Option<String>,
    pub response: Option<RawBody>,
    pub comment: Option<String>,
}

/// `<host ip="203.0.113.7">example.com</host>`
#[derive(Debug, Default)]
pub(super) struct RawHost {
    pub ip: Option<String>,
    pub name: String,
}

/// `<request base64="true"><![CDATA[...]]></request>`
#[derive(Debug, Default)]
pub(super) struct RawBody {
    pub base64: Option<String>,
    pub text: String,
}

impl RawBody {
    pub fn is_base64(&self) -> bool {
        self.base64
            .as_deref()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("true"))
    }
}

impl RawHistory {
    /// Reads the whole document, checking well-formedness and that the single
    /// root element is `<items>`. Elements other than `<item>` under the root,
    /// and unknown fields inside an item, are skipped.
    pub fn read(input: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut history = RawHistory::default();
        let mut depth = 0usize;
        let mut seen_root = false;
        let mut item: Option<RawItem> = None;
        let mut field: Option<OpenField> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                ParseError::malformed(format!("{} at byte {}", e, reader.error_position()))
            })?;

            match event {
                Event::Start(start) => {
                    match depth {
                        0 => {
                            check_root(start.name().as_ref(), seen_root)?;
                            seen_root = true;
                        }
                        1 if start.name().as_ref() == ITEM_ELEMENT => {
                            item = Some(RawItem::default());
                        }
                        2 if item.is_some() => field = Some(OpenField::new(&start)?),
                        _ => {}
                    }
                    depth += 1;
                }
                Event::Empty(start) => match depth {
                    0 => {
                        check_root(start.name().as_ref(), seen_root)?;
                        seen_root = true;
                    }
                    1 if start.name().as_ref() == ITEM_ELEMENT => {
                        history.items.push(RawItem::default());
                    }
                    2 => {
                        if let Some(item) = item.as_mut() {
                            OpenField::new(&start)?.store(item);
                        }
                    }
                    _ => {}
                },
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    match depth {
                        2 => {
                            if let (Some(open), Some(item)) = (field.take(), item.as_mut()) {
                                open.store(item);
                            }
                        }
                        1 => {
                            if let Some(done) = item.take() {
                                history.items.push(done);
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(text) => {
                    if depth == 0 {
                        if !text.iter().all(u8::is_ascii_whitespace) {
                            return Err(ParseError::malformed("text outside the root element"));
                        }
                    } else if let Some(open) = field.as_mut() {
                        open.text
                            .push_str(&text.unescape().map_err(ParseError::malformed)?);
                    }
                }
                Event::CData(cdata) => {
                    if depth == 0 {
                        return Err(ParseError::malformed("CDATA outside the root element"));
                    }
                    if let Some(open) = field.as_mut() {
                        open.text.push_str(&String::from_utf8_lossy(&cdata));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if depth != 0 {
            return Err(ParseError::malformed("unexpected end of document"));
        }
        if !seen_root {
            return Err(ParseError::malformed("document has no root element"));
        }
        Ok(history)
    }
}

fn check_root(name: &[u8], seen_root: bool) -> Result<(), ParseError> {
    if seen_root {
        return Err(ParseError::malformed("more than one root element"));
    }
    if name != ROOT_ELEMENT {
        return Err(ParseError::malformed(format!(
            "expected <items> root, found <{}>",
            String::from_utf8_lossy(name)
        )));
    }
    Ok(())
}

/// A direct child of `<item>` whose text is still being collected.
struct OpenField {
    name: Vec<u8>,
    attr: Option<String>,
    text: String,
}

impl OpenField {
    fn new(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = start.name().as_ref().to_vec();
        let attr = match name.as_slice() {
            b"host" => attribute(start, "ip")?,
            b"request" | b"response" => attribute(start, "base64")?,
            _ => None,
        };
        Ok(Self {
            name,
            attr,
            text: String::new(),
        })
    }

    fn store(self, item: &mut RawItem) {
        let OpenField { name, attr, text } = self;
        let slot = match name.as_slice() {
            b"request" => {
                item.request = Some(RawBody { base64: attr, text });
                return;
            }
            b"response" => {
                item.response = Some(RawBody { base64: attr, text });
                return;
            }
            b"host" => {
                item.host = Some(RawHost {
                    ip: attr,
                    name: text.trim().to_string(),
                });
                return;
            }
            b"time" => &mut item.time,
            b"url" => &mut item.url,
            b"port" => &mut item.port,
            b"protocol" => &mut item.protocol,
            b"method" => &mut item.method,
            b"path" => &mut item.path,
            b"extension" => &mut item.extension,
            b"status" => &mut item.status,
            b"responselength" => &mut item.responselength,
            b"mimetype" => &mut item.mimetype,
            b"comment" => &mut item.comment,
            _ => return,
        };
        *slot = Some(text.trim().to_string());
    }
}

fn attribute(start: &BytesStart<'_>, name: &str) -> Result<Option<String>, ParseError> {
    match start.try_get_attribute(name).map_err(ParseError::malformed)? {
        Some(attr) => {
            let value = attr.unescape_value().map_err(ParseError::malformed)?;
            Ok(Some(value.into_owned()))
        }
        None => Ok(None),
    }
}
