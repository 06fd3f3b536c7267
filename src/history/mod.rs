//! Burp Suite proxy history parser.
//!
//! Reads the XML produced by *Proxy > HTTP history > Save items*:
//!
//! ```xml
//! <?xml version="1.0"?>
//! <!DOCTYPE items [ ... ]>
//! <items burpVersion="2023.10" exportTime="...">
//!   <item>
//!     <time>Tue Mar 12 10:22:33 CET 2024</time>
//!     <url><![CDATA[https://example.com/login]]></url>
//!     <host ip="93.184.216.34">example.com</host>
//!     <port>443</port>
//!     <protocol>https</protocol>
//!     <method><![CDATA[POST]]></method>
//!     <path><![CDATA[/login]]></path>
//!     <extension>null</extension>
//!     <request base64="true"><![CDATA[UE9TVCAv...]]></request>
//!     <status>302</status>
//!     <responselength>512</responselength>
//!     <mimetype>HTML</mimetype>
//!     <response base64="true"><![CDATA[SFRUUC8x...]]></response>
//!     <comment></comment>
//!   </item>
//! </items>
//! ```
//!
//! Unknown elements and root attributes are ignored, and markup nested inside
//! a field contributes only its text. Request and response text is kept
//! byte for byte. The first item missing `method` or `url`, or holding an
//! unparseable typed value, aborts the parse.

mod raw;

use crate::error::ParseError;
use crate::record::{EncodedBody, Host, Protocol, Record};

use raw::{RawBody, RawHistory, RawItem};

/// Parses an export from raw bytes.
pub fn parse(input: &[u8]) -> Result<Vec<Record>, ParseError> {
    let text = std::str::from_utf8(input)
        .map_err(|e| ParseError::malformed(format!("input is not valid UTF-8: {}", e)))?;
    parse_str(text)
}

/// Parses an export from text, returning records in document order.
pub fn parse_str(input: &str) -> Result<Vec<Record>, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let history = RawHistory::read(input)?;

    let records = history
        .items
        .into_iter()
        .enumerate()
        .map(|(i, item)| lift_item(i + 1, item))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(records = records.len(), "parsed proxy history");
    Ok(records)
}

/// Turns one raw `<item>` into a [`Record`]. `item` is 1-based.
fn lift_item(item: usize, raw: RawItem) -> Result<Record, ParseError> {
    let method = required(item, "method", raw.method)?;
    let url = required(item, "url", raw.url)?;

    let host = raw
        .host
        .map(|h| Host {
            name: h.name,
            ip: non_empty(h.ip),
        })
        .unwrap_or_default();

    let protocol = match non_empty(raw.protocol) {
        Some(name) => Some(
            Protocol::from_name(name.trim())
                .ok_or_else(|| ParseError::invalid(item, "protocol", &name))?,
        ),
        None => None,
    };

    Ok(Record {
        time: raw.time.unwrap_or_default(),
        url,
        host,
        port: number(item, "port", raw.port)?,
        protocol,
        method,
        path: raw.path.unwrap_or_default(),
        extension: raw.extension.unwrap_or_default(),
        request: raw.request.map(lift_body).unwrap_or_else(|| EncodedBody::plain("")),
        status: number(item, "status", raw.status)?,
        response_length: number(item, "responselength", raw.responselength)?,
        mime_type: non_empty(raw.mimetype),
        response: raw.response.map(lift_body),
        comment: raw.comment.unwrap_or_default(),
    })
}

fn lift_body(raw: RawBody) -> EncodedBody {
    if raw.is_base64() {
        EncodedBody::base64(raw.text)
    } else {
        EncodedBody::plain(raw.text)
    }
}

fn required(item: usize, field: &'static str, value: Option<String>) -> Result<String, ParseError> {
    non_empty(value).ok_or_else(|| ParseError::missing(item, field))
}

/// Drops values that are absent or blank.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn number<T: std::str::FromStr>(
    item: usize,
    field: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ParseError> {
    match non_empty(value) {
        Some(text) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ParseError::invalid(item, field, &text)),
        None => Ok(None),
    }
}
