//! In-memory model of one captured HTTP transaction.

use std::borrow::Cow;
use std::fmt;

/// Transport scheme of a captured request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "http" => Some(Protocol::Http),
            "https" => Some(Protocol::Https),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target host as exported, with the resolved address when Burp recorded one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    pub ip: Option<String>,
}

/// How a body payload is stored inside the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// `base64="true"`
    Base64,
    /// Raw text, stored as-is
    Plain,
}

/// A request or response payload exactly as it appears in the export.
///
/// Decoding is left to the normalizer so that a broken payload is reported
/// per field instead of failing the whole parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    pub encoding: BodyEncoding,
    pub text: String,
}

impl EncodedBody {
    pub fn base64(text: impl Into<String>) -> Self {
        Self {
            encoding: BodyEncoding::Base64,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            encoding: BodyEncoding::Plain,
            text: text.into(),
        }
    }
}

/// One captured HTTP transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub time: String,
    pub url: String,
    pub host: Host,
    pub port: Option<u16>,
    pub protocol: Option<Protocol>,
    pub method: String,
    pub path: String,
    pub extension: String,
    pub request: EncodedBody,
    pub status: Option<u16>,
    pub response_length: Option<u64>,
    pub mime_type: Option<String>,
    /// `None` when the capture never saw a response.
    pub response: Option<EncodedBody>,
    pub comment: String,
}

impl Record {
    /// Creates a record with the two required fields and everything else empty.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            time: String::new(),
            url: url.into(),
            host: Host::default(),
            port: None,
            protocol: None,
            method: method.into(),
            path: String::new(),
            extension: String::new(),
            request: EncodedBody::plain(""),
            status: None,
            response_length: None,
            mime_type: None,
            response: None,
            comment: String::new(),
        }
    }

    /// Text of a metadata column.
    ///
    /// Returns `None` for the body columns, which need decoding first.
    pub fn column_text(&self, column: Column) -> Option<Cow<'_, str>> {
        let text = match column {
            Column::Time => Cow::Borrowed(self.time.as_str()),
            Column::Url => Cow::Borrowed(self.url.as_str()),
            Column::Hostname => Cow::Borrowed(self.host.name.as_str()),
            Column::IpAddress => Cow::Borrowed(self.host.ip.as_deref().unwrap_or_default()),
            Column::Port => optional_display(self.port),
            Column::Protocol => Cow::Borrowed(self.protocol.map(|p| p.as_str()).unwrap_or("")),
            Column::Method => Cow::Borrowed(self.method.as_str()),
            Column::Path => Cow::Borrowed(self.path.as_str()),
            Column::Extension => Cow::Borrowed(self.extension.as_str()),
            Column::Status => optional_display(self.status),
            Column::ResponseLength => optional_display(self.response_length),
            Column::MimeType => Cow::Borrowed(self.mime_type.as_deref().unwrap_or_default()),
            Column::Comment => Cow::Borrowed(self.comment.as_str()),
            Column::Request | Column::Response => return None,
        };
        Some(text)
    }

    /// Encoded payload behind a body column.
    pub fn body(&self, column: Column) -> Option<&EncodedBody> {
        match column {
            Column::Request => Some(&self.request),
            Column::Response => self.response.as_ref(),
            _ => None,
        }
    }
}

fn optional_display<T: fmt::Display>(value: Option<T>) -> Cow<'static, str> {
    value
        .map(|v| Cow::Owned(v.to_string()))
        .unwrap_or(Cow::Borrowed(""))
}

/// Report columns, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Time,
    Url,
    Hostname,
    IpAddress,
    Port,
    Protocol,
    Method,
    Path,
    Extension,
    Request,
    Status,
    ResponseLength,
    MimeType,
    Response,
    Comment,
}

impl Column {
    /// Every column in the order both renderers emit them.
    pub const ALL: [Column; 15] = [
        Column::Time,
        Column::Url,
        Column::Hostname,
        Column::IpAddress,
        Column::Port,
        Column::Protocol,
        Column::Method,
        Column::Path,
        Column::Extension,
        Column::Request,
        Column::Status,
        Column::ResponseLength,
        Column::MimeType,
        Column::Response,
        Column::Comment,
    ];

    /// Header text.
    pub fn title(&self) -> &'static str {
        match self {
            Column::Time => "Time",
            Column::Url => "URL",
            Column::Hostname => "Hostname",
            Column::IpAddress => "IP address",
            Column::Port => "Port",
            Column::Protocol => "Protocol",
            Column::Method => "Method",
            Column::Path => "Path",
            Column::Extension => "Extension",
            Column::Request => "Request",
            Column::Status => "Status",
            Column::ResponseLength => "Response length",
            Column::MimeType => "MIME type",
            Column::Response => "Response",
            Column::Comment => "Comment",
        }
    }

    /// Whether the column carries a decoded HTTP message.
    pub fn is_body(&self) -> bool {
        matches!(self, Column::Request | Column::Response)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Length-bounded view of a text value.
pub trait BoundedText {
    /// The first `max_chars` characters, borrowed when nothing is cut.
    fn bounded(&self, max_chars: usize) -> Cow<'_, str>;
}

impl BoundedText for str {
    fn bounded(&self, max_chars: usize) -> Cow<'_, str> {
        match self.char_indices().nth(max_chars) {
            Some((byte_index, _)) => Cow::Owned(self[..byte_index].to_string()),
            None => Cow::Borrowed(self),
        }
    }
}
