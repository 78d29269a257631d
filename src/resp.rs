//! RESP wire format: typed values, a streaming decoder and a symmetric encoder.
//!
//! Values are length-prefixed or line-terminated with CRLF. The decoder reads
//! exactly one value from the front of the buffer and consumes it; everything
//! after it stays in the buffer for the next call.

use bytes::{Buf, BytesMut};
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";

#[derive(Error, Debug, PartialEq)]
pub enum RespError {
    /// The buffer holds the start of a value but not all of it yet.
    #[error("Incomplete value")]
    Incomplete,
    #[error("Unknown data type: {0:?}")]
    InvalidDataType(char),
    #[error("{0} data type not implemented")]
    UnsupportedDataType(&'static str),
    #[error("Invalid length: {0}")]
    InvalidLength(String),
    #[error("Invalid UTF-8 in value")]
    InvalidUtf8,
    #[error("Expected CRLF after value")]
    ExpectedCrlf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    /// Simple string: `+OK\r\n`
    SimpleString(String),
    /// Bulk string: `$5\r\nhello\r\n`, or `$-1\r\n` for the null bulk string
    BulkString(Option<String>),
    /// Array: `*2\r\n` followed by two encoded elements, nesting allowed
    Array(Vec<RespValue>),
    /// Simple error: `-ERR message\r\n`, reply-only
    SimpleError { kind: String, message: String },
}

impl RespValue {
    /// Builds an error reply with the default `ERR` kind.
    pub fn error(message: impl Into<String>) -> Self {
        RespValue::SimpleError {
            kind: "ERR".to_string(),
            message: message.into(),
        }
    }

    /// The textual payload of a string value, if it has one. Used wherever a
    /// name or key is expected: arrays and null bulk strings have none.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RespValue::SimpleString(s) => Some(s),
            RespValue::BulkString(Some(s)) => Some(s),
            _ => None,
        }
    }

    /// Encodes the value into its wire representation.
    ///
    /// Bulk string lengths count bytes, not characters, so multi-byte UTF-8
    /// payloads measure correctly.
    pub fn encode(&self) -> String {
        match self {
            RespValue::SimpleString(s) => format!("+{}\r\n", s),
            RespValue::BulkString(Some(s)) => format!("${}\r\n{}\r\n", s.len(), s),
            RespValue::BulkString(None) => "$-1\r\n".to_string(),
            RespValue::Array(elements) => {
                let mut result = format!("*{}\r\n", elements.len());
                for element in elements {
                    result.push_str(&element.encode());
                }
                result
            }
            RespValue::SimpleError { kind, message } => format!("-{} {}\r\n", kind, message),
        }
    }

    /// Decodes one value from the front of `buf`, consuming exactly its bytes.
    ///
    /// An empty buffer, or one holding a bare CRLF, is not a protocol error:
    /// it decodes to `None`. A buffer holding the start of a value but not all
    /// of it fails with [`RespError::Incomplete`] and leaves the buffer
    /// untouched so the caller can retry once more bytes arrive.
    pub fn decode(buf: &mut BytesMut) -> Result<Option<RespValue>, RespError> {
        if buf.is_empty() {
            return Ok(None);
        }
        if buf.as_ref() == CRLF {
            buf.advance(CRLF.len());
            return Ok(None);
        }

        let mut pos = 0;
        let value = Self::decode_value(buf.as_ref(), &mut pos)?;
        buf.advance(pos);
        Ok(Some(value))
    }

    fn decode_value(input: &[u8], pos: &mut usize) -> Result<RespValue, RespError> {
        let data_type = *input.get(*pos).ok_or(RespError::Incomplete)?;
        *pos += 1;

        match data_type {
            b'*' => Self::decode_array(input, pos),
            b'+' => Self::decode_simple_string(input, pos),
            b'$' => Self::decode_bulk_string(input, pos),
            b'-' => Err(RespError::UnsupportedDataType("Simple error")),
            b':' => Err(RespError::UnsupportedDataType("Integer")),
            b'_' => Err(RespError::UnsupportedDataType("Null")),
            b'#' => Err(RespError::UnsupportedDataType("Boolean")),
            b',' => Err(RespError::UnsupportedDataType("Double")),
            b'(' => Err(RespError::UnsupportedDataType("Big number")),
            b'!' => Err(RespError::UnsupportedDataType("Bulk error")),
            b'=' => Err(RespError::UnsupportedDataType("Verbatim string")),
            b'%' => Err(RespError::UnsupportedDataType("Map")),
            b'~' => Err(RespError::UnsupportedDataType("Set")),
            b'>' => Err(RespError::UnsupportedDataType("Push")),
            other => Err(RespError::InvalidDataType(other as char)),
        }
    }

    fn decode_array(input: &[u8], pos: &mut usize) -> Result<RespValue, RespError> {
        let line = Self::read_line(input, pos)?;
        let size = line
            .parse::<usize>()
            .map_err(|_| RespError::InvalidLength(line.to_string()))?;

        // The smallest element is 3 bytes (`+\r\n`), so a count the buffer
        // cannot hold yet is incomplete. Checked before allocating so the
        // header alone never drives the capacity.
        if size > (input.len() - *pos) / 3 {
            return Err(RespError::Incomplete);
        }

        let mut elements = Vec::with_capacity(size);
        for _ in 0..size {
            elements.push(Self::decode_value(input, pos)?);
        }

        Ok(RespValue::Array(elements))
    }

    fn decode_simple_string(input: &[u8], pos: &mut usize) -> Result<RespValue, RespError> {
        let line = Self::read_line(input, pos)?;
        Ok(RespValue::SimpleString(line.to_string()))
    }

    fn decode_bulk_string(input: &[u8], pos: &mut usize) -> Result<RespValue, RespError> {
        let line = Self::read_line(input, pos)?;
        let length = line
            .parse::<i64>()
            .map_err(|_| RespError::InvalidLength(line.to_string()))?;

        // -1 with no payload is the null bulk string
        if length == -1 {
            return Ok(RespValue::BulkString(None));
        }
        let length =
            usize::try_from(length).map_err(|_| RespError::InvalidLength(line.to_string()))?;

        let rest = &input[*pos..];
        if rest.len() < length + CRLF.len() {
            return Err(RespError::Incomplete);
        }

        let payload = std::str::from_utf8(&rest[..length]).map_err(|_| RespError::InvalidUtf8)?;
        if &rest[length..length + CRLF.len()] != CRLF {
            return Err(RespError::ExpectedCrlf);
        }

        let value = RespValue::BulkString(Some(payload.to_string()));
        *pos += length + CRLF.len();
        Ok(value)
    }

    /// Reads up to the next CRLF, advancing past the terminator.
    fn read_line<'a>(input: &'a [u8], pos: &mut usize) -> Result<&'a str, RespError> {
        let rest = &input[*pos..];
        let end = rest
            .windows(CRLF.len())
            .position(|window| window == CRLF)
            .ok_or(RespError::Incomplete)?;

        let line = std::str::from_utf8(&rest[..end]).map_err(|_| RespError::InvalidUtf8)?;
        *pos += end + CRLF.len();
        Ok(line)
    }
}
