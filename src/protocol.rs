// src/protocol.rs

//! Defines the value type command handlers produce and its wire encoding.
//!
//! The command layer only ever produces values, it never parses them, so a
//! small one-way enum is enough. Every full response is terminated by a
//! blank `\r\n` line on top of the regular RESP framing.

use bytes::Bytes;

/// A reply value produced by a command handler.
#[derive(Debug, Clone, PartialEq)]
pub enum RespValue {
    /// `+<text>\r\n`
    SimpleString(String),
    /// `$<len>\r\n<bytes>\r\n`
    BulkString(Bytes),
    /// `:<int>\r\n`
    Integer(i64),
    /// `*<count>\r\n` followed by the elements.
    Array(Vec<RespValue>),
    /// `_\r\n`
    Null,
}

impl RespValue {
    /// The legacy nil shape (`+(nil)`) used by the pop and score commands.
    /// The modern null sentinel `_` and this shape coexist on purpose for
    /// wire compatibility.
    pub fn legacy_nil() -> RespValue {
        RespValue::SimpleString("(nil)".to_string())
    }

    /// Serializes this value followed by the response terminator.
    pub fn into_response_bytes(self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf);
        buf.extend_from_slice(b"\r\n");
        buf
    }

    fn encode_into(&self, buf: &mut Vec<u8>) {
        match self {
            RespValue::SimpleString(s) => {
                buf.push(b'+');
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(b"\r\n");
            }
            RespValue::BulkString(b) => {
                buf.push(b'$');
                buf.extend_from_slice(b.len().to_string().as_bytes());
                buf.extend_from_slice(b"\r\n");
                buf.extend_from_slice(b);
                buf.extend_from_slice(b"\r\n");
            }
            RespValue::Integer(i) => {
                buf.push(b':');
                buf.extend_from_slice(i.to_string().as_bytes());
                buf.extend_from_slice(b"\r\n");
            }
            RespValue::Array(items) => {
                buf.push(b'*');
                buf.extend_from_slice(items.len().to_string().as_bytes());
                buf.extend_from_slice(b"\r\n");
                for item in items {
                    item.encode_into(buf);
                }
            }
            RespValue::Null => {
                buf.extend_from_slice(b"_\r\n");
            }
        }
    }
}
