use std::{
    borrow::Cow,
    fmt::{self, Debug, Display, Formatter},
};

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    constants::{HEADER_LEN, MAX_VALUE_LEN},
    error::{err, ErrorKind, MutationError, ParseError, Result},
    payload::{parser, Payload},
    tag,
};

/// A single tag-length-value entry.
///
/// The length is never stored, it is always derived from the value, so a field can not hold a
/// length prefix that disagrees with its contents.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Field {
    tag: [u8; 2],
    value: Bytes,
}

impl Field {
    /// Creates a new field, failing if the tag is not two ascii digits or the value does not fit
    /// in a two digit length.
    pub fn new<V: Into<Bytes>>(tag: &str, value: V) -> Result<Self> {
        let tag = match tag.as_bytes() {
            [first, second] if first.is_ascii_digit() && second.is_ascii_digit() => {
                [*first, *second]
            }
            _ => err!(
                ErrorKind::Parse(ParseError::InvalidTag { offset: 0 }),
                "'{}' is not a two digit tag",
                tag
            ),
        };

        Self::from_parts(tag, value.into())
    }

    pub(crate) fn from_parts(tag: [u8; 2], value: Bytes) -> Result<Self> {
        if value.len() > MAX_VALUE_LEN {
            err!(
                ErrorKind::Mutation(MutationError::LengthOverflow),
                "Value of {} bytes does not fit in a two digit length",
                value.len()
            )
        }

        Ok(Self { tag, value })
    }

    pub fn tag(&self) -> &str {
        // Both bytes are ascii digits, checked on construction.
        std::str::from_utf8(&self.tag).unwrap_or_default()
    }

    /// Byte length of the value, the number written in the length prefix.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn value_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.value)?)
    }

    pub fn value_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.value)
    }

    /// Returns a copy of this field holding `value` instead.
    pub fn with_value<V: Into<Bytes>>(&self, value: V) -> Result<Self> {
        Self::from_parts(self.tag, value.into())
    }

    pub fn is_composite(&self) -> bool {
        tag::is_composite(self.tag())
    }

    /// Parses the value as a nested sequence of fields.
    pub fn sub_fields(&self) -> Result<Payload> {
        parser::parse(&self.value)
    }

    /// Size of the field once serialized, header included.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.value.len()
    }

    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(&self.tag);
        buf.put_slice(format!("{:02}", self.value.len()).as_bytes());
        buf.put_slice(&self.value);
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}{}", self.tag(), self.len(), self.value_lossy())
    }
}

impl Debug for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("tag", &self.tag())
            .field("name", &tag::describe(self.tag()))
            .field("value", &self.value_lossy())
            .finish()
    }
}
