pub(crate) mod parser;

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use bytes::{Bytes, BytesMut};

use crate::{
    constants::{
        DYNAMIC_INITIATION, TAG_AMOUNT, TAG_COUNTRY_CODE, TAG_CRC, TAG_CURRENCY,
        TAG_MERCHANT_CITY, TAG_MERCHANT_NAME, TAG_POINT_OF_INITIATION,
    },
    error::{Error, Result},
    field::Field,
    types::amount::Amount,
};

/// An ordered sequence of top level fields.
///
/// Order is significant: the checksum covers every byte that precedes it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Payload {
    fields: Vec<Field>,
}

impl From<Vec<Field>> for Payload {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

impl FromStr for Payload {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s.as_bytes())
    }
}

impl TryFrom<&[u8]> for Payload {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        parser::parse(value)
    }
}

impl Display for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            write!(f, "{}", field)?;
        }

        Ok(())
    }
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[Field] {
        self.fields.as_ref()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field)
    }

    /// The first top level field with the given tag.
    pub fn get<T: AsRef<str>>(&self, tag: T) -> Option<&Field> {
        self.fields.iter().find(|field| field.tag() == tag.as_ref())
    }

    pub fn position<T: AsRef<str>>(&self, tag: T) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.tag() == tag.as_ref())
    }

    /// Swaps the field at `index` for `field`, returning the old one.
    pub(crate) fn replace(&mut self, index: usize, field: Field) -> Field {
        std::mem::replace(&mut self.fields[index], field)
    }

    /// Concatenates the tag, the zero padded length and the value of every field, in order.
    pub fn serialize(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());

        for field in &self.fields {
            field.encode(&mut buf);
        }

        buf.freeze()
    }

    pub fn encoded_len(&self) -> usize {
        self.fields.iter().map(Field::encoded_len).sum()
    }

    fn text<T: AsRef<str>>(&self, tag: T) -> Result<Option<&str>> {
        match self.get(tag) {
            Some(field) => Ok(Some(field.value_str()?)),
            None => Ok(None),
        }
    }

    /// The transaction amount, if the payload carries one.
    pub fn amount(&self) -> Result<Option<Amount>> {
        match self.get(TAG_AMOUNT) {
            Some(field) => Ok(Some(Amount::parse(Bytes::copy_from_slice(field.value()))?)),
            None => Ok(None),
        }
    }

    pub fn merchant_name(&self) -> Result<Option<&str>> {
        self.text(TAG_MERCHANT_NAME)
    }

    pub fn merchant_city(&self) -> Result<Option<&str>> {
        self.text(TAG_MERCHANT_CITY)
    }

    pub fn country_code(&self) -> Result<Option<&str>> {
        self.text(TAG_COUNTRY_CODE)
    }

    /// ISO 4217 numeric currency code, "360" for rupiah.
    pub fn currency(&self) -> Result<Option<&str>> {
        self.text(TAG_CURRENCY)
    }

    /// Whether the payload is meant for a single transaction, as opposed to a static merchant code.
    pub fn is_dynamic(&self) -> bool {
        self.get(TAG_POINT_OF_INITIATION)
            .map(|field| field.value() == DYNAMIC_INITIATION)
            .unwrap_or(false)
    }

    /// The stored checksum value, as written in the payload.
    pub fn checksum(&self) -> Result<Option<&str>> {
        self.text(TAG_CRC)
    }
}
