use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
    result,
};

use bytes::Bytes;

use crate::{
    constants::MAX_VALUE_LEN,
    error::{err, Error, ErrorKind, MutationError, Result},
};

use super::DataType;

#[derive(Eq, PartialEq, Debug, Hash, Clone)]
/// A transaction amount in currency subunits, as written in the amount field.
///
/// The digits are kept as text so amounts wider than any machine integer still add exactly.
/// Get a numeric value by calling `value()` from the [DataType] trait.
pub struct Amount {
    inner: Bytes,
}

impl Amount {
    /// Checks that `digits` is a non empty run of ascii digits.
    pub fn parse<B: Into<Bytes>>(digits: B) -> Result<Self> {
        let inner = digits.into();

        if inner.is_empty() || !inner.iter().all(u8::is_ascii_digit) {
            err!(
                ErrorKind::Mutation(MutationError::NonNumericAmount),
                "Amount '{}' is not a decimal integer",
                String::from_utf8_lossy(&inner)
            )
        }

        Ok(Self { inner })
    }

    /// Adds `addend` to this amount, returning the shortest decimal form of the sum.
    pub fn checked_add(&self, addend: u64) -> Result<Self> {
        // Least significant digit first.
        let mut digits: Vec<u8> = self.inner.iter().rev().map(|digit| digit - b'0').collect();

        let mut carry = u128::from(addend);

        for digit in digits.iter_mut() {
            if carry == 0 {
                break;
            }

            let total = u128::from(*digit) + carry;

            *digit = (total % 10) as u8;
            carry = total / 10;
        }

        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }

        while digits.len() > 1 && digits.last() == Some(&0) {
            digits.pop();
        }

        if digits.len() > MAX_VALUE_LEN {
            err!(
                ErrorKind::Mutation(MutationError::LengthOverflow),
                "Amount of {} digits does not fit in a two digit length",
                digits.len()
            )
        }

        let encoded: Vec<u8> = digits.into_iter().rev().map(|digit| digit + b'0').collect();

        Ok(Self {
            inner: encoded.into(),
        })
    }

    pub fn into_bytes(self) -> Bytes {
        self.inner
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self {
            inner: value.to_string().into(),
        }
    }
}

impl AsRef<[u8]> for Amount {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl TryFrom<Amount> for u64 {
    type Error = Error;

    fn try_from(amount: Amount) -> result::Result<u64, Self::Error> {
        amount.value()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let amount = self.as_str_lossy();

        write!(f, "{}", amount)
    }
}

impl DataType<u64> for Amount {
    fn raw(&self) -> &[u8] {
        &self.inner
    }

    fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.inner)
    }

    fn as_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.inner)?)
    }

    fn value(&self) -> Result<u64> {
        let string = self.as_str()?;

        let number: u64 = string.parse()?;

        Ok(number)
    }
}
