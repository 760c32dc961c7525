use bytes::Bytes;
use log::trace;
use nom::{
    bytes::complete::{take, take_while_m_n},
    combinator::map,
    IResult,
};

use crate::{
    constants::{HEADER_LEN, LENGTH_LEN, TAG_LEN},
    error::{err, ErrorKind, ParseError, Result},
    field::Field,
    tag::describe,
};

use super::Payload;

fn two_digits(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while_m_n(2, 2, |byte: u8| byte.is_ascii_digit())(input)
}

fn tag(input: &[u8]) -> IResult<&[u8], [u8; TAG_LEN]> {
    map(two_digits, |digits| [digits[0], digits[1]])(input)
}

fn length(input: &[u8]) -> IResult<&[u8], usize> {
    map(two_digits, |digits| {
        usize::from(digits[0] - b'0') * 10 + usize::from(digits[1] - b'0')
    })(input)
}

fn value(input: &[u8], length: usize) -> IResult<&[u8], &[u8]> {
    take(length)(input)
}

/// Tokenizes `input` into its top level fields.
///
/// Composite values are not descended into, they are kept as opaque slices of the input.
pub(crate) fn parse(input: &[u8]) -> Result<Payload> {
    let buffer = Bytes::copy_from_slice(input);

    let mut fields = Vec::new();
    let mut rest: &[u8] = &buffer;

    while !rest.is_empty() {
        let offset = buffer.len() - rest.len();

        if rest.len() < HEADER_LEN {
            err!(
                ErrorKind::Parse(ParseError::MalformedTail { offset }),
                "{} trailing bytes at offset {} do not form a field",
                rest.len(),
                offset
            )
        }

        let (after_tag, tag) = match tag(rest) {
            Ok(parsed) => parsed,
            Err(_) => err!(
                ErrorKind::Parse(ParseError::InvalidTag { offset }),
                "Invalid tag '{}' at offset {}",
                String::from_utf8_lossy(&rest[..TAG_LEN]),
                offset
            ),
        };

        let (after_length, length) = match length(after_tag) {
            Ok(parsed) => parsed,
            Err(_) => err!(
                ErrorKind::Parse(ParseError::InvalidLength { offset }),
                "Invalid length '{}' at offset {}",
                String::from_utf8_lossy(&after_tag[..LENGTH_LEN]),
                offset
            ),
        };

        let (remaining, _) = match value(after_length, length) {
            Ok(parsed) => parsed,
            Err(_) => err!(
                ErrorKind::Parse(ParseError::Truncated {
                    offset,
                    needed: length,
                    remaining: after_length.len(),
                }),
                "Field at offset {} needs {} bytes but only {} remain",
                offset,
                length,
                after_length.len()
            ),
        };

        let start = offset + HEADER_LEN;
        let field = Field::from_parts(tag, buffer.slice(start..start + length))?;

        trace!(
            "{} ({}): {}",
            field.tag(),
            describe(field.tag()),
            field.value_lossy()
        );

        fields.push(field);

        rest = remaining;
    }

    Ok(Payload::from(fields))
}
