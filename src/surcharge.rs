use bytes::Bytes;
use log::debug;

use crate::{
    constants::TAG_AMOUNT,
    error::Result,
    payload::Payload,
    types::amount::Amount,
};

/// An amount rewrite that took place: the amount before and after the surcharge.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rewrite {
    previous: Amount,
    amount: Amount,
}

impl Rewrite {
    pub fn previous(&self) -> &Amount {
        &self.previous
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn into_parts(self) -> (Amount, Amount) {
        (self.previous, self.amount)
    }
}

/// Adds `surcharge` to the first top level amount field, in place.
///
/// Returns [None] when the payload has no amount field. On error the payload is left untouched.
pub(crate) fn rewrite_amount(payload: &mut Payload, surcharge: u64) -> Result<Option<Rewrite>> {
    let index = match payload.position(TAG_AMOUNT) {
        Some(index) => index,
        None => return Ok(None),
    };

    let field = &payload.fields()[index];

    let previous = Amount::parse(Bytes::copy_from_slice(field.value()))?;
    let amount = previous.checked_add(surcharge)?;

    let field = field.with_value(amount.clone().into_bytes())?;

    payload.replace(index, field);

    debug!("Amount modified: {} -> {}", previous, amount);

    Ok(Some(Rewrite { previous, amount }))
}

/// Adds `surcharge` to the transaction amount of `payload`.
///
/// Only the first top level field tagged "54" is touched. The returned flag tells whether an
/// amount field was found; without one the payload comes back unchanged. The checksum is not
/// updated here, see [recompute_checksum](crate::recompute_checksum).
pub fn add_surcharge(mut payload: Payload, surcharge: u64) -> Result<(Payload, bool)> {
    let applied = rewrite_amount(&mut payload, surcharge)?.is_some();

    Ok((payload, applied))
}

#[cfg(test)]
mod test {
    use crate::error::{ErrorKind, MutationError};

    use super::*;

    fn surcharge(raw: &str, surcharge: u64) -> (String, bool) {
        let payload: Payload = raw.parse().unwrap();

        let (payload, applied) = add_surcharge(payload, surcharge).unwrap();

        (payload.to_string(), applied)
    }

    #[test]
    fn test_same_length() {
        assert_eq!(
            surcharge("0002015406123456", 50),
            (String::from("0002015406123506"), true)
        );
    }

    #[test]
    fn test_length_grows() {
        let (mutated, applied) = surcharge("0002015402995802ID", 1);

        assert!(applied);
        assert_eq!(mutated, "00020154031005802ID");
    }

    #[test]
    fn test_zero_surcharge() {
        assert_eq!(
            surcharge("5406123456", 0),
            (String::from("5406123456"), true)
        );
    }

    #[test]
    fn test_leading_zeros_are_dropped() {
        assert_eq!(surcharge("5403007", 3), (String::from("540210"), true));
    }

    #[test]
    fn test_absent() {
        assert_eq!(
            surcharge("0002015802ID", 50),
            (String::from("0002015802ID"), false)
        );
    }

    #[test]
    fn test_only_first_amount() {
        assert_eq!(
            surcharge("540210540220", 5),
            (String::from("540215540220"), true)
        );
    }

    #[test]
    fn test_non_numeric() {
        let payload: Payload = "00020154031 2".parse().unwrap();

        let error = add_surcharge(payload, 50).unwrap_err();

        match error.kind() {
            ErrorKind::Mutation(MutationError::NonNumericAmount) => {}
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_overflow_leaves_payload() {
        let mut raw = String::from("5499");

        raw.push_str(&"9".repeat(99));

        let mut payload: Payload = raw.parse().unwrap();

        let error = rewrite_amount(&mut payload, 1).unwrap_err();

        match error.kind() {
            ErrorKind::Mutation(MutationError::LengthOverflow) => {}
            _ => unreachable!(),
        }

        assert_eq!(payload.to_string(), raw);
    }

    #[test]
    fn test_rewrite() {
        let mut payload: Payload = "5406123456".parse().unwrap();

        let rewrite = rewrite_amount(&mut payload, 50).unwrap().unwrap();

        assert_eq!(rewrite.previous().to_string(), "123456");
        assert_eq!(rewrite.amount().to_string(), "123506");
    }
}
