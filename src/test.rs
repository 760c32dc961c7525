use crate::{
    add_surcharge, apply_surcharge,
    error::{ErrorKind, MutationError, ParseError},
    parse, recompute_checksum, serialize, verify_checksum, Codec, Config, Outcome, Payload,
};

/// A merchant's static payload, as printed on its counter.
pub(crate) const STATIC_PAYLOAD: &str = "00020101021126670016COM.NOBUBANK.WWW01189360050300000879140214251114147015770303UMI51440014ID.CO.QRIS.WWW0215ID20254541656840303UMI5204481253033605802ID5921Sazyfa Cell Ok26924716015TAPANULI TENGAH61052256262070703A0163045CF4";

/// The same merchant with an amount of 123456 filled in.
pub(crate) const DYNAMIC_PAYLOAD: &str = "00020101021226670016COM.NOBUBANK.WWW01189360050300000879140214251114147015770303UMI51440014ID.CO.QRIS.WWW0215ID20254541656840303UMI52044812530336054061234565802ID5921Sazyfa Cell Ok26924716015TAPANULI TENGAH61052256262070703A0163042A72";

const HEAD: &str = "00020101021226670016COM.NOBUBANK.WWW01189360050300000879140214251114147015770303UMI51440014ID.CO.QRIS.WWW0215ID20254541656840303UMI520448125303360";
const TAIL: &str = "5802ID5921Sazyfa Cell Ok26924716015TAPANULI TENGAH61052256262070703A016304";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn with_amount(amount: &str, checksum: &str) -> String {
    format!("{}54{:02}{}{}{}", HEAD, amount.len(), amount, TAIL, checksum)
}

#[test]
fn test_fixtures_are_valid() {
    assert_eq!(with_amount("123456", "2A72"), DYNAMIC_PAYLOAD);

    for raw in [STATIC_PAYLOAD, DYNAMIC_PAYLOAD] {
        let payload = parse(raw).unwrap();

        assert!(verify_checksum(&payload));
    }
}

#[test]
fn test_round_trip() {
    for raw in [
        STATIC_PAYLOAD.to_owned(),
        DYNAMIC_PAYLOAD.to_owned(),
        with_amount("99", "9D2B"),
        with_amount("10000", "CC68"),
    ] {
        let payload = parse(&raw).unwrap();

        assert_eq!(serialize(&payload), raw.as_bytes());

        let reparsed = parse(serialize(&payload)).unwrap();

        assert_eq!(reparsed, payload);
    }
}

#[test]
fn test_same_digit_count() {
    init();

    let outcome = apply_surcharge(DYNAMIC_PAYLOAD, 50);

    match &outcome {
        Outcome::Mutated {
            payload,
            previous,
            amount,
        } => {
            assert_eq!(previous.to_string(), "123456");
            assert_eq!(amount.to_string(), "123506");
            assert_eq!(payload.len(), DYNAMIC_PAYLOAD.len());
            assert!(payload.contains("5406123506"));
            assert_eq!(payload, &with_amount("123506", "EF92"));
        }
        _ => unreachable!(),
    }

    assert!(outcome.success());
    assert!(outcome.applied());
}

#[test]
fn test_digit_count_grows() {
    init();

    let raw = with_amount("99", "9D2B");

    let outcome = apply_surcharge(&raw, 1);

    assert!(outcome.applied());

    let payload = outcome.payload();

    assert_eq!(payload.len(), raw.len() + 1);
    assert!(payload.contains("5403100"));
    assert_eq!(payload, with_amount("100", "7223"));

    // Everything after the amount moved one byte to the right.
    let tail_start = raw.find(TAIL).unwrap();

    assert_eq!(payload.find(TAIL), Some(tail_start + 1));
}

#[test]
fn test_default_surcharge() {
    let outcome = Codec::default().apply(with_amount("10000", "CC68"));

    assert_eq!(outcome.payload(), with_amount("10050", "9887"));
    assert_eq!(outcome.amount().unwrap().to_string(), "10050");
}

#[test]
fn test_lengths_are_consistent() {
    let outcome = apply_surcharge(with_amount("99", "9D2B"), 12345);

    let payload = parse(outcome.payload()).unwrap();

    let raw = outcome.payload().as_bytes();
    let mut offset = 0;

    for field in payload.iter() {
        let length = std::str::from_utf8(&raw[offset + 2..offset + 4]).unwrap();

        assert_eq!(length.parse::<usize>().unwrap(), field.value().len());

        offset += field.encoded_len();
    }

    assert_eq!(offset, raw.len());
}

#[test]
fn test_checksum_matches_after_mutation() {
    for (amount, surcharge) in [("1", 0), ("99", 1), ("999999", 1), ("123456", 50)] {
        let outcome = apply_surcharge(with_amount(amount, "0000"), surcharge);

        let payload = parse(outcome.payload()).unwrap();

        assert!(verify_checksum(&payload));
    }
}

#[test]
fn test_low_level_pipeline() {
    let payload = parse(DYNAMIC_PAYLOAD).unwrap();

    let (payload, applied) = add_surcharge(payload, 50).unwrap();

    assert!(applied);
    assert!(!verify_checksum(&payload));

    let payload = recompute_checksum(payload).unwrap();

    assert!(verify_checksum(&payload));
    assert_eq!(payload.checksum().unwrap(), Some("EF92"));
}

#[test]
fn test_preserve_checksum() {
    let codec = Codec::new(Config::new().preserve_checksum(true));

    let outcome = codec.apply(DYNAMIC_PAYLOAD);

    assert!(outcome.applied());
    assert_eq!(outcome.payload(), with_amount("123506", "2A72"));

    let payload: Payload = outcome.payload().parse().unwrap();

    assert!(!verify_checksum(&payload));
}

#[test]
fn test_non_numeric_amount() {
    init();

    let raw = with_amount("12a", "0000");

    let outcome = apply_surcharge(&raw, 50);

    assert!(!outcome.success());
    assert_eq!(outcome.payload(), raw);

    match outcome.error().unwrap().kind() {
        ErrorKind::Mutation(MutationError::NonNumericAmount) => {}
        _ => unreachable!(),
    }

    assert_eq!(outcome.error().unwrap().kind().code(), "NON_NUMERIC_AMOUNT");
}

#[test]
fn test_fractional_amount_is_rejected() {
    let raw = with_amount("10000.00", "0000");

    let outcome = apply_surcharge(&raw, 50);

    assert!(!outcome.success());
    assert_eq!(outcome.payload(), raw);
}

#[test]
fn test_malformed_payload() {
    let raw = &DYNAMIC_PAYLOAD[..DYNAMIC_PAYLOAD.len() - 2];

    let outcome = apply_surcharge(raw, 50);

    assert!(!outcome.success());
    assert_eq!(outcome.payload(), raw);

    match outcome.error().unwrap().kind() {
        ErrorKind::Parse(ParseError::Truncated {
            needed, remaining, ..
        }) => {
            assert_eq!(*needed, 4);
            assert_eq!(*remaining, 2);
        }
        _ => unreachable!(),
    }

    let outcome = apply_surcharge("0002010x0211", 50);

    assert!(outcome.error().unwrap().is_parse());
}

#[test]
fn test_static_payload_unchanged() {
    let outcome = apply_surcharge(STATIC_PAYLOAD, 50);

    assert!(outcome.success());
    assert!(!outcome.applied());

    match outcome {
        Outcome::Unchanged { payload } => assert_eq!(payload, STATIC_PAYLOAD),
        _ => unreachable!(),
    }
}

#[test]
fn test_require_amount() {
    let codec = Codec::new(Config::new().require_amount(true));

    let outcome = codec.apply(STATIC_PAYLOAD);

    assert!(!outcome.success());
    assert_eq!(outcome.payload(), STATIC_PAYLOAD);

    let error = outcome.error().unwrap();

    assert!(error.is_mutation());

    match error.kind() {
        ErrorKind::Mutation(MutationError::AmountFieldAbsent) => {}
        _ => unreachable!(),
    }
}

#[test]
fn test_surcharge_not_compounded() {
    let codec = Codec::default();

    let first = codec.apply(DYNAMIC_PAYLOAD);
    let second = codec.apply(DYNAMIC_PAYLOAD);

    assert_eq!(first.payload(), second.payload());
    assert_eq!(first.amount(), second.amount());
}

#[test]
fn test_concurrent_use() {
    let codec = std::sync::Arc::new(Codec::default());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let codec = codec.clone();

            std::thread::spawn(move || codec.apply(DYNAMIC_PAYLOAD).into_payload())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), with_amount("123506", "EF92"));
    }
}
