/// Builds a map from `code => value` pairs, converting each code with `Into`.
macro_rules! lookup_table {
    ($($code:expr => $value:expr),* $(,)?) => {{
        core::convert::From::from([$(($code.into(), $value),)*])
    }};
}

pub(crate) use lookup_table;
