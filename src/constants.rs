// Width of the tag and of the length prefix, in bytes.
pub const TAG_LEN: usize = 2;
pub const LENGTH_LEN: usize = 2;
pub const HEADER_LEN: usize = TAG_LEN + LENGTH_LEN;

// Largest value a two digit length prefix can describe.
pub const MAX_VALUE_LEN: usize = 99;

pub const TAG_POINT_OF_INITIATION: &str = "01";
pub const TAG_CURRENCY: &str = "53";
pub const TAG_AMOUNT: &str = "54";
pub const TAG_COUNTRY_CODE: &str = "58";
pub const TAG_MERCHANT_NAME: &str = "59";
pub const TAG_MERCHANT_CITY: &str = "60";
pub const TAG_CRC: &str = "63";

// Point of initiation value of a payload that carries its own amount.
pub const DYNAMIC_INITIATION: &[u8] = b"12";

// CRC-16/CCITT-FALSE
pub const CRC_POLYNOMIAL: u16 = 0x1021;
pub const CRC_INIT: u16 = 0xFFFF;
pub const CRC_VALUE_LEN: usize = 4;

// Admin fee of the payment service, in rupiah.
pub const DEFAULT_SURCHARGE: u64 = 50;
