//!
//! # QRIS payload codec
//!
//! A codec for EMVCo merchant-presented QR payment payloads, the tag-length-value format used by
//! [QRIS](https://qris.id), written in Rust.
//!
//! It parses a payload into its top level fields, adds a fixed surcharge to the transaction
//! amount (tag 54), recomputes the CRC (tag 63) and serializes the result again. Every other field
//! is passed through byte for byte.
//!
//! ## Usage
//!
//! For a one off rewrite use the `apply_surcharge` function. A [Codec] built from a [Config] holds
//! the surcharge and the merchant's static payload, and can be shared between threads.
//!
//! The lower level operations, `parse`, `add_surcharge`, `recompute_checksum` and `serialize`, are
//! exposed as well.
//!
//! ## Example
//!
//! ```rust,ignore
//! extern crate qris_codec;
//!
//! use qris_codec::{Codec, Config};
//!
//! fn main() {
//!     let codec = Codec::new(Config::new().with_surcharge(50));
//!
//!     let outcome = codec.apply(payload_from_upstream());
//!
//!     match outcome.error() {
//!         Some(error) => eprintln!("{}: {}", error.kind().code(), error),
//!         None => println!("{}", outcome.payload()),
//!     }
//! }
//! ```

mod codec;
mod constants;
pub mod crc;
pub mod error;
mod field;
mod macros;
pub mod payload;
mod surcharge;
pub mod tag;
pub mod types;

use bytes::Bytes;

pub use codec::{Codec, Config, Outcome};
pub use crc::{recompute_checksum, verify_checksum};
pub use error::{Error, ErrorKind, MutationError, ParseError, Result};
pub use field::Field;
pub use payload::Payload;
pub use surcharge::{add_surcharge, Rewrite};
pub use types::{amount::Amount, DataType};

/// Tokenizes a raw payload into its top level fields.
/// # Examples
/// ```rust,ignore
/// let payload = qris_codec::parse(b"000201010212540510000")?;
///
/// assert_eq!(payload.get("54").unwrap().value(), b"10000");
/// ```
pub fn parse<B: AsRef<[u8]>>(raw: B) -> Result<Payload> {
    payload::parser::parse(raw.as_ref())
}

/// Concatenates the fields of `payload` back into a byte string.
pub fn serialize(payload: &Payload) -> Bytes {
    payload.serialize()
}

/// Adds `surcharge` to the amount of `raw` and recomputes its checksum.
///
/// A payload without an amount field comes back unchanged.
pub fn apply_surcharge<R: AsRef<str>>(raw: R, surcharge: u64) -> Outcome {
    Codec::new(Config::new().with_surcharge(surcharge)).apply(raw)
}

#[cfg(test)]
mod test;
