use log::{debug, warn};

use crate::{
    constants::DEFAULT_SURCHARGE,
    crc::recompute_checksum,
    error::{err, Error, ErrorKind, MutationError, Result},
    payload::Payload,
    surcharge::rewrite_amount,
    types::amount::Amount,
};

/// Caller supplied settings for a [Codec].
#[derive(Debug, Clone)]
pub struct Config {
    surcharge: u64,
    template: Option<String>,
    preserve_checksum: bool,
    require_amount: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            surcharge: DEFAULT_SURCHARGE,
            template: None,
            preserve_checksum: false,
            require_amount: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// The amount added to every payload, in currency subunits.
    pub fn with_surcharge(mut self, surcharge: u64) -> Self {
        self.surcharge = surcharge;
        self
    }

    /// The static merchant payload to fall back on when a caller does not supply one.
    pub fn with_template<T: Into<String>>(mut self, template: T) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Leave the stored checksum as it was after rewriting the amount.
    ///
    /// The resulting payload no longer verifies. Only useful to reproduce the output of older
    /// services byte for byte.
    pub fn preserve_checksum(mut self, preserve: bool) -> Self {
        self.preserve_checksum = preserve;
        self
    }

    /// Fail with [MutationError::AmountFieldAbsent] instead of passing a payload without an
    /// amount through unchanged.
    pub fn require_amount(mut self, require: bool) -> Self {
        self.require_amount = require;
        self
    }

    pub fn surcharge(&self) -> u64 {
        self.surcharge
    }

    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }
}

/// The result of running a payload through a [Codec].
#[derive(Debug)]
pub enum Outcome {
    /// The amount was rewritten, `payload` is the new serialized payload.
    Mutated {
        payload: String,
        previous: Amount,
        amount: Amount,
    },
    /// There was no amount to rewrite, `payload` is the input.
    Unchanged { payload: String },
    /// Something went wrong, `payload` is the untouched input.
    Failed { payload: String, error: Error },
}

impl Outcome {
    pub fn success(&self) -> bool {
        !matches!(self, Outcome::Failed { .. })
    }

    /// Whether the payload differs from the input.
    pub fn applied(&self) -> bool {
        matches!(self, Outcome::Mutated { .. })
    }

    pub fn payload(&self) -> &str {
        match self {
            Outcome::Mutated { payload, .. }
            | Outcome::Unchanged { payload }
            | Outcome::Failed { payload, .. } => payload,
        }
    }

    pub fn into_payload(self) -> String {
        match self {
            Outcome::Mutated { payload, .. }
            | Outcome::Unchanged { payload }
            | Outcome::Failed { payload, .. } => payload,
        }
    }

    pub fn amount(&self) -> Option<&Amount> {
        match self {
            Outcome::Mutated { amount, .. } => Some(amount),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Adds a fixed surcharge to payloads.
///
/// Holds no state besides its [Config], so one instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: Config,
}

impl Codec {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The payload a caller supplied, or the configured template when it did not supply one.
    pub fn static_payload<'a>(&'a self, supplied: Option<&'a str>) -> Option<&'a str> {
        supplied
            .filter(|payload| !payload.is_empty())
            .or_else(|| self.config.template())
    }

    /// The amount the payer is charged for a base `amount`, or [None] on overflow.
    pub fn final_amount(&self, amount: u64) -> Option<u64> {
        amount.checked_add(self.config.surcharge)
    }

    /// Parses `raw`, adds the surcharge to its amount, recomputes the checksum and serializes it
    /// again.
    ///
    /// Never returns a partially modified payload: on failure the outcome holds the input as is.
    pub fn apply<R: AsRef<str>>(&self, raw: R) -> Outcome {
        let raw = raw.as_ref();

        match self.try_apply(raw) {
            Ok(Some((payload, previous, amount))) => Outcome::Mutated {
                payload,
                previous,
                amount,
            },
            Ok(None) => {
                debug!("Payload has no amount field, leaving it unchanged");

                Outcome::Unchanged {
                    payload: raw.to_owned(),
                }
            }
            Err(error) => {
                warn!("Error modifying payload: {}", error);

                Outcome::Failed {
                    payload: raw.to_owned(),
                    error,
                }
            }
        }
    }

    fn try_apply(&self, raw: &str) -> Result<Option<(String, Amount, Amount)>> {
        let mut payload: Payload = raw.parse()?;

        let rewrite = match rewrite_amount(&mut payload, self.config.surcharge)? {
            Some(rewrite) => rewrite,
            None if self.config.require_amount => err!(
                ErrorKind::Mutation(MutationError::AmountFieldAbsent),
                "Payload has no transaction amount field"
            ),
            None => return Ok(None),
        };

        if !self.config.preserve_checksum {
            payload = recompute_checksum(payload)?;
        }

        let serialized = payload.serialize();
        let serialized = std::str::from_utf8(&serialized)?.to_owned();

        let (previous, amount) = rewrite.into_parts();

        Ok(Some((serialized, previous, amount)))
    }
}
