use std::{collections::HashMap, fmt::Display};

use crate::macros::lookup_table;

/// The EMVCo tags this crate knows a name for.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum KnownTag {
    PayloadFormatIndicator,
    PointOfInitiation,
    MerchantCategoryCode,
    TransactionCurrency,
    TransactionAmount,
    TipIndicator,
    ConvenienceFeeFixed,
    ConvenienceFeePercentage,
    CountryCode,
    MerchantName,
    MerchantCity,
    PostalCode,
    AdditionalData,
    Crc,
    LanguageTemplate,
}

impl Display for KnownTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use KnownTag::*;

        let name = match self {
            PayloadFormatIndicator => "payload format indicator",
            PointOfInitiation => "point of initiation method",
            MerchantCategoryCode => "merchant category code",
            TransactionCurrency => "transaction currency",
            TransactionAmount => "transaction amount",
            TipIndicator => "tip or convenience indicator",
            ConvenienceFeeFixed => "convenience fee fixed",
            ConvenienceFeePercentage => "convenience fee percentage",
            CountryCode => "country code",
            MerchantName => "merchant name",
            MerchantCity => "merchant city",
            PostalCode => "postal code",
            AdditionalData => "additional data field template",
            Crc => "crc",
            LanguageTemplate => "merchant information language template",
        };

        write!(f, "{}", name)
    }
}

impl KnownTag {
    fn definitions() -> HashMap<String, Self> {
        use KnownTag::*;

        lookup_table!(
            "00" => PayloadFormatIndicator,
            "01" => PointOfInitiation,
            "52" => MerchantCategoryCode,
            "53" => TransactionCurrency,
            "54" => TransactionAmount,
            "55" => TipIndicator,
            "56" => ConvenienceFeeFixed,
            "57" => ConvenienceFeePercentage,
            "58" => CountryCode,
            "59" => MerchantName,
            "60" => MerchantCity,
            "61" => PostalCode,
            "62" => AdditionalData,
            "63" => Crc,
            "64" => LanguageTemplate
        )
    }

    pub fn from_code<C: AsRef<str>>(code: C) -> Option<Self> {
        Self::definitions().remove(code.as_ref())
    }

    /// The two digit tag this variant is serialized as.
    pub fn code(&self) -> String {
        Self::definitions()
            .into_iter()
            .find(|(_, tag)| tag == self)
            .map(|(code, _)| code)
            .unwrap_or_default()
    }
}

/// Whether the value of `code` is itself a sequence of tag-length-value fields.
///
/// 26 to 51 hold merchant account information, 62 additional data and 64 the language template.
pub fn is_composite<C: AsRef<str>>(code: C) -> bool {
    match code.as_ref().parse::<u8>() {
        Ok(number) => (26..=51).contains(&number) || number == 62 || number == 64,
        Err(_) => false,
    }
}

/// A printable description of `code`, used in log lines.
pub fn describe<C: AsRef<str>>(code: C) -> String {
    let code = code.as_ref();

    match KnownTag::from_code(code) {
        Some(tag) => tag.to_string(),
        None if is_composite(code) => String::from("merchant account information"),
        None => String::from("unknown"),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(KnownTag::from_code("54"), Some(KnownTag::TransactionAmount));
        assert_eq!(KnownTag::from_code("63"), Some(KnownTag::Crc));
        assert_eq!(KnownTag::from_code("26"), None);
        assert_eq!(KnownTag::from_code("5"), None);

        assert_eq!(KnownTag::MerchantCity.code(), "60");
        assert_eq!(KnownTag::TransactionAmount.to_string(), "transaction amount");
    }

    #[test]
    fn test_composite() {
        assert!(is_composite("26"));
        assert!(is_composite("51"));
        assert!(is_composite("62"));
        assert!(is_composite("64"));

        assert!(!is_composite("25"));
        assert!(!is_composite("52"));
        assert!(!is_composite("54"));
        assert!(!is_composite("xx"));

        assert_eq!(describe("30"), "merchant account information");
        assert_eq!(describe("59"), "merchant name");
        assert_eq!(describe("99"), "unknown");
    }
}
