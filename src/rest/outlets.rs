//! Mobile-load payout outlet lookup by phone number.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::CoinsError;
use crate::rest::CoinsRestClient;
use crate::rest::endpoints::{items, v3};
use crate::rest::query::Filters;
use crate::rest::resources::listing;

/// Philippine mobile network operators that Coins.ph loads through a payout outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    /// Globe Telecom, including TM
    Globe,
    /// Smart Communications, including TNT
    Smart,
    /// Sun Cellular
    Sun,
}

// Three-digit network prefixes, after the leading `0`/`+63`.
const GLOBE_PREFIXES: &[&str] = &[
    "817", "905", "906", "915", "916", "917", "926", "927", "935", "936", "937", "945", "953",
    "954", "955", "956", "965", "966", "967", "975", "976", "977", "978", "979", "995", "996",
    "997",
];
const SMART_PREFIXES: &[&str] = &[
    "813", "907", "908", "909", "910", "911", "912", "913", "914", "918", "919", "920", "921",
    "928", "929", "930", "938", "939", "946", "947", "948", "949", "950", "951", "961", "998",
    "999",
];
const SUN_PREFIXES: &[&str] = &[
    "922", "923", "924", "925", "931", "932", "933", "934", "940", "941", "942", "943", "944",
    "973", "974",
];

impl Carrier {
    /// Outlet id fragment of the carrier, as used by the payout-outlets endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Carrier::Globe => "globe",
            Carrier::Smart => "smart",
            Carrier::Sun => "sun",
        }
    }

    /// Identify the carrier of a Philippine mobile number.
    ///
    /// Accepts `09XXXXXXXXX`, `+639XXXXXXXXX`, `639XXXXXXXXX` and `9XXXXXXXXX`,
    /// with optional spaces, dashes or parentheses.
    ///
    /// ```
    /// use coinsph_api_client::rest::Carrier;
    ///
    /// assert_eq!(Carrier::from_phone_number("+63 917 123 4567").unwrap(), Carrier::Globe);
    /// assert!(Carrier::from_phone_number("12345").is_err());
    /// ```
    pub fn from_phone_number(phone_number: &str) -> Result<Self, CoinsError> {
        let invalid = || CoinsError::InvalidPhoneNumber(phone_number.to_string());

        let compact: String = phone_number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
            .collect();
        let digits = compact.strip_prefix('+').unwrap_or(&compact);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let subscriber = match digits.len() {
            12 => digits.strip_prefix("63"),
            11 => digits.strip_prefix('0'),
            10 => Some(digits),
            _ => None,
        }
        .filter(|s| s.starts_with('9') || s.starts_with('8'))
        .ok_or_else(invalid)?;

        let prefix = &subscriber[..3];
        if GLOBE_PREFIXES.contains(&prefix) {
            Ok(Carrier::Globe)
        } else if SMART_PREFIXES.contains(&prefix) {
            Ok(Carrier::Smart)
        } else if SUN_PREFIXES.contains(&prefix) {
            Ok(Carrier::Sun)
        } else {
            Err(invalid())
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CoinsRestClient {
    /// Look up the payout outlet that loads a mobile number.
    ///
    /// The number is mapped to its carrier locally, so an unrecognized number
    /// fails with [`CoinsError::InvalidPhoneNumber`] before any request is
    /// sent. The outlet listing is then queried for the carrier and only the
    /// outlets whose id names it are kept; other top-level keys pass through.
    pub async fn fetch_outlet_data(&self, phone_number: &str) -> Result<Value, CoinsError> {
        let carrier = Carrier::from_phone_number(phone_number)?;
        debug!(%carrier, "resolved payout outlet carrier");

        let filters = Filters::new().with("q", carrier);
        let query = listing(self.base_url(), v3::PAYOUT_OUTLETS, None, &filters);
        let mut body: Value = self.get_json(query.to_url()?).await?;

        if let Some(outlets) = body
            .get_mut(items::PAYOUT_OUTLETS)
            .and_then(Value::as_array_mut)
        {
            outlets.retain(|outlet| {
                outlet
                    .get("id")
                    .and_then(Value::as_str)
                    .is_some_and(|id| id.contains(carrier.as_str()))
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_from_common_formats() {
        assert_eq!(Carrier::from_phone_number("09171234567").unwrap(), Carrier::Globe);
        assert_eq!(Carrier::from_phone_number("+639181234567").unwrap(), Carrier::Smart);
        assert_eq!(Carrier::from_phone_number("639221234567").unwrap(), Carrier::Sun);
        assert_eq!(Carrier::from_phone_number("9991234567").unwrap(), Carrier::Smart);
        assert_eq!(Carrier::from_phone_number("0932-123-4567").unwrap(), Carrier::Sun);
        assert_eq!(Carrier::from_phone_number("(0917) 123 4567").unwrap(), Carrier::Globe);
    }

    #[test]
    fn test_carrier_rejects_unknown_numbers() {
        for number in ["", "12345", "0917123456a", "09011234567", "02 8123 4567", "+1 917 123 4567"] {
            match Carrier::from_phone_number(number) {
                Err(CoinsError::InvalidPhoneNumber(raw)) => assert_eq!(raw, number),
                other => panic!("{number:?} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_prefix_tables_do_not_overlap() {
        for prefix in GLOBE_PREFIXES {
            assert!(!SMART_PREFIXES.contains(prefix), "{prefix}");
            assert!(!SUN_PREFIXES.contains(prefix), "{prefix}");
        }
        for prefix in SMART_PREFIXES {
            assert!(!SUN_PREFIXES.contains(prefix), "{prefix}");
        }
    }

    #[test]
    fn test_carrier_display() {
        assert_eq!(Carrier::Sun.to_string(), "sun");
    }
}
