//! Currency and messaging-link formatting.
//!
//! Pure helpers with no state. Currency defaults to Brazilian real
//! conventions (`R$ 1.234,56`) and WhatsApp links to the `55` country code.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Base URL of WhatsApp click-to-chat deep links.
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Country code prepended to national phone numbers by default.
pub const DEFAULT_COUNTRY_CODE: &str = "55";

/// Longest national number (area code plus subscriber number).
///
/// Longer digit strings that already start with the country code are taken
/// to be in international form.
pub const MAX_NATIONAL_DIGITS: usize = 11;

/// How monetary amounts are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Currency symbol placed before the amount.
    pub symbol: String,
    /// Separator between whole units and cents.
    pub decimal_separator: char,
    /// Separator between groups of three digits.
    pub thousands_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
        }
    }
}

/// Formats an amount with the default currency format.
///
/// # Examples
///
/// ```
/// use barbershop_engine::format::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(100, 0)), "R$ 100,00");
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "R$ 1.234,56");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    format_currency_with(amount, &CurrencyFormat::default())
}

/// Formats an amount with two decimal places using `format`.
///
/// Amounts with more than two decimals are rounded half away from zero.
pub fn format_currency_with(amount: Decimal, format: &CurrencyFormat) -> String {
    let mut cents = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    cents.rescale(2);
    let negative = amount.is_sign_negative() && !cents.is_zero();

    let text = cents.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(format.thousands_separator);
        }
        grouped.push(digit);
    }

    format!(
        "{}{} {}{}{}",
        if negative { "-" } else { "" },
        format.symbol,
        grouped,
        format.decimal_separator,
        fraction
    )
}

/// Builds a WhatsApp deep link using the default country code.
///
/// # Examples
///
/// ```
/// use barbershop_engine::format::generate_whatsapp_link;
///
/// assert_eq!(
///     generate_whatsapp_link("11999999999", "Hello World"),
///     "https://wa.me/5511999999999?text=Hello%20World"
/// );
/// ```
pub fn generate_whatsapp_link(local_phone: &str, message: &str) -> String {
    generate_whatsapp_link_with(local_phone, message, DEFAULT_COUNTRY_CODE)
}

/// Builds a WhatsApp deep link, prefixing national numbers with `country_code`.
///
/// Non-digit characters in the phone number are dropped. The message is
/// percent-encoded the way `encodeURIComponent` does it, so spaces become `%20`.
pub fn generate_whatsapp_link_with(local_phone: &str, message: &str, country_code: &str) -> String {
    let digits: String = local_phone.chars().filter(char::is_ascii_digit).collect();
    let international = if digits.len() > MAX_NATIONAL_DIGITS && digits.starts_with(country_code) {
        digits
    } else {
        format!("{}{}", country_code, digits)
    };

    format!(
        "{}/{}?text={}",
        WHATSAPP_BASE_URL,
        international,
        encode_uri_component(message)
    )
}

/// Bytes left unescaped by `encodeURIComponent`: alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_currency_contains_value_and_symbol() {
        let result = format_currency(dec("100"));
        assert!(result.contains("100"));
        assert!(result.contains("R$"));
        assert_eq!(result, "R$ 100,00");
    }

    #[test]
    fn test_currency_keeps_cents() {
        assert_eq!(format_currency(dec("49.90")), "R$ 49,90");
        assert_eq!(format_currency(dec("0.05")), "R$ 0,05");
    }

    #[test]
    fn test_currency_groups_thousands() {
        assert_eq!(format_currency(dec("1234567.8")), "R$ 1.234.567,80");
        assert_eq!(format_currency(dec("999.99")), "R$ 999,99");
        assert_eq!(format_currency(dec("1000")), "R$ 1.000,00");
    }

    #[test]
    fn test_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec("10.005")), "R$ 10,01");
        assert_eq!(format_currency(dec("10.004")), "R$ 10,00");
    }

    #[test]
    fn test_currency_negative_amount() {
        assert_eq!(format_currency(dec("-25.5")), "-R$ 25,50");
        assert_eq!(format_currency(dec("-0.001")), "R$ 0,00");
    }

    #[test]
    fn test_currency_with_custom_format() {
        let format = CurrencyFormat {
            symbol: "US$".to_string(),
            decimal_separator: '.',
            thousands_separator: ',',
        };
        assert_eq!(format_currency_with(dec("1500.5"), &format), "US$ 1,500.50");
    }

    #[test]
    fn test_whatsapp_link_exact_contract() {
        assert_eq!(
            generate_whatsapp_link("11999999999", "Hello World"),
            "https://wa.me/5511999999999?text=Hello%20World"
        );
    }

    #[test]
    fn test_whatsapp_link_strips_formatting() {
        assert_eq!(
            generate_whatsapp_link("(11) 99999-9999", "Oi"),
            "https://wa.me/5511999999999?text=Oi"
        );
    }

    #[test]
    fn test_whatsapp_link_keeps_international_number() {
        assert_eq!(
            generate_whatsapp_link("+55 11 99999-9999", "Oi"),
            "https://wa.me/5511999999999?text=Oi"
        );
    }

    #[test]
    fn test_whatsapp_link_with_other_country_code() {
        assert_eq!(
            generate_whatsapp_link_with("2025550123", "Hi", "1"),
            "https://wa.me/12025550123?text=Hi"
        );
    }

    #[test]
    fn test_message_encoding_matches_uri_component_rules() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("it's (ok)!"), "it's%20(ok)!");
        assert_eq!(encode_uri_component("14:00"), "14%3A00");
        assert_eq!(encode_uri_component("Olá"), "Ol%C3%A1");
        assert_eq!(encode_uri_component("R$ 50,00"), "R%24%2050%2C00");
        assert_eq!(encode_uri_component("a+b/c?#"), "a%2Bb%2Fc%3F%23");
        assert_eq!(encode_uri_component("-_.~*"), "-_.~*");
    }
}
