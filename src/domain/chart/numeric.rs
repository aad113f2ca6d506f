//! Locale numeric parsing for `pt-BR` style literals.

/// Parses a locale-formatted number such as `"R$ 252.951,59"`.
///
/// Grouping is `.`, decimal is `,`. A leading currency marker is dropped.
/// Anything that does not parse to a finite number yields `0.0`.
pub fn parse_locale_number(token: &str) -> f64 {
    let trimmed = token.trim();
    let unprefixed = trimmed.trim_start_matches(|c: char| {
        c.is_alphabetic() || c.is_whitespace() || matches!(c, '$' | '€' | '£')
    });

    let normalized: String = unprefixed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_decimal() {
        assert_eq!(parse_locale_number("252.951,59"), 252951.59);
    }

    #[test]
    fn parses_zero() {
        assert_eq!(parse_locale_number("0"), 0.0);
    }

    #[test]
    fn non_numeric_token_is_zero() {
        assert_eq!(parse_locale_number("abc"), 0.0);
        assert_eq!(parse_locale_number(""), 0.0);
        assert_eq!(parse_locale_number("1,2,3"), 0.0);
    }

    #[test]
    fn strips_currency_prefixes() {
        assert_eq!(parse_locale_number("R$ 100.000,00"), 100000.0);
        assert_eq!(parse_locale_number("US$ 1.500"), 1500.0);
        assert_eq!(parse_locale_number("€12,5"), 12.5);
    }

    #[test]
    fn plain_integers_parse() {
        assert_eq!(parse_locale_number(" 42 "), 42.0);
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(parse_locale_number("-1.234,5"), -1234.5);
    }

    #[test]
    fn non_finite_results_are_zero() {
        assert_eq!(parse_locale_number("inf"), 0.0);
        assert_eq!(parse_locale_number("NaN"), 0.0);
    }
}
