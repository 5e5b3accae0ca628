//! Number and date skeletons (the part of an argument style after `::`).
//!
//! Tokenizing a number skeleton always happens since a malformed skeleton is a
//! grammar error. Turning tokens or date patterns into formatter options only
//! happens when skeleton parsing is requested, and refuses fields that have no
//! formatter equivalent.

use models::Locale;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberSkeletonToken {
    pub stem: String,
    pub options: Vec<String>,
}

/// Split a number skeleton into `stem/option/option` tokens
pub fn parse_number_skeleton_from_string(skeleton: &str) -> Option<Vec<NumberSkeletonToken>> {
    if skeleton.is_empty() {
        return None;
    }

    let mut tokens = Vec::new();
    for token in skeleton.split(char::is_whitespace).filter(|t| !t.is_empty()) {
        let mut parts = token.split('/');
        let stem = parts.next()?.to_string();
        let options: Vec<String> = parts.map(str::to_string).collect();
        if options.iter().any(String::is_empty) {
            return None;
        }
        tokens.push(NumberSkeletonToken { stem, options });
    }

    Some(tokens)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_grouping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compact_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_integer_digits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_fraction_digits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_fraction_digits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_significant_digits: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_significant_digits: Option<usize>,
}

impl NumberFormatOptions {
    // Returns false when `stem` is not a sign stem
    fn apply_sign(&mut self, stem: &str) -> bool {
        let (sign, accounting) = match stem {
            "sign-auto" => ("auto", false),
            "sign-always" | "+!" => ("always", false),
            "sign-never" | "+_" => ("never", false),
            "sign-accounting" | "()" => ("auto", true),
            "sign-accounting-always" | "()!" => ("always", true),
            "sign-except-zero" | "+?" => ("exceptZero", false),
            "sign-accounting-except-zero" | "()?" => ("exceptZero", true),
            "sign-negative" | "+-" => ("negative", false),
            _ => return false,
        };
        self.sign_display = Some(sign.to_string());
        if accounting {
            self.currency_sign = Some("accounting".to_string());
        }
        true
    }

    fn apply_significant(&mut self, spec: &str) -> bool {
        let digits = spec.trim_end_matches(['r', 's']);
        let at_count = digits.chars().take_while(|c| *c == '@').count();
        if at_count == 0 {
            return false;
        }
        let rest = &digits[at_count..];
        if rest.is_empty() {
            self.minimum_significant_digits = Some(at_count);
            self.maximum_significant_digits = Some(at_count);
        } else if rest == "+" {
            self.minimum_significant_digits = Some(at_count);
        } else if rest.chars().all(|c| c == '#') {
            self.minimum_significant_digits = Some(at_count);
            self.maximum_significant_digits = Some(at_count + rest.len());
        } else {
            return false;
        }
        true
    }

    fn apply_fraction(&mut self, stem: &str) -> bool {
        let Some(digits) = stem.strip_prefix('.') else {
            return false;
        };
        let zeros = digits.chars().take_while(|c| *c == '0').count();
        let rest = &digits[zeros..];

        if zeros > 0 && rest == "*" {
            self.minimum_fraction_digits = Some(zeros);
        } else if !rest.is_empty() && rest.chars().all(|c| c == '#') {
            self.minimum_fraction_digits = Some(zeros);
            self.maximum_fraction_digits = Some(zeros + rest.len());
        } else if zeros > 0 && rest.is_empty() {
            self.minimum_fraction_digits = Some(zeros);
            self.maximum_fraction_digits = Some(zeros);
        } else {
            return false;
        }
        true
    }
}

/// Remove the unit category prefix (`length-meter` -> `meter`)
fn convert_unit(unit: &str) -> String {
    match unit.split_once('-') {
        Some((_, rest)) => rest.to_string(),
        None => unit.to_string(),
    }
}

pub fn parse_number_skeleton(
    tokens: &[NumberSkeletonToken],
) -> Result<NumberFormatOptions, String> {
    let mut result = NumberFormatOptions::default();

    for token in tokens {
        let stem = token.stem.as_str();
        let first_option = token.options.first().map(String::as_str);

        match stem {
            "percent" | "%" => {
                result.style = Some("percent".to_string());
                continue;
            }
            "%x100" => {
                result.style = Some("percent".to_string());
                result.scale = Some(100.0);
                continue;
            }
            "currency" => {
                result.style = Some("currency".to_string());
                result.currency = first_option.map(str::to_string);
                continue;
            }
            "group-off" | ",_" => {
                result.use_grouping = Some(false);
                continue;
            }
            "precision-integer" | "." => {
                result.maximum_fraction_digits = Some(0);
                continue;
            }
            "measure-unit" | "unit" => {
                result.style = Some("unit".to_string());
                result.unit = first_option.map(convert_unit);
                continue;
            }
            "compact-short" | "K" => {
                result.notation = Some("compact".to_string());
                result.compact_display = Some("short".to_string());
                continue;
            }
            "compact-long" | "KK" => {
                result.notation = Some("compact".to_string());
                result.compact_display = Some("long".to_string());
                continue;
            }
            "scientific" | "engineering" => {
                result.notation = Some(stem.to_string());
                for option in &token.options {
                    result.apply_sign(option);
                }
                continue;
            }
            "notation-simple" => {
                result.notation = Some("standard".to_string());
                continue;
            }
            "unit-width-narrow" => {
                result.currency_display = Some("narrowSymbol".to_string());
                result.unit_display = Some("narrow".to_string());
                continue;
            }
            "unit-width-short" => {
                result.currency_display = Some("code".to_string());
                result.unit_display = Some("short".to_string());
                continue;
            }
            "unit-width-full-name" => {
                result.currency_display = Some("name".to_string());
                result.unit_display = Some("long".to_string());
                continue;
            }
            "unit-width-iso-code" => {
                result.currency_display = Some("symbol".to_string());
                continue;
            }
            "scale" => {
                result.scale = first_option.and_then(|value| value.parse::<f64>().ok());
                continue;
            }
            "integer-width" => {
                if token.options.len() > 1 {
                    return Err(
                        "integer-width stems only accept a single optional option".to_string()
                    );
                }
                if let Some(option) = first_option {
                    let zeros = option.chars().filter(|c| *c == '0').count();
                    if zeros > 0 {
                        result.minimum_integer_digits = Some(zeros);
                    }
                }
                continue;
            }
            _ => {}
        }

        if result.apply_sign(stem) {
            continue;
        }

        if !stem.is_empty() && stem.chars().all(|c| c == '0') {
            result.minimum_integer_digits = Some(stem.len());
            continue;
        }

        if stem.starts_with('.') {
            if token.options.len() > 1 {
                return Err(
                    "Fraction-precision stems only accept a single optional option".to_string(),
                );
            }
            if result.apply_fraction(stem) {
                if let Some(option) = first_option {
                    result.apply_significant(option);
                }
            }
            continue;
        }

        if result.apply_significant(stem) {
            continue;
        }

        if let Some(rest) = stem.strip_prefix('E') {
            let (notation, rest) = match rest.strip_prefix('E') {
                Some(rest) => ("engineering", rest),
                None => ("scientific", rest),
            };
            result.notation = Some(notation.to_string());

            let rest = if let Some(exponent) = rest.strip_prefix("+!") {
                result.sign_display = Some("always".to_string());
                exponent
            } else if let Some(exponent) = rest.strip_prefix("+?") {
                result.sign_display = Some("exceptZero".to_string());
                exponent
            } else {
                rest
            };

            if rest.is_empty() || !rest.chars().all(|c| c == '0') {
                return Err("Malformed concise eng/scientific notation".to_string());
            }
            result.minimum_integer_digits = Some(rest.len());
        }
    }

    Ok(result)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeFormatOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour12: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_cycle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone_name: Option<String>,
}

fn max_field_len(c: char) -> Option<usize> {
    match c {
        'E' | 'e' | 'c' => Some(6),
        'G' | 'Q' | 'q' | 'U' | 'M' | 'L' | 'a' | 'b' | 'B' => Some(5),
        'y' | 'Y' | 'u' | 'r' => Some(usize::MAX),
        'D' => Some(3),
        'd' | 'h' | 'k' | 'H' | 'K' | 'w' | 'm' | 's' => Some(2),
        'F' | 'W' => Some(1),
        'z' | 'Z' | 'O' | 'v' | 'V' | 'x' | 'X' => Some(4),
        'j' | 'J' | 'C' | 'S' | 'A' | 'g' => Some(1),
        _ => None,
    }
}

// Pattern fields outside quoted literals, as (field char, run length)
fn date_time_fields(pattern: &str) -> Vec<(char, usize)> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut fields = Vec::new();
    let mut i = 0;
    let mut quoted = false;

    while i < chars.len() {
        let c = chars[i];
        if c == '\'' {
            quoted = !quoted;
            i += 1;
            continue;
        }
        let max = match max_field_len(c) {
            Some(max) if !quoted => max,
            _ => {
                i += 1;
                continue;
            }
        };

        let mut len = 1;
        while i + len < chars.len() && chars[i + len] == c && len < max {
            len += 1;
        }
        fields.push((c, len));
        i += len;
    }

    fields
}

fn width(len: usize, names: [&str; 3]) -> String {
    match len {
        4 => names[1].to_string(),
        5 => names[2].to_string(),
        _ => names[0].to_string(),
    }
}

fn numeric(len: usize) -> String {
    let value = if len == 2 { "2-digit" } else { "numeric" };
    value.to_string()
}

pub fn parse_date_time_skeleton(pattern: &str) -> Result<DateTimeFormatOptions, String> {
    let mut result = DateTimeFormatOptions::default();

    for (field, len) in date_time_fields(pattern) {
        match field {
            'G' => result.era = Some(width(len, ["short", "long", "narrow"])),
            'y' => result.year = Some(numeric(len)),
            'Y' | 'u' | 'U' | 'r' => {
                return Err(
                    "`Y/u/U/r` (year) patterns are not supported, use `y` instead".to_string(),
                )
            }
            'q' | 'Q' => return Err("`q/Q` (quarter) patterns are not supported".to_string()),
            'M' | 'L' => {
                result.month = Some(
                    ["numeric", "2-digit", "short", "long", "narrow"][len.clamp(1, 5) - 1]
                        .to_string(),
                )
            }
            'w' | 'W' => return Err("`w/W` (week) patterns are not supported".to_string()),
            'd' => result.day = Some(numeric(len)),
            'D' | 'F' | 'g' => {
                return Err(
                    "`D/F/g` (day) patterns are not supported, use `d` instead".to_string(),
                )
            }
            'E' => result.weekday = Some(width(len, ["short", "long", "narrow"])),
            'e' | 'c' => {
                if len < 4 {
                    return Err(format!("`{0}..{0}{0}{0}` (weekday) patterns are not supported", field));
                }
                result.weekday = Some(
                    ["short", "long", "narrow", "short"][len.min(7) - 4].to_string(),
                );
            }
            'a' => result.hour12 = Some(true),
            'b' | 'B' => {
                return Err(
                    "`b/B` (period) patterns are not supported, use `a` instead".to_string(),
                )
            }
            'h' | 'H' | 'K' | 'k' => {
                let cycle = match field {
                    'h' => "h12",
                    'H' => "h23",
                    'K' => "h11",
                    _ => "h24",
                };
                result.hour_cycle = Some(cycle.to_string());
                result.hour = Some(numeric(len));
            }
            'j' | 'J' | 'C' => {
                return Err(
                    "`j/J/C` (hour) patterns are not supported, use `h/H/K/k` instead".to_string(),
                )
            }
            'm' => result.minute = Some(numeric(len)),
            's' => result.second = Some(numeric(len)),
            'S' | 'A' => {
                return Err(
                    "`S/A` (second) patterns are not supported, use `s` instead".to_string(),
                )
            }
            'z' => result.time_zone_name = Some(if len < 4 { "short" } else { "long" }.to_string()),
            'Z' | 'O' | 'v' | 'V' | 'X' | 'x' => {
                return Err(
                    "`Z/O/v/V/X/x` (timeZone) patterns are not supported, use `z` instead"
                        .to_string(),
                )
            }
            _ => {}
        }
    }

    Ok(result)
}

/// Replace the locale-dependent hour characters `j` and `J` with the hour
/// (and day period) characters the locale prefers.
pub fn get_best_pattern(skeleton: &str, locale: &Locale) -> String {
    let chars: Vec<char> = skeleton.chars().collect();
    let mut pattern = String::with_capacity(skeleton.len());
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            'j' => {
                let mut extra = 0;
                while pos + 1 < chars.len() && chars[pos + 1] == 'j' {
                    extra += 1;
                    pos += 1;
                }

                let hour_len = 1 + (extra & 1);
                let hour_char = locale.default_hour_symbol();
                let day_period_len = if hour_char == 'H' || hour_char == 'k' {
                    0
                } else if extra < 2 {
                    1
                } else {
                    3 + (extra >> 1)
                };

                pattern.extend(std::iter::repeat('a').take(day_period_len));
                let hours: String = std::iter::repeat(hour_char).take(hour_len).collect();
                pattern.insert_str(0, &hours);
            }
            'J' => pattern.push('H'),
            _ => pattern.push(c),
        }
        pos += 1;
    }

    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_number_skeleton() {
        let tokens = parse_number_skeleton_from_string("currency/EUR  .00").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].stem, "currency");
        assert_eq!(tokens[0].options, vec!["EUR".to_string()]);
        assert_eq!(tokens[1].stem, ".00");
    }

    #[test]
    fn test_tokenize_rejects_empty_skeleton_and_options() {
        assert!(parse_number_skeleton_from_string("").is_none());
        assert!(parse_number_skeleton_from_string("currency/").is_none());
    }

    #[test]
    fn test_number_options_from_tokens() {
        let tokens = parse_number_skeleton_from_string("currency/GBP .00 sign-always").unwrap();
        let options = parse_number_skeleton(&tokens).unwrap();
        assert_eq!(options.style.as_deref(), Some("currency"));
        assert_eq!(options.currency.as_deref(), Some("GBP"));
        assert_eq!(options.minimum_fraction_digits, Some(2));
        assert_eq!(options.maximum_fraction_digits, Some(2));
        assert_eq!(options.sign_display.as_deref(), Some("always"));
    }

    #[test]
    fn test_number_options_units_and_significant_digits() {
        let tokens = parse_number_skeleton_from_string("measure-unit/length-meter @@#").unwrap();
        let options = parse_number_skeleton(&tokens).unwrap();
        assert_eq!(options.unit.as_deref(), Some("meter"));
        assert_eq!(options.minimum_significant_digits, Some(2));
        assert_eq!(options.maximum_significant_digits, Some(3));
    }

    #[test]
    fn test_number_options_reject_extra_stem_options() {
        let tokens = parse_number_skeleton_from_string("integer-width/+00/x").unwrap();
        assert!(parse_number_skeleton(&tokens).is_err());

        let tokens = parse_number_skeleton_from_string(".00/@@/r").unwrap();
        assert!(parse_number_skeleton(&tokens).is_err());
    }

    #[test]
    fn test_concise_scientific_notation() {
        let tokens = parse_number_skeleton_from_string("E+!00").unwrap();
        let options = parse_number_skeleton(&tokens).unwrap();
        assert_eq!(options.notation.as_deref(), Some("scientific"));
        assert_eq!(options.sign_display.as_deref(), Some("always"));
        assert_eq!(options.minimum_integer_digits, Some(2));

        let tokens = parse_number_skeleton_from_string("EEx").unwrap();
        assert!(parse_number_skeleton(&tokens).is_err());
    }

    #[test]
    fn test_date_time_options() {
        let options = parse_date_time_skeleton("yMMMdEEEE hh:mm").unwrap();
        assert_eq!(options.year.as_deref(), Some("numeric"));
        assert_eq!(options.month.as_deref(), Some("short"));
        assert_eq!(options.day.as_deref(), Some("numeric"));
        assert_eq!(options.weekday.as_deref(), Some("long"));
        assert_eq!(options.hour_cycle.as_deref(), Some("h12"));
        assert_eq!(options.hour.as_deref(), Some("2-digit"));
        assert_eq!(options.minute.as_deref(), Some("2-digit"));
    }

    #[test]
    fn test_date_time_rejects_unsupported_fields() {
        let error = parse_date_time_skeleton("YYYY").unwrap_err();
        assert!(error.contains("(year)"));
        assert!(parse_date_time_skeleton("QQ").is_err());
        assert!(parse_date_time_skeleton("eee").is_err());
        assert!(parse_date_time_skeleton("ZZZZ").is_err());
    }

    #[test]
    fn test_date_time_ignores_quoted_literals() {
        let options = parse_date_time_skeleton("'week' d").unwrap();
        assert_eq!(options.day.as_deref(), Some("numeric"));
    }

    #[test]
    fn test_best_pattern_uses_locale_hour_cycle() {
        let us: Locale = "en-US".parse().unwrap();
        assert_eq!(get_best_pattern("jmm", &us), "hamm");

        let de: Locale = "de-DE".parse().unwrap();
        assert_eq!(get_best_pattern("jmm", &de), "Hmm");
        assert_eq!(get_best_pattern("Jmm", &us), "Hmm");
    }
}
