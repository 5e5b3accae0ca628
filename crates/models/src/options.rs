use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Options forwarded to the grammar parser untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Treat HTML/XML tags as string literals
    pub ignore_tag: bool,
    /// `select`, `selectordinal` and `plural` arguments must have an `other` clause
    pub requires_other_clause: bool,
    /// Parse number and date skeletons into formatter options
    pub should_parse_skeletons: bool,
    /// Keep source locations on the parsed elements
    pub capture_location: bool,
    /// Locale used to resolve locale-dependent skeleton characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

/// Options for a validation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationOptions {
    /// Print the results to the console
    pub pretty_print: bool,
    /// Also print valid files when pretty printing
    pub verbose: bool,
    /// Rewrite numeric component tags such as `<0>` before parsing
    #[serde(alias = "ignoreTransTag")]
    pub ignore_component_tags: bool,
    pub parse_options: ParseOptions,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Locale identifier is empty")]
    Empty,

    #[error("Invalid language subtag '{0}'")]
    InvalidLanguage(String),

    #[error("Invalid subtag '{subtag}' in locale '{locale}'")]
    InvalidSubtag { locale: String, subtag: String },
}

/// Hour cycle requested through the `-u-hc-` extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourCycle {
    H11,
    H12,
    H23,
    H24,
}

impl HourCycle {
    fn from_keyword(value: &str) -> Option<Self> {
        match value {
            "h11" => Some(HourCycle::H11),
            "h12" => Some(HourCycle::H12),
            "h23" => Some(HourCycle::H23),
            "h24" => Some(HourCycle::H24),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            HourCycle::H11 => 'K',
            HourCycle::H12 => 'h',
            HourCycle::H23 => 'H',
            HourCycle::H24 => 'k',
        }
    }
}

// Regions whose preferred hour symbol is `h`; everything else uses `H`.
const H12_REGIONS: &[&str] = &[
    "AE", "AU", "BD", "BH", "CA", "CO", "EG", "IN", "IQ", "JO", "KR", "KW", "LB", "MY", "NZ",
    "OM", "PH", "PK", "QA", "SA", "SY", "TW", "US", "YE",
];

// Likely region for bare language tags that resolve to a 12-hour region
const LIKELY_REGIONS: &[(&str, &str)] = &[
    ("ar", "EG"),
    ("bn", "BD"),
    ("en", "US"),
    ("fil", "PH"),
    ("hi", "IN"),
    ("ko", "KR"),
    ("ur", "PK"),
];

/// The subset of a BCP 47 language tag needed to resolve skeletons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    tag: String,
    language: String,
    script: Option<String>,
    region: Option<String>,
    hour_cycle: Option<HourCycle>,
}

impl Locale {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn hour_cycle(&self) -> Option<HourCycle> {
        self.hour_cycle
    }

    /// The hour pattern character this locale prefers (`h`, `H`, `K` or `k`)
    pub fn default_hour_symbol(&self) -> char {
        if let Some(cycle) = self.hour_cycle {
            return cycle.symbol();
        }

        let region = self.region.as_deref().or_else(|| {
            LIKELY_REGIONS
                .iter()
                .find(|(language, _)| *language == self.language)
                .map(|(_, region)| *region)
        });

        match region {
            Some(region) if H12_REGIONS.contains(&region) => 'h',
            _ => 'H',
        }
    }
}

fn is_alpha(subtag: &str) -> bool {
    subtag.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_digit(subtag: &str) -> bool {
    subtag.chars().all(|c| c.is_ascii_digit())
}

fn is_alphanumeric(subtag: &str) -> bool {
    subtag.chars().all(|c| c.is_ascii_alphanumeric())
}

fn is_variant(subtag: &str) -> bool {
    let len = subtag.len();
    is_alphanumeric(subtag)
        && ((5..=8).contains(&len)
            || (len == 4 && subtag.chars().next().is_some_and(|c| c.is_ascii_digit())))
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut subtags = tag.split(['-', '_']).peekable();
        let language = subtags.next().unwrap_or_default();
        let language_len = language.len();
        if !is_alpha(language) || !((2..=3).contains(&language_len) || (5..=8).contains(&language_len))
        {
            return Err(LocaleError::InvalidLanguage(language.to_string()));
        }

        let invalid = |subtag: &str| LocaleError::InvalidSubtag {
            locale: tag.to_string(),
            subtag: subtag.to_string(),
        };

        let mut locale = Locale {
            tag: String::new(),
            language: language.to_ascii_lowercase(),
            script: None,
            region: None,
            hour_cycle: None,
        };

        if let Some(subtag) = subtags.peek() {
            if subtag.len() == 4 && is_alpha(subtag) {
                let mut script = subtag.to_ascii_lowercase();
                script[..1].make_ascii_uppercase();
                locale.script = Some(script);
                subtags.next();
            }
        }

        if let Some(subtag) = subtags.peek() {
            if (subtag.len() == 2 && is_alpha(subtag)) || (subtag.len() == 3 && is_digit(subtag)) {
                locale.region = Some(subtag.to_ascii_uppercase());
                subtags.next();
            }
        }

        while let Some(subtag) = subtags.next() {
            if is_variant(subtag) {
                continue;
            }
            if subtag.len() != 1 || !is_alphanumeric(subtag) {
                return Err(invalid(subtag));
            }

            let singleton = subtag.to_ascii_lowercase();
            if singleton == "x" {
                // private use runs to the end of the tag
                break;
            }

            let mut key: Option<String> = None;
            while let Some(next) = subtags.peek() {
                if next.len() == 1 {
                    break;
                }
                if !is_alphanumeric(next) || next.len() > 8 {
                    return Err(invalid(next));
                }
                let next = next.to_ascii_lowercase();
                subtags.next();

                if singleton != "u" {
                    continue;
                }
                if next.len() == 2 {
                    key = Some(next);
                } else if key.as_deref() == Some("hc") {
                    locale.hour_cycle = HourCycle::from_keyword(&next);
                }
            }
        }

        let mut canonical = locale.language.clone();
        if let Some(script) = &locale.script {
            canonical.push('-');
            canonical.push_str(script);
        }
        if let Some(region) = &locale.region {
            canonical.push('-');
            canonical.push_str(region);
        }
        if let Some(cycle) = locale.hour_cycle {
            let keyword = match cycle {
                HourCycle::H11 => "h11",
                HourCycle::H12 => "h12",
                HourCycle::H23 => "h23",
                HourCycle::H24 => "h24",
            };
            canonical.push_str("-u-hc-");
            canonical.push_str(keyword);
        }
        locale.tag = canonical;

        Ok(locale)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_region() {
        let locale: Locale = "en-us".parse().unwrap();
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), Some("US"));
        assert_eq!(locale.to_string(), "en-US");
    }

    #[test]
    fn test_parse_script_and_underscore_separator() {
        let locale: Locale = "zh_hant_TW".parse().unwrap();
        assert_eq!(locale.script(), Some("Hant"));
        assert_eq!(locale.region(), Some("TW"));
        assert_eq!(locale.to_string(), "zh-Hant-TW");
    }

    #[test]
    fn test_hour_cycle_extension_wins() {
        let locale: Locale = "en-US-u-hc-h23".parse().unwrap();
        assert_eq!(locale.hour_cycle(), Some(HourCycle::H23));
        assert_eq!(locale.default_hour_symbol(), 'H');
    }

    #[test]
    fn test_default_hour_symbol_by_region() {
        assert_eq!("en-US".parse::<Locale>().unwrap().default_hour_symbol(), 'h');
        assert_eq!("en-GB".parse::<Locale>().unwrap().default_hour_symbol(), 'H');
        assert_eq!("en".parse::<Locale>().unwrap().default_hour_symbol(), 'h');
        assert_eq!("de".parse::<Locale>().unwrap().default_hour_symbol(), 'H');
    }

    #[test]
    fn test_rejects_malformed_tags() {
        assert_eq!("".parse::<Locale>(), Err(LocaleError::Empty));
        assert!(matches!(
            "e".parse::<Locale>(),
            Err(LocaleError::InvalidLanguage(_))
        ));
        assert!(matches!(
            "en-US-!!".parse::<Locale>(),
            Err(LocaleError::InvalidSubtag { .. })
        ));
    }

    #[test]
    fn test_validation_options_accept_original_names() {
        let options: ValidationOptions = serde_json::from_str(
            r#"{
                "prettyPrint": true,
                "ignoreTransTag": true,
                "parseOptions": { "requiresOtherClause": true, "locale": "en-US" }
            }"#,
        )
        .unwrap();

        assert!(options.pretty_print);
        assert!(!options.verbose);
        assert!(options.ignore_component_tags);
        assert!(options.parse_options.requires_other_clause);
        assert_eq!(
            options.parse_options.locale.as_ref().map(Locale::to_string),
            Some("en-US".to_string())
        );
    }

    #[test]
    fn test_invalid_locale_in_options_is_rejected() {
        let result: Result<ParseOptions, _> = serde_json::from_str(r#"{ "locale": "1" }"#);
        assert!(result.is_err());
    }
}
