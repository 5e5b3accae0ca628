use models::Location;
use std::fmt;
use thiserror::Error;

/// Grammar violations reported by the parser. The display form is the
/// upper snake case name, which is what callers surface as the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Argument is unclosed (e.g. `{0`)
    ExpectArgumentClosingBrace,
    /// Argument is empty (e.g. `{}`)
    EmptyArgument,
    /// Argument is malformed (e.g. `{foo!}`)
    MalformedArgument,
    /// Expect an argument type (e.g. `{foo,}`)
    ExpectArgumentType,
    /// Unsupported argument type (e.g. `{foo,foo}`)
    InvalidArgumentType,
    /// Expect an argument style (e.g. `{foo, number, }`)
    ExpectArgumentStyle,
    /// The number skeleton is invalid
    InvalidNumberSkeleton,
    /// Expect a date time skeleton following the `::` (e.g. `{foo, date, ::}`)
    ExpectDateTimeSkeleton,
    /// Unmatched apostrophes in the argument style (e.g. `{foo, number, 'test`)
    UnclosedQuoteInArgumentStyle,
    /// Missing select argument options (e.g. `{foo, select}`)
    ExpectSelectArgumentOptions,
    /// Expecting an offset value in `plural` or `selectordinal` argument (e.g. `{foo, plural, offset}`)
    ExpectPluralArgumentOffsetValue,
    /// Offset value in `plural` or `selectordinal` is invalid (e.g. `{foo, plural, offset: x}`)
    InvalidPluralArgumentOffsetValue,
    /// Expecting a selector in `select` argument (e.g. `{foo, select}`)
    ExpectSelectArgumentSelector,
    /// Expecting a selector in `plural` or `selectordinal` argument (e.g. `{foo, plural}`)
    ExpectPluralArgumentSelector,
    /// Expecting a message fragment after the `select` selector (e.g. `{foo, select, apple}`)
    ExpectSelectArgumentSelectorFragment,
    /// Expecting a message fragment after the `plural` or `selectordinal` selector
    ExpectPluralArgumentSelectorFragment,
    /// Selector in `plural` or `selectordinal` is malformed (e.g. `{foo, plural, =x {#}}`)
    InvalidPluralArgumentSelector,
    /// Duplicate selectors in `plural` or `selectordinal` argument
    DuplicatePluralArgumentSelector,
    /// Duplicate selectors in `select` argument
    DuplicateSelectArgumentSelector,
    /// Plural or select argument option must have `other` clause
    MissingOtherClause,
    /// The tag is malformed (e.g. `<bold!>foo</bold!>`)
    InvalidTag,
    /// The closing tag does not match the opening tag (e.g. `<bold>foo</italic>`)
    UnmatchedClosingTag,
    /// The opening tag has unmatched closing tag (e.g. `<bold>foo`)
    UnclosedTag,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ExpectArgumentClosingBrace => "EXPECT_ARGUMENT_CLOSING_BRACE",
            ErrorKind::EmptyArgument => "EMPTY_ARGUMENT",
            ErrorKind::MalformedArgument => "MALFORMED_ARGUMENT",
            ErrorKind::ExpectArgumentType => "EXPECT_ARGUMENT_TYPE",
            ErrorKind::InvalidArgumentType => "INVALID_ARGUMENT_TYPE",
            ErrorKind::ExpectArgumentStyle => "EXPECT_ARGUMENT_STYLE",
            ErrorKind::InvalidNumberSkeleton => "INVALID_NUMBER_SKELETON",
            ErrorKind::ExpectDateTimeSkeleton => "EXPECT_DATE_TIME_SKELETON",
            ErrorKind::UnclosedQuoteInArgumentStyle => "UNCLOSED_QUOTE_IN_ARGUMENT_STYLE",
            ErrorKind::ExpectSelectArgumentOptions => "EXPECT_SELECT_ARGUMENT_OPTIONS",
            ErrorKind::ExpectPluralArgumentOffsetValue => "EXPECT_PLURAL_ARGUMENT_OFFSET_VALUE",
            ErrorKind::InvalidPluralArgumentOffsetValue => "INVALID_PLURAL_ARGUMENT_OFFSET_VALUE",
            ErrorKind::ExpectSelectArgumentSelector => "EXPECT_SELECT_ARGUMENT_SELECTOR",
            ErrorKind::ExpectPluralArgumentSelector => "EXPECT_PLURAL_ARGUMENT_SELECTOR",
            ErrorKind::ExpectSelectArgumentSelectorFragment => {
                "EXPECT_SELECT_ARGUMENT_SELECTOR_FRAGMENT"
            }
            ErrorKind::ExpectPluralArgumentSelectorFragment => {
                "EXPECT_PLURAL_ARGUMENT_SELECTOR_FRAGMENT"
            }
            ErrorKind::InvalidPluralArgumentSelector => "INVALID_PLURAL_ARGUMENT_SELECTOR",
            ErrorKind::DuplicatePluralArgumentSelector => "DUPLICATE_PLURAL_ARGUMENT_SELECTOR",
            ErrorKind::DuplicateSelectArgumentSelector => "DUPLICATE_SELECT_ARGUMENT_SELECTOR",
            ErrorKind::MissingOtherClause => "MISSING_OTHER_CLAUSE",
            ErrorKind::InvalidTag => "INVALID_TAG",
            ErrorKind::UnmatchedClosingTag => "UNMATCHED_CLOSING_TAG",
            ErrorKind::UnclosedTag => "UNCLOSED_TAG",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("{kind}")]
    Syntax { kind: ErrorKind, location: Location },

    /// A skeleton the formatter options cannot express. Only raised when
    /// skeleton parsing is enabled, and carries no location.
    #[error("{0}")]
    Skeleton(String),

    /// Tags or plural/select clauses nested past `MAX_NESTING_DEPTH`
    #[error("MAX_NESTING_DEPTH_EXCEEDED")]
    NestingTooDeep { location: Location },
}

impl ParserError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ParserError::Syntax { kind, .. } => Some(*kind),
            ParserError::Skeleton(_) | ParserError::NestingTooDeep { .. } => None,
        }
    }

    pub fn location(&self) -> Option<Location> {
        match self {
            ParserError::Syntax { location, .. }
            | ParserError::NestingTooDeep { location } => Some(*location),
            ParserError::Skeleton(_) => None,
        }
    }
}
