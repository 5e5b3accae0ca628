use indexmap::IndexMap;
use models::{Location, ParseOptions, Position};

use crate::ast::{
    DateTimeSkeleton, DateTimeStyle, Element, Message, NumberSkeleton, NumberStyle,
    PluralOrSelectOption, PluralType,
};
use crate::error::{ErrorKind, ParserError};
use crate::skeleton;

type ParseResult<T> = Result<T, ParserError>;

/// Deepest tag or plural/select clause nesting accepted before parsing stops.
/// Each level costs several stack frames.
pub const MAX_NESTING_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgType {
    None,
    Plural,
    SelectOrdinal,
    Select,
}

impl ArgType {
    fn is_plural(self) -> bool {
        matches!(self, ArgType::Plural | ArgType::SelectOrdinal)
    }
}

/// Recursive descent parser over the characters of one message
pub struct Parser<'a> {
    chars: Vec<char>,
    position: Position,
    options: &'a ParseOptions,
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_alpha_or_slash(c: char) -> bool {
    is_alpha(c) || c == '/'
}

fn is_potential_element_name_char(c: char) -> bool {
    matches!(c, '-' | '.' | '_' | '\u{b7}')
        || c.is_ascii_alphanumeric()
        || matches!(c,
            '\u{c0}'..='\u{d6}'
            | '\u{d8}'..='\u{f6}'
            | '\u{f8}'..='\u{37d}'
            | '\u{37f}'..='\u{1fff}'
            | '\u{200c}'..='\u{200d}'
            | '\u{203f}'..='\u{2040}'
            | '\u{2070}'..='\u{218f}'
            | '\u{2c00}'..='\u{2fef}'
            | '\u{3001}'..='\u{d7ff}'
            | '\u{f900}'..='\u{fdcf}'
            | '\u{fdf0}'..='\u{fffd}'
            | '\u{10000}'..='\u{effff}')
}

/// Unicode `Pattern_Syntax` characters, which may not appear in identifiers
fn is_pattern_syntax(c: char) -> bool {
    matches!(c,
        '!'..='/'
        | ':'..='@'
        | '['..='^'
        | '`'
        | '{'..='~'
        | '\u{a1}'..='\u{a7}'
        | '\u{a9}'
        | '\u{ab}'
        | '\u{ac}'
        | '\u{ae}'
        | '\u{b0}'
        | '\u{b1}'
        | '\u{b6}'
        | '\u{bb}'
        | '\u{bf}'
        | '\u{d7}'
        | '\u{f7}'
        | '\u{2010}'..='\u{2027}'
        | '\u{2030}'..='\u{203e}'
        | '\u{2041}'..='\u{2053}'
        | '\u{2055}'..='\u{205e}'
        | '\u{2190}'..='\u{245f}'
        | '\u{2500}'..='\u{2775}'
        | '\u{2794}'..='\u{2bff}'
        | '\u{2e00}'..='\u{2e7f}'
        | '\u{3001}'..='\u{3003}'
        | '\u{3008}'..='\u{3020}'
        | '\u{3030}'
        | '\u{fd3e}'
        | '\u{fd3f}'
        | '\u{fe45}'
        | '\u{fe46}')
}

fn is_identifier_char(c: char) -> bool {
    !c.is_whitespace() && !is_pattern_syntax(c)
}

impl<'a> Parser<'a> {
    pub fn new(message: &str, options: &'a ParseOptions) -> Self {
        Parser {
            chars: message.chars().collect(),
            position: Position::start(),
            options,
        }
    }

    pub fn parse(mut self) -> ParseResult<Message> {
        self.parse_message(0, ArgType::None, false)
    }

    fn parse_message(
        &mut self,
        nesting_level: usize,
        parent_arg_type: ArgType,
        expecting_close_tag: bool,
    ) -> ParseResult<Message> {
        if nesting_level > MAX_NESTING_DEPTH {
            return Err(ParserError::NestingTooDeep {
                location: Location::new(self.position, self.position),
            });
        }

        let mut elements = Vec::new();

        while let Some(c) = self.char() {
            match c {
                '{' => elements.push(self.parse_argument(nesting_level, expecting_close_tag)?),
                '}' if nesting_level > 0 => break,
                '#' if parent_arg_type.is_plural() => {
                    let start = self.position;
                    self.bump();
                    elements.push(Element::Pound {
                        location: Some(Location::new(start, self.position)),
                    });
                }
                '<' if !self.options.ignore_tag && self.peek() == Some('/') => {
                    if expecting_close_tag {
                        break;
                    }
                    return Err(self.error(
                        ErrorKind::UnmatchedClosingTag,
                        Location::new(self.position, self.position),
                    ));
                }
                '<' if !self.options.ignore_tag && self.peek().is_some_and(is_alpha) => {
                    elements.push(self.parse_tag(nesting_level, parent_arg_type)?);
                }
                _ => elements.push(self.parse_literal(nesting_level, parent_arg_type)),
            }
        }

        Ok(elements)
    }

    /// `<tag>children</tag>`; a self-closing `<tag/>` is kept as literal text
    fn parse_tag(&mut self, nesting_level: usize, parent_arg_type: ArgType) -> ParseResult<Element> {
        let start = self.position;
        self.bump(); // `<`

        let tag_name = self.parse_tag_name();
        self.bump_space();

        if self.bump_if("/>") {
            return Ok(Element::Literal {
                value: format!("<{}/>", tag_name),
                location: Some(Location::new(start, self.position)),
            });
        }

        if !self.bump_if(">") {
            return Err(self.error(ErrorKind::InvalidTag, Location::new(start, self.position)));
        }

        let children = self.parse_message(nesting_level + 1, parent_arg_type, true)?;

        let end_tag_start = self.position;
        if !self.bump_if("</") {
            return Err(self.error(ErrorKind::UnclosedTag, Location::new(start, self.position)));
        }

        if !self.char().is_some_and(is_alpha) {
            return Err(self.error(
                ErrorKind::InvalidTag,
                Location::new(end_tag_start, self.position),
            ));
        }

        let closing_name_start = self.position;
        let closing_tag_name = self.parse_tag_name();
        if tag_name != closing_tag_name {
            return Err(self.error(
                ErrorKind::UnmatchedClosingTag,
                Location::new(closing_name_start, self.position),
            ));
        }

        self.bump_space();
        if !self.bump_if(">") {
            return Err(self.error(
                ErrorKind::InvalidTag,
                Location::new(end_tag_start, self.position),
            ));
        }

        Ok(Element::Tag {
            value: tag_name,
            children,
            location: Some(Location::new(start, self.position)),
        })
    }

    fn parse_tag_name(&mut self) -> String {
        let start = self.position.offset;
        self.bump(); // the first tag name character
        while self.char().is_some_and(is_potential_element_name_char) {
            self.bump();
        }
        self.slice(start, self.position.offset)
    }

    fn parse_literal(&mut self, nesting_level: usize, parent_arg_type: ArgType) -> Element {
        let start = self.position;
        let mut value = String::new();

        loop {
            if let Some(quoted) = self.try_parse_quote(parent_arg_type) {
                value.push_str(&quoted);
                continue;
            }
            if let Some(c) = self.try_parse_unquoted(nesting_level, parent_arg_type) {
                value.push(c);
                continue;
            }
            if let Some(c) = self.try_parse_left_angle_bracket() {
                value.push(c);
                continue;
            }
            break;
        }

        Element::Literal {
            value,
            location: Some(Location::new(start, self.position)),
        }
    }

    fn try_parse_left_angle_bracket(&mut self) -> Option<char> {
        let next_allows_literal = match self.peek() {
            Some(c) => !is_alpha_or_slash(c),
            None => true,
        };
        if self.char() == Some('<') && (self.options.ignore_tag || next_allows_literal) {
            self.bump();
            return Some('<');
        }
        None
    }

    /// ICU apostrophe quoting: `''` is a literal apostrophe, and an apostrophe
    /// before a syntax character quotes text up to the next lone apostrophe.
    fn try_parse_quote(&mut self, parent_arg_type: ArgType) -> Option<String> {
        if self.char() != Some('\'') {
            return None;
        }

        match self.peek() {
            Some('\'') => {
                self.bump();
                self.bump();
                return Some("'".to_string());
            }
            Some('{') | Some('<') | Some('>') | Some('}') => {}
            Some('#') if parent_arg_type.is_plural() => {}
            _ => return None,
        }

        self.bump(); // apostrophe
        let mut quoted = String::new();
        if let Some(c) = self.char() {
            quoted.push(c);
        }
        self.bump();

        while let Some(c) = self.char() {
            if c == '\'' {
                if self.peek() == Some('\'') {
                    quoted.push('\'');
                    self.bump();
                } else {
                    // closing apostrophe
                    self.bump();
                    break;
                }
            } else {
                quoted.push(c);
            }
            self.bump();
        }

        Some(quoted)
    }

    fn try_parse_unquoted(&mut self, nesting_level: usize, parent_arg_type: ArgType) -> Option<char> {
        let c = self.char()?;
        let stops_literal = c == '<'
            || c == '{'
            || (c == '#' && parent_arg_type.is_plural())
            || (c == '}' && nesting_level > 0);
        if stops_literal {
            return None;
        }
        self.bump();
        Some(c)
    }

    fn parse_argument(&mut self, nesting_level: usize, expecting_close_tag: bool) -> ParseResult<Element> {
        let opening_brace = self.position;
        self.bump(); // `{`
        self.bump_space();

        match self.char() {
            None => {
                return Err(self.error(
                    ErrorKind::ExpectArgumentClosingBrace,
                    Location::new(opening_brace, self.position),
                ))
            }
            Some('}') => {
                self.bump();
                return Err(self.error(
                    ErrorKind::EmptyArgument,
                    Location::new(opening_brace, self.position),
                ));
            }
            Some(_) => {}
        }

        let (value, _) = self.parse_identifier_if_possible();
        if value.is_empty() {
            return Err(self.error(
                ErrorKind::MalformedArgument,
                Location::new(opening_brace, self.position),
            ));
        }

        self.bump_space();

        match self.char() {
            None => Err(self.error(
                ErrorKind::ExpectArgumentClosingBrace,
                Location::new(opening_brace, self.position),
            )),
            Some('}') => {
                self.bump();
                Ok(Element::Argument {
                    value,
                    location: Some(Location::new(opening_brace, self.position)),
                })
            }
            Some(',') => {
                self.bump();
                self.bump_space();
                if self.is_eof() {
                    return Err(self.error(
                        ErrorKind::ExpectArgumentClosingBrace,
                        Location::new(opening_brace, self.position),
                    ));
                }
                self.parse_argument_options(nesting_level, expecting_close_tag, value, opening_brace)
            }
            Some(_) => Err(self.error(
                ErrorKind::MalformedArgument,
                Location::new(opening_brace, self.position),
            )),
        }
    }

    fn parse_identifier_if_possible(&mut self) -> (String, Location) {
        let start = self.position;
        while self.char().is_some_and(is_identifier_char) {
            self.bump();
        }
        (
            self.slice(start.offset, self.position.offset),
            Location::new(start, self.position),
        )
    }

    fn parse_argument_options(
        &mut self,
        nesting_level: usize,
        expecting_close_tag: bool,
        value: String,
        opening_brace: Position,
    ) -> ParseResult<Element> {
        let type_start = self.position;
        let (arg_type, _) = self.parse_identifier_if_possible();
        let type_end = self.position;

        match arg_type.as_str() {
            "" => Err(self.error(
                ErrorKind::ExpectArgumentType,
                Location::new(type_start, type_end),
            )),
            "number" | "date" | "time" => {
                self.parse_simple_argument(&arg_type, value, opening_brace)
            }
            "plural" | "selectordinal" | "select" => {
                let parent_arg_type = match arg_type.as_str() {
                    "plural" => ArgType::Plural,
                    "selectordinal" => ArgType::SelectOrdinal,
                    _ => ArgType::Select,
                };

                let type_end = self.position;
                self.bump_space();
                if !self.bump_if(",") {
                    return Err(self.error(
                        ErrorKind::ExpectSelectArgumentOptions,
                        Location::new(type_end, type_end),
                    ));
                }
                self.bump_space();

                // {name, plural, offset:1, options}
                let mut first_selector = self.parse_identifier_if_possible();
                let mut offset = 0;
                if parent_arg_type != ArgType::Select && first_selector.0 == "offset" {
                    if !self.bump_if(":") {
                        return Err(self.error(
                            ErrorKind::ExpectPluralArgumentOffsetValue,
                            Location::new(self.position, self.position),
                        ));
                    }
                    self.bump_space();
                    offset = self.try_parse_decimal_integer(
                        ErrorKind::ExpectPluralArgumentOffsetValue,
                        ErrorKind::InvalidPluralArgumentOffsetValue,
                    )?;
                    self.bump_space();
                    first_selector = self.parse_identifier_if_possible();
                }

                let options = self.try_parse_plural_or_select_options(
                    nesting_level,
                    parent_arg_type,
                    expecting_close_tag,
                    first_selector,
                )?;
                self.try_parse_argument_close(opening_brace)?;
                let location = Some(Location::new(opening_brace, self.position));

                Ok(match parent_arg_type {
                    ArgType::Select => Element::Select {
                        value,
                        options,
                        location,
                    },
                    _ => Element::Plural {
                        value,
                        options,
                        offset,
                        plural_type: if parent_arg_type == ArgType::Plural {
                            PluralType::Cardinal
                        } else {
                            PluralType::Ordinal
                        },
                        location,
                    },
                })
            }
            _ => Err(self.error(
                ErrorKind::InvalidArgumentType,
                Location::new(type_start, type_end),
            )),
        }
    }

    /// `{name, number|date|time[, style]}` where the style may be a `::skeleton`
    fn parse_simple_argument(
        &mut self,
        arg_type: &str,
        value: String,
        opening_brace: Position,
    ) -> ParseResult<Element> {
        self.bump_space();

        let mut style_and_location = None;
        if self.bump_if(",") {
            self.bump_space();
            let style_start = self.position;
            let style = self.parse_simple_arg_style_if_possible()?;
            let style = style.trim_end().to_string();
            if style.is_empty() {
                return Err(self.error(
                    ErrorKind::ExpectArgumentStyle,
                    Location::new(self.position, self.position),
                ));
            }
            style_and_location = Some((style, Location::new(style_start, self.position)));
        }

        self.try_parse_argument_close(opening_brace)?;
        let location = Location::new(opening_brace, self.position);

        let Some((style, style_location)) = style_and_location else {
            return Ok(simple_element(arg_type, value, None, None, location));
        };

        let Some(skeleton_text) = style.strip_prefix("::") else {
            return Ok(simple_element(
                arg_type,
                value,
                Some(NumberStyle::Named(style.clone())),
                Some(DateTimeStyle::Named(style.clone())),
                location,
            ));
        };
        let skeleton_text = skeleton_text.trim_start();

        if arg_type == "number" {
            let tokens = skeleton::parse_number_skeleton_from_string(skeleton_text)
                .ok_or_else(|| self.error(ErrorKind::InvalidNumberSkeleton, style_location))?;
            let parsed_options = if self.options.should_parse_skeletons {
                skeleton::parse_number_skeleton(&tokens).map_err(ParserError::Skeleton)?
            } else {
                Default::default()
            };
            let style = NumberStyle::Skeleton(NumberSkeleton {
                tokens,
                location: Some(style_location),
                parsed_options,
            });
            return Ok(Element::Number {
                value,
                style: Some(style),
                location: Some(location),
            });
        }

        if skeleton_text.is_empty() {
            return Err(self.error(ErrorKind::ExpectDateTimeSkeleton, location));
        }

        let pattern = match &self.options.locale {
            Some(locale) => skeleton::get_best_pattern(skeleton_text, locale),
            None => skeleton_text.to_string(),
        };
        let parsed_options = if self.options.should_parse_skeletons {
            skeleton::parse_date_time_skeleton(&pattern).map_err(ParserError::Skeleton)?
        } else {
            Default::default()
        };
        let style = Some(DateTimeStyle::Skeleton(DateTimeSkeleton {
            pattern,
            location: Some(style_location),
            parsed_options,
        }));

        Ok(if arg_type == "date" {
            Element::Date {
                value,
                style,
                location: Some(location),
            }
        } else {
            Element::Time {
                value,
                style,
                location: Some(location),
            }
        })
    }

    fn try_parse_argument_close(&mut self, opening_brace: Position) -> ParseResult<()> {
        if self.char() != Some('}') {
            return Err(self.error(
                ErrorKind::ExpectArgumentClosingBrace,
                Location::new(opening_brace, self.position),
            ));
        }
        self.bump();
        Ok(())
    }

    /// Style text up to the closing brace of the argument. Apostrophes quote,
    /// balanced braces are kept.
    fn parse_simple_arg_style_if_possible(&mut self) -> ParseResult<String> {
        let mut nested_braces = 0usize;
        let start = self.position.offset;

        while let Some(c) = self.char() {
            match c {
                '\'' => {
                    self.bump();
                    let apostrophe = self.position;
                    if !self.bump_until('\'') {
                        return Err(self.error(
                            ErrorKind::UnclosedQuoteInArgumentStyle,
                            Location::new(apostrophe, self.position),
                        ));
                    }
                    self.bump();
                }
                '{' => {
                    nested_braces += 1;
                    self.bump();
                }
                '}' => {
                    if nested_braces == 0 {
                        break;
                    }
                    nested_braces -= 1;
                    self.bump();
                }
                _ => self.bump(),
            }
        }

        Ok(self.slice(start, self.position.offset))
    }

    fn try_parse_plural_or_select_options(
        &mut self,
        nesting_level: usize,
        parent_arg_type: ArgType,
        expecting_close_tag: bool,
        first_selector: (String, Location),
    ) -> ParseResult<IndexMap<String, PluralOrSelectOption>> {
        let is_select = parent_arg_type == ArgType::Select;
        let mut options = IndexMap::new();
        let mut has_other_clause = false;
        let (mut selector, mut selector_location) = first_selector;

        loop {
            if selector.is_empty() {
                let start = self.position;
                if !is_select && self.bump_if("=") {
                    // `=2 {...}`
                    self.try_parse_decimal_integer(
                        ErrorKind::ExpectPluralArgumentSelector,
                        ErrorKind::InvalidPluralArgumentSelector,
                    )?;
                    selector_location = Location::new(start, self.position);
                    selector = self.slice(start.offset, self.position.offset);
                } else {
                    break;
                }
            }

            if options.contains_key(&selector) {
                let kind = if is_select {
                    ErrorKind::DuplicateSelectArgumentSelector
                } else {
                    ErrorKind::DuplicatePluralArgumentSelector
                };
                return Err(self.error(kind, selector_location));
            }
            if selector == "other" {
                has_other_clause = true;
            }

            self.bump_space();
            let opening_brace = self.position;
            if !self.bump_if("{") {
                let kind = if is_select {
                    ErrorKind::ExpectSelectArgumentSelectorFragment
                } else {
                    ErrorKind::ExpectPluralArgumentSelectorFragment
                };
                return Err(self.error(kind, Location::new(self.position, self.position)));
            }

            let fragment =
                self.parse_message(nesting_level + 1, parent_arg_type, expecting_close_tag)?;
            self.try_parse_argument_close(opening_brace)?;

            options.insert(
                selector,
                PluralOrSelectOption {
                    value: fragment,
                    location: Some(Location::new(opening_brace, self.position)),
                },
            );

            self.bump_space();
            (selector, selector_location) = self.parse_identifier_if_possible();
        }

        if options.is_empty() {
            let kind = if is_select {
                ErrorKind::ExpectSelectArgumentSelector
            } else {
                ErrorKind::ExpectPluralArgumentSelector
            };
            return Err(self.error(kind, Location::new(self.position, self.position)));
        }

        if self.options.requires_other_clause && !has_other_clause {
            return Err(self.error(
                ErrorKind::MissingOtherClause,
                Location::new(self.position, self.position),
            ));
        }

        Ok(options)
    }

    fn try_parse_decimal_integer(
        &mut self,
        expect_number_error: ErrorKind,
        invalid_number_error: ErrorKind,
    ) -> ParseResult<i64> {
        let start = self.position;
        let mut sign = 1;
        if self.bump_if("-") {
            sign = -1;
        } else {
            self.bump_if("+");
        }

        let mut has_digits = false;
        let mut overflow = false;
        let mut decimal: i64 = 0;
        while let Some(digit) = self.char().and_then(|c| c.to_digit(10)) {
            has_digits = true;
            match decimal
                .checked_mul(10)
                .and_then(|d| d.checked_add(i64::from(digit)))
            {
                Some(next) => decimal = next,
                None => overflow = true,
            }
            self.bump();
        }

        let location = Location::new(start, self.position);
        if !has_digits {
            return Err(self.error(expect_number_error, location));
        }

        // Same bound as a JavaScript safe integer
        const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;
        if overflow || decimal > MAX_SAFE_INTEGER {
            return Err(self.error(invalid_number_error, location));
        }

        Ok(decimal * sign)
    }

    fn error(&self, kind: ErrorKind, location: Location) -> ParserError {
        ParserError::Syntax { kind, location }
    }

    fn is_eof(&self) -> bool {
        self.position.offset >= self.chars.len()
    }

    fn char(&self) -> Option<char> {
        self.chars.get(self.position.offset).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position.offset + 1).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn bump(&mut self) {
        let Some(c) = self.char() else {
            return;
        };
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        self.position.offset += 1;
    }

    /// Consume `prefix` if the input continues with it
    fn bump_if(&mut self, prefix: &str) -> bool {
        let matches = prefix
            .chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.position.offset + i) == Some(&c));
        if matches {
            for _ in prefix.chars() {
                self.bump();
            }
        }
        matches
    }

    /// Advance to the next `target`, or to the end when there is none
    fn bump_until(&mut self, target: char) -> bool {
        while let Some(c) = self.char() {
            if c == target {
                return true;
            }
            self.bump();
        }
        false
    }

    fn bump_space(&mut self) {
        while self.char().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }
}

fn simple_element(
    arg_type: &str,
    value: String,
    number_style: Option<NumberStyle>,
    date_time_style: Option<DateTimeStyle>,
    location: Location,
) -> Element {
    let location = Some(location);
    match arg_type {
        "number" => Element::Number {
            value,
            style: number_style,
            location,
        },
        "date" => Element::Date {
            value,
            style: date_time_style,
            location,
        },
        _ => Element::Time {
            value,
            style: date_time_style,
            location,
        },
    }
}
