// parser crate
//
// ICU MessageFormat grammar as understood by formatjs: literals with apostrophe
// quoting, simple and formatted arguments, plural/selectordinal/select with
// nested messages, `#` and rich text tags.

pub mod ast;
pub mod error;
mod parser;
pub mod skeleton;

pub use ast::{Element, Message, PluralType};
pub use error::{ErrorKind, ParserError};
pub use models::ParseOptions;
pub use parser::MAX_NESTING_DEPTH;

/// Parse `message` into its elements or report the first grammar violation
pub fn parse(message: &str, options: &ParseOptions) -> Result<Message, ParserError> {
    let mut elements = parser::Parser::new(message, options).parse()?;
    if !options.capture_location {
        ast::prune_locations(&mut elements);
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Locale;

    fn parse_default(message: &str) -> Result<Message, ParserError> {
        parse(message, &ParseOptions::default())
    }

    fn error_kind(message: &str) -> Option<ErrorKind> {
        parse_default(message).err().and_then(|e| e.kind())
    }

    #[test]
    fn test_plain_text_and_simple_argument() {
        let elements = parse_default("Hello {name}").unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(
            elements[0],
            Element::Literal {
                value: "Hello ".to_string(),
                location: None
            }
        );
        assert_eq!(
            elements[1],
            Element::Argument {
                value: "name".to_string(),
                location: None
            }
        );
    }

    #[test]
    fn test_unclosed_argument() {
        let error = parse_default("Hello {name").unwrap_err();
        assert_eq!(error.kind(), Some(ErrorKind::ExpectArgumentClosingBrace));
        assert_eq!(error.to_string(), "EXPECT_ARGUMENT_CLOSING_BRACE");

        let location = error.location().unwrap();
        assert_eq!(location.start.offset, 6);
        assert_eq!(location.end.offset, 11);
    }

    #[test]
    fn test_argument_errors() {
        assert_eq!(error_kind("{}"), Some(ErrorKind::EmptyArgument));
        assert_eq!(error_kind("{ }"), Some(ErrorKind::EmptyArgument));
        assert_eq!(error_kind("{foo!}"), Some(ErrorKind::MalformedArgument));
        assert_eq!(error_kind("{!}"), Some(ErrorKind::MalformedArgument));
        assert_eq!(error_kind("{foo,"), Some(ErrorKind::ExpectArgumentClosingBrace));
        assert_eq!(error_kind("{foo,}"), Some(ErrorKind::ExpectArgumentType));
        assert_eq!(error_kind("{foo, }"), Some(ErrorKind::ExpectArgumentType));
        assert_eq!(error_kind("{foo, bar}"), Some(ErrorKind::InvalidArgumentType));
        assert_eq!(error_kind("{foo, number, }"), Some(ErrorKind::ExpectArgumentStyle));
        assert_eq!(error_kind("Bad {"), Some(ErrorKind::ExpectArgumentClosingBrace));
    }

    #[test]
    fn test_closing_brace_at_top_level_is_literal() {
        let elements = parse_default("a } b").unwrap();
        assert_eq!(
            elements,
            vec![Element::Literal {
                value: "a } b".to_string(),
                location: None
            }]
        );
    }

    #[test]
    fn test_formatted_arguments() {
        assert!(parse_default("{n, number}").is_ok());
        assert!(parse_default("{n, number, percent}").is_ok());
        assert!(parse_default("{d, date, short}").is_ok());
        assert!(parse_default("{t, time, ::jmm}").is_ok());
        assert!(parse_default("{n, number, ::currency/EUR}").is_ok());
        assert_eq!(
            error_kind("{n, number, ::}"),
            Some(ErrorKind::InvalidNumberSkeleton)
        );
        assert_eq!(
            error_kind("{d, date, ::}"),
            Some(ErrorKind::ExpectDateTimeSkeleton)
        );
        assert_eq!(
            error_kind("{n, number, 'abc}"),
            Some(ErrorKind::UnclosedQuoteInArgumentStyle)
        );
    }

    #[test]
    fn test_named_style_keeps_text() {
        let elements = parse_default("{n, number, ¤#,##0.00}").unwrap();
        match &elements[0] {
            Element::Number {
                style: Some(ast::NumberStyle::Named(style)),
                ..
            } => assert_eq!(style, "¤#,##0.00"),
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_plural_with_offset_and_pound() {
        let message = "{count, plural, offset:1 =0 {nobody} one {# person} other {# people}}";
        let elements = parse_default(message).unwrap();
        match &elements[0] {
            Element::Plural {
                value,
                options,
                offset,
                plural_type,
                ..
            } => {
                assert_eq!(value, "count");
                assert_eq!(*offset, 1);
                assert_eq!(*plural_type, PluralType::Cardinal);
                let keys: Vec<&str> = options.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["=0", "one", "other"]);
                assert!(matches!(
                    options["one"].value[0],
                    Element::Pound { location: None }
                ));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_pound_outside_plural_is_literal() {
        let elements = parse_default("# of items").unwrap();
        assert!(matches!(&elements[0], Element::Literal { value, .. } if value == "# of items"));
    }

    #[test]
    fn test_select_and_selectordinal() {
        assert!(parse_default("{g, select, male {He} female {She} other {They}}").is_ok());
        let elements = parse_default("{n, selectordinal, one {#st} other {#th}}").unwrap();
        assert!(matches!(
            &elements[0],
            Element::Plural {
                plural_type: PluralType::Ordinal,
                ..
            }
        ));
    }

    #[test]
    fn test_plural_and_select_errors() {
        assert_eq!(
            error_kind("{g, select}"),
            Some(ErrorKind::ExpectSelectArgumentOptions)
        );
        assert_eq!(
            error_kind("{g, select, }"),
            Some(ErrorKind::ExpectSelectArgumentSelector)
        );
        assert_eq!(
            error_kind("{n, plural, }"),
            Some(ErrorKind::ExpectPluralArgumentSelector)
        );
        assert_eq!(
            error_kind("{g, select, male}"),
            Some(ErrorKind::ExpectSelectArgumentSelectorFragment)
        );
        assert_eq!(
            error_kind("{n, plural, one}"),
            Some(ErrorKind::ExpectPluralArgumentSelectorFragment)
        );
        assert_eq!(
            error_kind("{n, plural, offset {x}}"),
            Some(ErrorKind::ExpectPluralArgumentOffsetValue)
        );
        assert_eq!(
            error_kind("{n, plural, offset: x other {x}}"),
            Some(ErrorKind::ExpectPluralArgumentOffsetValue)
        );
        assert_eq!(
            error_kind("{n, plural, =x {#}}"),
            Some(ErrorKind::ExpectPluralArgumentSelector)
        );
        assert_eq!(
            error_kind("{n, plural, =99999999999999999999 {#}}"),
            Some(ErrorKind::InvalidPluralArgumentSelector)
        );
        assert_eq!(
            error_kind("{n, plural, one {a} one {b}}"),
            Some(ErrorKind::DuplicatePluralArgumentSelector)
        );
        assert_eq!(
            error_kind("{g, select, a {a} a {b}}"),
            Some(ErrorKind::DuplicateSelectArgumentSelector)
        );
        assert_eq!(
            error_kind("{n, plural, one {# item} other {# items}"),
            Some(ErrorKind::ExpectArgumentClosingBrace)
        );
    }

    #[test]
    fn test_requires_other_clause() {
        let options = ParseOptions {
            requires_other_clause: true,
            ..Default::default()
        };
        let error = parse("{n, plural, one {#}}", &options).unwrap_err();
        assert_eq!(error.kind(), Some(ErrorKind::MissingOtherClause));
        assert!(parse("{n, plural, one {#} other {#}}", &options).is_ok());
        assert!(parse_default("{n, plural, one {#}}").is_ok());
    }

    #[test]
    fn test_tags() {
        let elements = parse_default("Click <b>here</b>").unwrap();
        assert!(matches!(&elements[1], Element::Tag { value, children, .. }
            if value == "b" && children.len() == 1));

        assert!(parse_default("<a>{n, plural, one {<b>#</b>} other {x}}</a>").is_ok());
        assert!(parse_default("line<br/>break").is_ok());
        assert_eq!(error_kind("<b>bold"), Some(ErrorKind::UnclosedTag));
        assert_eq!(error_kind("<b>bold</i>"), Some(ErrorKind::UnmatchedClosingTag));
        assert_eq!(error_kind("bold</b>"), Some(ErrorKind::UnmatchedClosingTag));
        assert_eq!(error_kind("<b!>x</b!>"), Some(ErrorKind::InvalidTag));
    }

    #[test]
    fn test_numeric_tags_fail_without_rewriting() {
        // `<0>` is literal text but the closing `</0>` has nothing to close
        assert_eq!(
            error_kind("Click <0>here</0>"),
            Some(ErrorKind::UnmatchedClosingTag)
        );
        assert!(parse_default("Click <Trans0>here</Trans0>").is_ok());
    }

    #[test]
    fn test_ignore_tag_treats_tags_as_text() {
        let options = ParseOptions {
            ignore_tag: true,
            ..Default::default()
        };
        let elements = parse("<b>bold</i>", &options).unwrap();
        assert_eq!(
            elements,
            vec![Element::Literal {
                value: "<b>bold</i>".to_string(),
                location: None
            }]
        );
    }

    #[test]
    fn test_apostrophe_quoting() {
        let elements = parse_default("It''s '{literal}' text").unwrap();
        assert_eq!(
            elements,
            vec![Element::Literal {
                value: "It's {literal} text".to_string(),
                location: None
            }]
        );

        // An apostrophe before an ordinary character is kept as is
        let elements = parse_default("don't").unwrap();
        assert!(matches!(&elements[0], Element::Literal { value, .. } if value == "don't"));

        // Quoting runs to the end of the message when never closed
        assert!(parse_default("'{unterminated").is_ok());
    }

    #[test]
    fn test_capture_location() {
        let options = ParseOptions {
            capture_location: true,
            ..Default::default()
        };
        let elements = parse("Hi\n{name}", &options).unwrap();
        let location = elements[1].location().unwrap();
        assert_eq!(location.start.offset, 3);
        assert_eq!(location.start.line, 2);
        assert_eq!(location.start.column, 1);
        assert_eq!(location.end.offset, 9);

        let elements = parse_default("Hi\n{name}").unwrap();
        assert!(elements[1].location().is_none());
    }

    #[test]
    fn test_error_location_tracks_lines() {
        let error = parse_default("line one\nline {two").unwrap_err();
        let location = error.location().unwrap();
        assert_eq!(location.start.line, 2);
        assert_eq!(location.start.column, 6);
    }

    #[test]
    fn test_skeleton_parsing_only_when_requested() {
        let message = "{d, date, ::YYYY}";
        assert!(parse_default(message).is_ok());

        let options = ParseOptions {
            should_parse_skeletons: true,
            ..Default::default()
        };
        let error = parse(message, &options).unwrap_err();
        assert!(matches!(error, ParserError::Skeleton(_)));
        assert!(error.location().is_none());
        assert!(error.to_string().contains("`Y/u/U/r`"));

        let elements = parse("{n, number, ::percent .0}", &options).unwrap();
        match &elements[0] {
            Element::Number {
                style: Some(ast::NumberStyle::Skeleton(skeleton)),
                ..
            } => {
                assert_eq!(skeleton.parsed_options.style.as_deref(), Some("percent"));
                assert_eq!(skeleton.parsed_options.maximum_fraction_digits, Some(1));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_locale_resolves_hour_skeleton() {
        let options = ParseOptions {
            locale: Some("en-US".parse::<Locale>().unwrap()),
            should_parse_skeletons: true,
            ..Default::default()
        };
        let elements = parse("{t, time, ::jmm}", &options).unwrap();
        match &elements[0] {
            Element::Time {
                style: Some(ast::DateTimeStyle::Skeleton(skeleton)),
                ..
            } => {
                assert_eq!(skeleton.pattern, "hamm");
                assert_eq!(skeleton.parsed_options.hour12, Some(true));
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_ast_serializes_with_type_tags() {
        let elements = parse_default("Hi {name}").unwrap();
        let json = serde_json::to_value(&elements).unwrap();
        assert_eq!(json[0]["type"], "literal");
        assert_eq!(json[1]["type"], "argument");
        assert_eq!(json[1]["value"], "name");
    }

    fn nested_tags(depth: usize) -> String {
        format!("{}x{}", "<a>".repeat(depth), "</a>".repeat(depth))
    }

    #[test]
    fn test_nesting_up_to_limit_is_accepted() {
        assert!(parse_default(&nested_tags(MAX_NESTING_DEPTH)).is_ok());
    }

    #[test]
    fn test_deeply_nested_tags_are_rejected() {
        let error = parse_default(&nested_tags(10_000)).unwrap_err();
        assert!(matches!(error, ParserError::NestingTooDeep { .. }));
        assert_eq!(error.to_string(), "MAX_NESTING_DEPTH_EXCEEDED");
        assert!(error.location().is_some());
        assert!(error.kind().is_none());
    }

    #[test]
    fn test_deeply_nested_plurals_are_rejected() {
        let depth = 10_000;
        let message = format!(
            "{}x{}",
            "{n, plural, other {".repeat(depth),
            "}}".repeat(depth)
        );
        let error = parse_default(&message).unwrap_err();
        assert!(matches!(error, ParserError::NestingTooDeep { .. }));
    }
}
