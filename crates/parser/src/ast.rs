use indexmap::IndexMap;
use models::Location;
use serde::Serialize;

use crate::skeleton::{DateTimeFormatOptions, NumberFormatOptions, NumberSkeletonToken};

/// A parsed message is a flat list of elements; plural, select and tag
/// elements nest further messages.
pub type Message = Vec<Element>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Element {
    Literal {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Argument {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Number {
        value: String,
        style: Option<NumberStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Date {
        value: String,
        style: Option<DateTimeStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Time {
        value: String,
        style: Option<DateTimeStyle>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Select {
        value: String,
        options: IndexMap<String, PluralOrSelectOption>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Plural {
        value: String,
        options: IndexMap<String, PluralOrSelectOption>,
        offset: i64,
        plural_type: PluralType,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    /// `#` inside a plural clause
    Pound {
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
    Tag {
        value: String,
        children: Message,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<Location>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PluralType {
    Cardinal,
    Ordinal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluralOrSelectOption {
    pub value: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumberStyle {
    /// A named style such as `percent` or `integer`
    Named(String),
    Skeleton(NumberSkeleton),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberSkeleton {
    pub tokens: Vec<NumberSkeletonToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub parsed_options: NumberFormatOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DateTimeStyle {
    /// A named style such as `short` or `full`
    Named(String),
    Skeleton(DateTimeSkeleton),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeSkeleton {
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub parsed_options: DateTimeFormatOptions,
}

impl Element {
    pub fn location(&self) -> Option<&Location> {
        match self {
            Element::Literal { location, .. }
            | Element::Argument { location, .. }
            | Element::Number { location, .. }
            | Element::Date { location, .. }
            | Element::Time { location, .. }
            | Element::Select { location, .. }
            | Element::Plural { location, .. }
            | Element::Pound { location }
            | Element::Tag { location, .. } => location.as_ref(),
        }
    }
}

/// Drop every location from a parsed message, recursively
pub fn prune_locations(message: &mut Message) {
    for element in message.iter_mut() {
        match element {
            Element::Literal { location, .. }
            | Element::Argument { location, .. }
            | Element::Pound { location } => *location = None,
            Element::Number {
                location, style, ..
            } => {
                *location = None;
                if let Some(NumberStyle::Skeleton(skeleton)) = style {
                    skeleton.location = None;
                }
            }
            Element::Date {
                location, style, ..
            }
            | Element::Time {
                location, style, ..
            } => {
                *location = None;
                if let Some(DateTimeStyle::Skeleton(skeleton)) = style {
                    skeleton.location = None;
                }
            }
            Element::Select {
                location, options, ..
            }
            | Element::Plural {
                location, options, ..
            } => {
                *location = None;
                for option in options.values_mut() {
                    option.location = None;
                    prune_locations(&mut option.value);
                }
            }
            Element::Tag {
                location, children, ..
            } => {
                *location = None;
                prune_locations(children);
            }
        }
    }
}
