//! Named-option group converter.
//!
//! A struct-shaped parameter is populated from a run of `-<name> <value>`
//! pairs. The run ends at end of input or at a `--` token, which is consumed.
//!
//! Name resolution, for the text after the leading `-`:
//!
//! 1. An exact, case-sensitive field name wins.
//! 2. Otherwise every field whose lower-cased name starts with the
//!    lower-cased text is a candidate. One candidate is used; none is an
//!    unknown option; more than one is ambiguous, reporting the first two in
//!    declaration order.
//!
//! Step 2 is skipped when abbreviations are disabled in [`OptionMatching`].

use std::collections::HashSet;

use tracing::trace;

use super::{Converter, OptionMatching, Registry};
use crate::TERMINATOR;
use crate::error::{ConversionError, ConversionResult, SignatureError, SignatureResult};
use crate::target::GroupShape;
use crate::value::{GroupValue, Value};

/// One field of a group: its option name, slot index, and converter.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    index: usize,
    converter: Converter,
    zero: Value,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn converter(&self) -> &Converter {
        &self.converter
    }
}

/// Converter for struct-shaped parameters.
#[derive(Debug, Clone)]
pub struct GroupConverter {
    name: String,
    fields: Vec<FieldDescriptor>,
    matching: OptionMatching,
}

impl GroupConverter {
    /// Builds field converters for every declared field.
    pub fn new(shape: &GroupShape, registry: &Registry) -> SignatureResult<Self> {
        let mut seen = HashSet::new();
        let mut fields = Vec::with_capacity(shape.fields.len());

        for (index, field) in shape.fields.iter().enumerate() {
            if !seen.insert(field.name.as_str()) {
                return Err(SignatureError::DuplicateField {
                    group: shape.name.clone(),
                    field: field.name.clone(),
                });
            }
            fields.push(FieldDescriptor {
                name: field.name.clone(),
                index,
                converter: registry.find(&field.ty)?,
                zero: field.ty.zero_value(),
            });
        }

        Ok(Self {
            name: shape.name.clone(),
            fields,
            matching: registry.matching(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub(super) fn convert<'a>(
        &self,
        mut tokens: &'a [String],
    ) -> ConversionResult<(Value, &'a [String])> {
        let mut group = GroupValue::new(
            self.name.clone(),
            self.fields
                .iter()
                .map(|field| (field.name.clone(), field.zero.clone()))
                .collect(),
        );

        while let Some((marker, rest)) = tokens.split_first() {
            tokens = rest;
            let Some(name) = marker.strip_prefix('-') else {
                return Err(ConversionError::UnknownOption(marker.clone()));
            };
            if marker == TERMINATOR {
                break;
            }

            let field = self.resolve(name)?;
            if tokens.is_empty() {
                return Err(ConversionError::MissingValue(marker.clone()));
            }

            let (value, rest) = field.converter.convert(tokens)?;
            trace!(group = %self.name, option = %field.name, %value, "set group option");
            group.set(field.index, value);
            tokens = rest;
        }

        Ok((Value::Group(group), tokens))
    }

    /// Resolves an option name (without its leading `-`) to a field.
    pub fn resolve(&self, name: &str) -> ConversionResult<&FieldDescriptor> {
        if let Some(field) = self.fields.iter().find(|field| field.name == name) {
            return Ok(field);
        }
        if !self.matching.abbreviations {
            return Err(ConversionError::UnknownOption(name.to_string()));
        }

        let needle = name.to_lowercase();
        let mut candidates = self
            .fields
            .iter()
            .filter(|field| field.name.to_lowercase().starts_with(&needle));

        match (candidates.next(), candidates.next()) {
            (Some(field), None) => Ok(field),
            (Some(first), Some(second)) => Err(ConversionError::AmbiguousOption {
                name: name.to_string(),
                first: first.name.clone(),
                second: second.name.clone(),
            }),
            (None, _) => Err(ConversionError::UnknownOption(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{FieldShape, IntWidth, TargetType};

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn shape(fields: &[(&str, TargetType)]) -> GroupShape {
        GroupShape::new(
            "Opts",
            fields
                .iter()
                .map(|(name, ty)| FieldShape::new(*name, ty.clone()))
                .collect(),
        )
    }

    fn name_number() -> GroupConverter {
        let shape = shape(&[
            ("Name", TargetType::String),
            ("Number", TargetType::Int(IntWidth::Default)),
        ]);
        GroupConverter::new(&shape, &Registry::new()).unwrap()
    }

    fn group_of(value: Value) -> GroupValue {
        match value {
            Value::Group(group) => group,
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn test_binds_pairs() {
        let input = tokens(&["-name", "X", "-number", "5"]);
        let (value, rest) = name_number().convert(&input).unwrap();
        let group = group_of(value);
        assert_eq!(group.get("Name"), Some(&Value::String("X".into())));
        assert_eq!(group.get("Number"), Some(&Value::Isize(5)));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_prefix_match() {
        let input = tokens(&["-n", "X"]);
        let converter = GroupConverter::new(
            &shape(&[("Name", TargetType::String), ("Age", TargetType::Bool)]),
            &Registry::new(),
        )
        .unwrap();
        let (value, _) = converter.convert(&input).unwrap();
        assert_eq!(
            group_of(value).get("Name"),
            Some(&Value::String("X".into()))
        );
    }

    #[test]
    fn test_ambiguous_prefix_names_both_candidates() {
        let input = tokens(&["-n", "X"]);
        let err = name_number().convert(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ambiguous option 'n': matches 'Name' and 'Number'"
        );
    }

    #[test]
    fn test_ambiguous_prefix_reports_first_two_declared() {
        let converter = GroupConverter::new(
            &shape(&[
                ("na", TargetType::Bool),
                ("nb", TargetType::Bool),
                ("nc", TargetType::Bool),
            ]),
            &Registry::new(),
        )
        .unwrap();
        let err = converter.convert(&tokens(&["-n", "true"])).unwrap_err();
        assert_eq!(
            err,
            ConversionError::AmbiguousOption {
                name: "n".into(),
                first: "na".into(),
                second: "nb".into(),
            }
        );
        assert_eq!(err.to_string(), "ambiguous option 'n': matches 'na' and 'nb'");
    }

    #[test]
    fn test_exact_match_beats_prefixes() {
        let converter = GroupConverter::new(
            &shape(&[
                ("nx", TargetType::String),
                ("ny", TargetType::String),
                ("n", TargetType::String),
            ]),
            &Registry::new(),
        )
        .unwrap();
        assert_eq!(converter.resolve("n").unwrap().name(), "n");
    }

    #[test]
    fn test_unknown_option() {
        let input = tokens(&["-zzz", "1"]);
        let err = name_number().convert(&input).unwrap_err();
        assert_eq!(err, ConversionError::UnknownOption("zzz".into()));
    }

    #[test]
    fn test_bare_token_is_unknown_option() {
        let input = tokens(&["value"]);
        let err = name_number().convert(&input).unwrap_err();
        assert_eq!(err.to_string(), "unknown option: value");
    }

    #[test]
    fn test_missing_value() {
        let input = tokens(&["-Name"]);
        let err = name_number().convert(&input).unwrap_err();
        assert_eq!(err.to_string(), "missing value for option: -Name");
    }

    #[test]
    fn test_terminator_ends_group_and_is_consumed() {
        let input = tokens(&["-Name", "a", "--", "tail"]);
        let (value, rest) = name_number().convert(&input).unwrap();
        assert_eq!(
            group_of(value).get("Number"),
            Some(&Value::Isize(0)),
            "unmentioned fields keep their zero value"
        );
        assert_eq!(rest, &input[3..]);
    }

    #[test]
    fn test_last_write_wins() {
        let input = tokens(&["-Number", "1", "-Number", "2"]);
        let (value, _) = name_number().convert(&input).unwrap();
        assert_eq!(group_of(value).get("Number"), Some(&Value::Isize(2)));
    }

    #[test]
    fn test_empty_stream_yields_zero_group() {
        let (value, rest) = name_number().convert(&[]).unwrap();
        assert_eq!(group_of(value).get("Name"), Some(&Value::String(String::new())));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_field_value_may_be_optional() {
        let converter = GroupConverter::new(
            &shape(&[(
                "limit",
                TargetType::Optional(Box::new(TargetType::Uint(IntWidth::W32))),
            )]),
            &Registry::new(),
        )
        .unwrap();
        let input = tokens(&["-limit", "--"]);
        let (value, rest) = converter.convert(&input).unwrap();
        assert_eq!(group_of(value).get("limit"), Some(&Value::Optional(None)));
        assert!(rest.is_empty());
    }

    #[test]
    fn test_abbreviations_can_be_disabled() {
        let registry = Registry::new().with_matching(OptionMatching {
            abbreviations: false,
        });
        let converter = GroupConverter::new(
            &shape(&[("verbose", TargetType::Bool)]),
            &registry,
        )
        .unwrap();
        assert!(converter.resolve("verbose").is_ok());
        assert_eq!(
            converter.resolve("verb").unwrap_err(),
            ConversionError::UnknownOption("verb".into())
        );
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let err = GroupConverter::new(
            &shape(&[("a", TargetType::Bool), ("a", TargetType::String)]),
            &Registry::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "duplicate option 'a' in group 'Opts'");
    }
}
