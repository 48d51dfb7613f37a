//! Call descriptors and argument parsing.
//!
//! A [`Signature`] is the static shape of a callable: its parameter types and
//! its [`ReturnShape`]. [`CallDescriptor::new`] resolves one converter per
//! parameter up front, so an unsupported type fails before any token is read.
//! [`CallDescriptor::parse`] then walks the token stream left to right.
//!
//! # Arity
//!
//! - Tokens left over once every parameter is bound are an error, unless the
//!   last parameter is variadic, in which case they keep being converted
//!   through the last converter.
//! - Fewer bound values than declared parameters is an error. A variadic
//!   tail needs at least one value.
//!
//! Variadic overflow is folded into a single [`Value::List`] in the last slot,
//! so the bound list always has exactly one value per declared parameter.

use tracing::{debug, trace};

use crate::convert::{Converter, Registry};
use crate::error::{ConversionError, ConversionResult, SignatureError, SignatureResult};
use crate::invoke::{Invoker, ReturnShape};
use crate::target::TargetType;
use crate::value::Value;

/// Parameter types and return shape of a callable.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    params: Vec<TargetType>,
    returns: ReturnShape,
}

impl Signature {
    pub fn new(params: Vec<TargetType>, returns: ReturnShape) -> Self {
        Self { params, returns }
    }

    pub fn params(&self) -> &[TargetType] {
        &self.params
    }

    pub fn returns(&self) -> ReturnShape {
        self.returns
    }

    /// Whether the last parameter is a variadic tail.
    pub fn is_variadic(&self) -> bool {
        matches!(self.params.last(), Some(TargetType::Variadic(_)))
    }
}

/// Per-callable converters, built once and reused for every token group.
#[derive(Debug, Clone)]
pub struct CallDescriptor {
    converters: Vec<Converter>,
    variadic: bool,
    returns: ReturnShape,
}

impl CallDescriptor {
    /// Resolves a converter for every parameter of `signature`.
    ///
    /// A variadic parameter contributes the converter of its element type.
    /// Variadic-ness is carried by the last parameter's type, so a callable
    /// with no parameters is never variadic.
    pub fn new(signature: &Signature, registry: &Registry) -> SignatureResult<Self> {
        let count = signature.params.len();
        let mut converters = Vec::with_capacity(count);
        let mut variadic = false;

        for (index, ty) in signature.params.iter().enumerate() {
            let ty = match ty {
                TargetType::Variadic(inner) if index + 1 == count => {
                    variadic = true;
                    inner.as_ref()
                }
                TargetType::Variadic(_) => {
                    return Err(SignatureError::VariadicNotLast { index });
                }
                other => other,
            };
            converters.push(registry.find(ty)?);
        }

        debug!(params = count, variadic, "built call descriptor");

        Ok(Self {
            converters,
            variadic,
            returns: signature.returns,
        })
    }

    /// Declared parameter count.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    pub fn converters(&self) -> &[Converter] {
        &self.converters
    }

    /// The invoker for this callable's return shape.
    pub fn invoker(&self) -> Invoker {
        Invoker::new(self.returns)
    }

    /// Binds `tokens` to the declared parameters.
    pub fn parse(&self, tokens: &[String]) -> ConversionResult<Vec<Value>> {
        let count = self.converters.len();
        let mut bound = Vec::with_capacity(count);
        let mut rest = tokens;
        let mut n = 0;

        while !rest.is_empty() {
            if n >= count {
                if !self.variadic {
                    return Err(ConversionError::TooManyArguments);
                }
                n = count - 1;
            }
            let (value, tail) = self.converters[n].convert(rest)?;
            trace!(index = n, %value, "bound argument");
            bound.push(value);
            rest = tail;
            n += 1;
        }

        if bound.len() < count {
            return Err(ConversionError::TooFewArguments);
        }

        if self.variadic {
            let overflow = bound.split_off(count - 1);
            bound.push(Value::List(overflow));
        }
        Ok(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{FieldShape, GroupShape, IntWidth};

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn descriptor(params: Vec<TargetType>) -> CallDescriptor {
        CallDescriptor::new(&Signature::new(params, ReturnShape::NONE), &Registry::new()).unwrap()
    }

    fn int() -> TargetType {
        TargetType::Int(IntWidth::Default)
    }

    #[test]
    fn test_single_int() {
        let d = descriptor(vec![int()]);
        assert_eq!(d.parse(&tokens(&["123"])), Ok(vec![Value::Isize(123)]));
        assert_eq!(d.parse(&tokens(&["0"])), Ok(vec![Value::Isize(0)]));
        assert_eq!(d.parse(&tokens(&["-1"])), Ok(vec![Value::Isize(-1)]));
    }

    #[test]
    fn test_too_many_arguments() {
        let d = descriptor(vec![int()]);
        let err = d.parse(&tokens(&["123", "456"])).unwrap_err();
        assert_eq!(err, ConversionError::TooManyArguments);
    }

    #[test]
    fn test_too_few_arguments() {
        let d = descriptor(vec![int()]);
        assert_eq!(d.parse(&[]).unwrap_err(), ConversionError::TooFewArguments);
    }

    #[test]
    fn test_no_params_accepts_no_tokens() {
        let d = descriptor(vec![]);
        assert!(d.is_empty());
        assert_eq!(d.parse(&[]), Ok(vec![]));
        assert_eq!(
            d.parse(&tokens(&["x"])).unwrap_err(),
            ConversionError::TooManyArguments
        );
    }

    #[test]
    fn test_variadic_overflow_folds_into_last_slot() {
        let d = descriptor(vec![
            TargetType::String,
            TargetType::Variadic(Box::new(int())),
        ]);
        assert!(d.is_variadic());
        let bound = d.parse(&tokens(&["sum", "1", "2", "3"])).unwrap();
        assert_eq!(
            bound,
            vec![
                Value::String("sum".into()),
                Value::List(vec![Value::Isize(1), Value::Isize(2), Value::Isize(3)]),
            ]
        );
    }

    #[test]
    fn test_variadic_tail_requires_a_value() {
        let d = descriptor(vec![
            TargetType::String,
            TargetType::Variadic(Box::new(int())),
        ]);
        assert_eq!(
            d.parse(&tokens(&["sum"])).unwrap_err(),
            ConversionError::TooFewArguments
        );
    }

    #[test]
    fn test_variadic_must_be_last() {
        let signature = Signature::new(
            vec![TargetType::Variadic(Box::new(int())), TargetType::String],
            ReturnShape::NONE,
        );
        let err = CallDescriptor::new(&signature, &Registry::new()).unwrap_err();
        assert_eq!(err, SignatureError::VariadicNotLast { index: 0 });
    }

    #[test]
    fn test_unsupported_param_fails_before_parsing() {
        let signature = Signature::new(
            vec![int(), TargetType::Sequence(Box::new(int()))],
            ReturnShape::NONE,
        );
        assert!(matches!(
            CallDescriptor::new(&signature, &Registry::new()),
            Err(SignatureError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_conversion_error_is_reported_verbatim() {
        let d = descriptor(vec![TargetType::Bool]);
        assert_eq!(
            d.parse(&tokens(&["maybe"])).unwrap_err().to_string(),
            "invalid bool literal: maybe"
        );
    }

    #[test]
    fn test_group_then_positional() {
        let group = TargetType::Group(GroupShape::new(
            "Opts",
            vec![FieldShape::new("verbose", TargetType::Bool)],
        ));
        let d = descriptor(vec![group, TargetType::String]);
        let bound = d.parse(&tokens(&["-v", "true", "--", "file"])).unwrap();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[1], Value::String("file".into()));
    }

    #[test]
    fn test_variadic_groups_repeat() {
        let group = TargetType::Group(GroupShape::new(
            "Opts",
            vec![FieldShape::new("n", int())],
        ));
        let d = descriptor(vec![TargetType::Variadic(Box::new(group))]);
        let bound = d.parse(&tokens(&["-n", "1", "--", "-n", "2"])).unwrap();
        let [Value::List(items)] = bound.as_slice() else {
            panic!("expected a single folded slot");
        };
        assert_eq!(items.len(), 2);
    }
}
