//! Declared signatures and argument binding.
//!
//! A [`Signature`] takes the place of runtime parameter reflection: the
//! callable declares its parameters once and both the curry engine and the
//! argument binder read that declaration.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::compose::DEFAULT_NAME;
use crate::error::CallError;
use crate::value::{Arguments, FromValue, Value};

/// How a parameter receives its value.
///
/// Variants are ordered the way parameters are laid out in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterKind {
    /// Filled by position or by keyword.
    Positional,
    /// Collects any surplus positional values.
    VariadicPositional,
    /// Filled by keyword only.
    KeywordOnly,
    /// Collects any surplus keyword values.
    VariadicKeyword,
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: Arc<str>,
    kind: ParameterKind,
    default: Option<Value>,
}

impl Parameter {
    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the parameter receives its value.
    pub const fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// The default value, if one was declared.
    pub const fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    const fn is_named(&self) -> bool {
        matches!(
            self.kind,
            ParameterKind::Positional | ParameterKind::KeywordOnly
        )
    }
}

/// The declared parameters of a callable.
///
/// Built with a small builder. Parameters are kept grouped by
/// [`ParameterKind`] and otherwise in declaration order, so a positional
/// parameter declared after a keyword-only one still binds by position.
/// Redeclaring a name replaces the earlier parameter, and a signature holds
/// at most one variadic parameter of each kind.
///
/// # Examples
///
/// ```rust
/// use sidekick::{Signature, Value};
///
/// let signature = Signature::new()
///     .parameter("base")
///     .parameter_with_default("exponent", 2)
///     .keyword_only("round");
///
/// assert_eq!(signature.arity(), 2);
/// assert!(!signature.is_fixed());
/// assert_eq!(signature.defaults(), Some(vec![Value::from(2)]));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    /// Creates a signature without parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signature of required positional parameters.
    pub fn positional<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .fold(Self::new(), |signature, name| signature.parameter(name))
    }

    fn with(mut self, name: &str, kind: ParameterKind, default: Option<Value>) -> Self {
        let variadic = !matches!(kind, ParameterKind::Positional | ParameterKind::KeywordOnly);
        self.parameters.retain(|parameter| {
            &*parameter.name != name && !(variadic && parameter.kind == kind)
        });
        let index = self
            .parameters
            .iter()
            .position(|parameter| parameter.kind > kind)
            .unwrap_or(self.parameters.len());
        self.parameters.insert(index, Parameter {
            name: Arc::from(name),
            kind,
            default,
        });
        self
    }

    /// Adds a required positional parameter.
    #[must_use]
    pub fn parameter(self, name: &str) -> Self {
        self.with(name, ParameterKind::Positional, None)
    }

    /// Adds a positional parameter with a default value.
    #[must_use]
    pub fn parameter_with_default(self, name: &str, default: impl Into<Value>) -> Self {
        self.with(name, ParameterKind::Positional, Some(default.into()))
    }

    /// Adds a parameter collecting surplus positional values.
    #[must_use]
    pub fn variadic_positional(self, name: &str) -> Self {
        self.with(name, ParameterKind::VariadicPositional, None)
    }

    /// Adds a required keyword-only parameter.
    #[must_use]
    pub fn keyword_only(self, name: &str) -> Self {
        self.with(name, ParameterKind::KeywordOnly, None)
    }

    /// Adds a keyword-only parameter with a default value.
    #[must_use]
    pub fn keyword_only_with_default(self, name: &str, default: impl Into<Value>) -> Self {
        self.with(name, ParameterKind::KeywordOnly, Some(default.into()))
    }

    /// Adds a parameter collecting surplus keyword values.
    #[must_use]
    pub fn variadic_keyword(self, name: &str) -> Self {
        self.with(name, ParameterKind::VariadicKeyword, None)
    }

    /// Returns the parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns the number of positional parameters.
    pub fn arity(&self) -> usize {
        self.positional_parameters().count()
    }

    /// Returns the names of the positional parameters.
    pub fn positional_names(&self) -> impl Iterator<Item = &str> {
        self.positional_parameters().map(Parameter::name)
    }

    /// Returns the names of the keyword-only parameters.
    pub fn keyword_only_names(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.kind == ParameterKind::KeywordOnly)
            .map(Parameter::name)
    }

    /// Returns `true` if surplus positional values are collected.
    pub fn accepts_variadic_positional(&self) -> bool {
        self.has_kind(ParameterKind::VariadicPositional)
    }

    /// Returns `true` if surplus keyword values are collected.
    pub fn accepts_variadic_keyword(&self) -> bool {
        self.has_kind(ParameterKind::VariadicKeyword)
    }

    /// Returns `true` if the signature has only positional parameters, which
    /// is what currying requires.
    pub fn is_fixed(&self) -> bool {
        self.parameters
            .iter()
            .all(|parameter| parameter.kind == ParameterKind::Positional)
    }

    /// Returns the defaults of the positional parameters that declare one,
    /// or `None` when no positional parameter has a default.
    pub fn defaults(&self) -> Option<Vec<Value>> {
        let defaults: Vec<Value> = self
            .positional_parameters()
            .filter_map(|parameter| parameter.default.clone())
            .collect();
        (!defaults.is_empty()).then_some(defaults)
    }

    /// Returns the defaults of the keyword-only parameters that declare one,
    /// or `None` when there are none.
    pub fn keyword_defaults(&self) -> Option<BTreeMap<String, Value>> {
        let defaults: BTreeMap<String, Value> = self
            .parameters
            .iter()
            .filter(|parameter| parameter.kind == ParameterKind::KeywordOnly)
            .filter_map(|parameter| {
                parameter
                    .default
                    .clone()
                    .map(|default| (parameter.name.to_string(), default))
            })
            .collect();
        (!defaults.is_empty()).then_some(defaults)
    }

    /// Matches `arguments` against the declared parameters.
    ///
    /// Positional values fill positional parameters in order, surplus ones go
    /// to the variadic positional parameter. Keywords fill the parameter of
    /// the same name, unknown ones go to the variadic keyword parameter.
    /// Unfilled parameters take their default.
    ///
    /// `function` names the callee in error messages.
    ///
    /// # Errors
    ///
    /// - [`CallError::TooManyPositional`] for surplus positional values
    ///   without a variadic positional parameter
    /// - [`CallError::UnexpectedKeyword`] for unknown keywords without a
    ///   variadic keyword parameter
    /// - [`CallError::MultipleValues`] when a parameter is filled twice
    /// - [`CallError::MissingArgument`] when a parameter without default
    ///   stays unfilled
    pub fn bind(&self, function: &str, arguments: Arguments) -> Result<BoundArguments, CallError> {
        let named: Vec<&Parameter> = self
            .parameters
            .iter()
            .filter(|parameter| parameter.is_named())
            .collect();
        let positional_slots: Vec<usize> = named
            .iter()
            .enumerate()
            .filter(|(_, parameter)| parameter.kind == ParameterKind::Positional)
            .map(|(index, _)| index)
            .collect();

        let (positional, keywords) = arguments.into_parts();
        let received = positional.len();
        if received > positional_slots.len() && !self.accepts_variadic_positional() {
            return Err(CallError::TooManyPositional {
                function: function.to_string(),
                expected: positional_slots.len(),
                received,
            });
        }

        let mut slots: Vec<Option<Value>> = vec![None; named.len()];
        let mut rest = Vec::new();
        for (index, value) in positional.into_iter().enumerate() {
            match positional_slots.get(index) {
                Some(&slot) => slots[slot] = Some(value),
                None => rest.push(value),
            }
        }

        let mut extra_keywords = Vec::new();
        for (keyword, value) in keywords {
            match named.iter().position(|parameter| parameter.name == keyword) {
                Some(slot) if slots[slot].is_some() => {
                    return Err(CallError::MultipleValues {
                        function: function.to_string(),
                        parameter: keyword.to_string(),
                    });
                }
                Some(slot) => slots[slot] = Some(value),
                None if self.accepts_variadic_keyword() => extra_keywords.push((keyword, value)),
                None => {
                    return Err(CallError::UnexpectedKeyword {
                        function: function.to_string(),
                        keyword: keyword.to_string(),
                    });
                }
            }
        }

        let values = slots
            .into_iter()
            .zip(&named)
            .map(|(slot, parameter)| {
                slot.or_else(|| parameter.default.clone())
                    .ok_or_else(|| CallError::MissingArgument {
                        function: function.to_string(),
                        parameter: parameter.name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BoundArguments {
            values,
            rest,
            extra_keywords,
        })
    }

    fn positional_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|parameter| parameter.kind == ParameterKind::Positional)
    }

    fn has_kind(&self, kind: ParameterKind) -> bool {
        self.parameters.iter().any(|parameter| parameter.kind == kind)
    }
}

/// Arguments matched against a [`Signature`].
///
/// Holds one value per positional or keyword-only parameter, indexed in
/// declaration order (variadic parameters are skipped when counting), plus
/// the surplus values collected by the variadic parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments {
    values: Vec<Value>,
    rest: Vec<Value>,
    extra_keywords: Vec<(Arc<str>, Value)>,
}

impl BoundArguments {
    /// Returns the value bound to the parameter at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Converts a copy of the value bound to the parameter at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::MissingArgument`] for an index past the declared
    /// parameters, or the conversion error of [`FromValue`].
    pub fn get_as<T: FromValue>(&self, index: usize) -> Result<T, CallError> {
        let value = self.get(index).ok_or_else(|| CallError::MissingArgument {
            function: DEFAULT_NAME.to_string(),
            parameter: format!("#{index}"),
        })?;
        T::from_value(value.clone())
    }

    /// Moves the value bound at `index` out, leaving [`Value::None`].
    pub fn take(&mut self, index: usize) -> Value {
        self.values
            .get_mut(index)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    /// Returns the surplus positional values.
    pub fn rest(&self) -> &[Value] {
        &self.rest
    }

    /// Returns the surplus keyword values.
    pub fn extra_keywords(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.extra_keywords
            .iter()
            .map(|(name, value)| (&**name, value))
    }

    /// Returns the bound values in parameter order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use rstest::rstest;

    fn power() -> Signature {
        Signature::new()
            .parameter("base")
            .parameter_with_default("exponent", 2)
    }

    #[rstest]
    fn test_redeclared_name_replaces_parameter() {
        let signature = Signature::positional(["x", "y"]).parameter_with_default("x", 5);
        assert_eq!(signature.positional_names().collect::<Vec<_>>(), ["y", "x"]);
        let bound = signature.bind("f", args![1]).unwrap();
        assert_eq!(bound.into_values(), vec![Value::from(1), Value::from(5)]);
    }

    #[rstest]
    fn test_positional_after_keyword_only_binds_by_position() {
        let signature = Signature::new()
            .parameter("x")
            .keyword_only("flag")
            .parameter("y");
        assert_eq!(signature.positional_names().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(
            signature
                .parameters()
                .iter()
                .map(Parameter::kind)
                .collect::<Vec<_>>(),
            [
                ParameterKind::Positional,
                ParameterKind::Positional,
                ParameterKind::KeywordOnly
            ]
        );
        let bound = signature.bind("f", args![1, 2, flag = true]).unwrap();
        assert_eq!(
            bound.into_values(),
            vec![Value::from(1), Value::from(2), Value::from(true)]
        );
    }

    #[rstest]
    fn test_second_variadic_replaces_first() {
        let signature = Signature::positional(["x"])
            .variadic_positional("rest")
            .variadic_positional("others");
        let names: Vec<&str> = signature.parameters().iter().map(Parameter::name).collect();
        assert_eq!(names, ["x", "others"]);
    }

    #[rstest]
    fn test_bind_positional_and_default() {
        let bound = power().bind("power", args![3]).unwrap();
        assert_eq!(bound.into_values(), vec![Value::from(3), Value::from(2)]);
    }

    #[rstest]
    fn test_bind_keyword_fills_named_slot() {
        let bound = power().bind("power", args![exponent = 3, base = 2]).unwrap();
        assert_eq!(bound.into_values(), vec![Value::from(2), Value::from(3)]);
    }

    #[rstest]
    fn test_bind_reports_missing_argument() {
        let result = power().bind("power", args![exponent = 3]);
        assert_eq!(
            result,
            Err(CallError::MissingArgument {
                function: "power".to_string(),
                parameter: "base".to_string()
            })
        );
    }

    #[rstest]
    fn test_bind_reports_too_many_positional() {
        let result = power().bind("power", args![1, 2, 3]);
        assert_eq!(
            result,
            Err(CallError::TooManyPositional {
                function: "power".to_string(),
                expected: 2,
                received: 3
            })
        );
    }

    #[rstest]
    fn test_bind_reports_multiple_values() {
        let result = power().bind("power", args![1, base = 2]);
        assert_eq!(
            result,
            Err(CallError::MultipleValues {
                function: "power".to_string(),
                parameter: "base".to_string()
            })
        );
    }

    #[rstest]
    fn test_bind_reports_unexpected_keyword() {
        let result = power().bind("power", args![1, modulo = 2]);
        assert_eq!(
            result,
            Err(CallError::UnexpectedKeyword {
                function: "power".to_string(),
                keyword: "modulo".to_string()
            })
        );
    }

    #[rstest]
    fn test_bind_collects_variadics() {
        let signature = Signature::positional(["first"])
            .variadic_positional("rest")
            .keyword_only_with_default("separator", " ")
            .variadic_keyword("options");
        let bound = signature
            .bind("join", args![1, 2, 3, width = 4])
            .unwrap();
        assert_eq!(bound.get(0), Some(&Value::from(1)));
        assert_eq!(bound.get(1), Some(&Value::from(" ")));
        assert_eq!(bound.rest(), &[Value::from(2), Value::from(3)]);
        let extras: Vec<_> = bound.extra_keywords().collect();
        assert_eq!(extras, vec![("width", &Value::from(4))]);
    }

    #[rstest]
    #[case(Signature::positional(["a", "b"]), true)]
    #[case(Signature::positional(["a"]).variadic_positional("rest"), false)]
    #[case(Signature::positional(["a"]).variadic_keyword("options"), false)]
    #[case(Signature::positional(["a"]).keyword_only("flag"), false)]
    #[case(Signature::new(), true)]
    fn test_is_fixed(#[case] signature: Signature, #[case] expected: bool) {
        assert_eq!(signature.is_fixed(), expected);
    }

    #[rstest]
    fn test_keyword_defaults_only_cover_keyword_only_parameters() {
        let signature = power()
            .keyword_only_with_default("round", true)
            .keyword_only("mode");
        let defaults = signature.keyword_defaults().unwrap();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.get("round"), Some(&Value::from(true)));
        assert_eq!(Signature::positional(["x"]).keyword_defaults(), None);
    }

    #[rstest]
    fn test_take_leaves_none_behind() {
        let mut bound = power().bind("power", args![5]).unwrap();
        assert_eq!(bound.take(0), Value::from(5));
        assert_eq!(bound.get(0), Some(&Value::None));
        assert_eq!(bound.take(9), Value::None);
    }
}
