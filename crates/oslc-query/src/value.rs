//! Typed literal parsing for comparison values and `in [...]` lists.

use nom::{
    combinator::{all_consuming, consumed},
    multi::separated_list1,
    sequence::delimited,
    IResult,
};

use crate::ast::{Number, TypedValue};
use crate::error::{OslcError, OslcResult};
use crate::grammar::{comma, value_token, ws, ValueToken};
use crate::prefix::QualifiedNameResolver;

/// Parses a single `VALUE` token into a typed literal.
///
/// The token is classified, in order, as an IRI reference, a boolean, a
/// number or a string literal. A `^^prefix:local` datatype is expanded with
/// `resolver`.
///
/// # Examples
///
/// ```rust
/// use oslc_query::{parse_value, CriteriaConfig, PrefixTable, QualifiedNameResolver, TypedValue};
///
/// let prefixes = PrefixTable::parse("xsd=<http://www.w3.org/2001/XMLSchema#>").unwrap();
/// let config = CriteriaConfig::new("http://example.org/ns#");
/// let resolver = QualifiedNameResolver::new(&prefixes, &config);
///
/// assert_eq!(parse_value("true", &resolver).unwrap(), TypedValue::Boolean(true));
/// assert_eq!(parse_value("42", &resolver).unwrap(), TypedValue::integer(42));
///
/// let typed = parse_value("\"42\"^^xsd:integer", &resolver).unwrap();
/// assert_eq!(
///     typed,
///     TypedValue::String {
///         text: "42".to_string(),
///         language: None,
///         datatype: Some("http://www.w3.org/2001/XMLSchema#integer".to_string()),
///     }
/// );
/// ```
pub fn parse_value(token: &str, resolver: &QualifiedNameResolver<'_>) -> OslcResult<TypedValue> {
    match all_consuming(delimited(ws, value_token, ws))(token) {
        Ok((_, value)) => typed_value(value, resolver),
        Err(_) => Err(OslcError::MalformedValue(format!(
            "'{}' is not an IRI, boolean, number or string",
            token
        ))),
    }
}

/// Parses the inside of an `in [...]` clause: comma separated values.
///
/// Order is preserved and duplicates are kept. An empty list is malformed.
pub fn parse_value_list(
    inner: &str,
    resolver: &QualifiedNameResolver<'_>,
) -> OslcResult<Vec<TypedValue>> {
    match all_consuming(delimited(ws, value_list, ws))(inner) {
        Ok((_, values)) => values
            .into_iter()
            .map(|(_, value)| typed_value(value, resolver))
            .collect(),
        Err(_) => Err(OslcError::MalformedValue(format!(
            "'{}' is not a comma separated list of values",
            inner
        ))),
    }
}

/// `VALUE (',' VALUE)*`, keeping the source text of each element.
pub(crate) fn value_list(input: &str) -> IResult<&str, Vec<(&str, ValueToken<'_>)>> {
    separated_list1(comma, consumed(value_token))(input)
}

/// Converts a recognised token into a [`TypedValue`].
pub(crate) fn typed_value(
    token: ValueToken<'_>,
    resolver: &QualifiedNameResolver<'_>,
) -> OslcResult<TypedValue> {
    match token {
        ValueToken::Iri(iri) => Ok(TypedValue::Iri(iri.to_string())),
        ValueToken::Boolean(b) => Ok(TypedValue::Boolean(b)),
        ValueToken::Number(lexical) => parse_number(lexical).map(TypedValue::Number),
        ValueToken::String {
            text,
            language,
            datatype,
        } => Ok(TypedValue::String {
            text,
            language: language.map(str::to_string),
            datatype: datatype.map(|name| resolver.resolve(name)).transpose()?,
        }),
    }
}

fn parse_number(lexical: &str) -> OslcResult<Number> {
    if lexical.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        let value = lexical
            .parse::<f64>()
            .map_err(|_| OslcError::MalformedValue(format!("'{}' is not a decimal", lexical)))?;
        if !value.is_finite() {
            return Err(OslcError::MalformedValue(format!(
                "decimal '{}' is out of range",
                lexical
            )));
        }
        Ok(Number::Decimal(value))
    } else {
        lexical.parse::<i64>().map(Number::Integer).map_err(|_| {
            OslcError::MalformedValue(format!("integer '{}' is out of range", lexical))
        })
    }
}
