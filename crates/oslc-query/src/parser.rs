//! Recursive-descent parsers for `oslc.where` and `oslc.select`.
//!
//! Both clauses are parsed in two steps. The nom grammar first builds a raw
//! tree that borrows names and values from the input; nested `{...}` scopes
//! recurse into the same rule, so `and` and `,` inside braces always belong
//! to the inner list. The raw tree is then lowered into [`Condition`] and
//! [`Property`] values, expanding every name through the
//! [`QualifiedNameResolver`].

use nom::{
    bytes::complete::tag,
    character::complete::{char, multispace1},
    combinator::{all_consuming, consumed, cut, opt},
    error::{Error, ErrorKind},
    multi::separated_list1,
    sequence::{delimited, preceded, terminated, tuple},
    IResult, Offset,
};
use tracing::trace;

use crate::ast::{ComparisonOperator, Condition, Property, TypedValue};
use crate::error::{Clause, OslcError, OslcResult};
use crate::grammar::{comma, identifier, operator, syntax_error, value_token, ws, ValueToken};
use crate::prefix::QualifiedNameResolver;
use crate::value::{typed_value, value_list};

/// Parses an `oslc.where` clause into its top-level conditions.
///
/// The returned conditions are implicitly AND-ed. An empty clause yields no
/// conditions.
pub(crate) fn parse_where(
    input: &str,
    resolver: &QualifiedNameResolver<'_>,
    max_nesting: usize,
) -> OslcResult<Vec<Condition>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let depth = Depth::new(max_nesting);
    let terms = match all_consuming(delimited(ws, |i| compound_term(i, depth), ws))(input) {
        Ok((_, terms)) => terms,
        Err(e) => return Err(syntax_error(Clause::Where, input, e)),
    };

    let lowering = Lowering { source: input, resolver };
    terms.into_iter().map(|term| lowering.condition(term)).collect()
}

/// Parses an `oslc.select` clause into its top-level properties.
pub(crate) fn parse_select(
    input: &str,
    resolver: &QualifiedNameResolver<'_>,
    max_nesting: usize,
) -> OslcResult<Vec<Property>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let depth = Depth::new(max_nesting);
    let properties = match all_consuming(delimited(ws, |i| property_list(i, depth), ws))(input) {
        Ok((_, properties)) => properties,
        Err(e) => return Err(syntax_error(Clause::Select, input, e)),
    };

    let lowering = Lowering { source: input, resolver };
    properties
        .into_iter()
        .map(|property| lowering.property(property))
        .collect()
}

// ============================================================================
// Raw syntax tree
// ============================================================================

#[derive(Debug)]
enum RawTerm<'a> {
    Scoped {
        name: &'a str,
        terms: Vec<RawTerm<'a>>,
    },
    Compare {
        name: &'a str,
        operator: ComparisonOperator,
        value: (&'a str, ValueToken<'a>),
    },
    In {
        name: &'a str,
        values: Vec<(&'a str, ValueToken<'a>)>,
    },
}

#[derive(Debug)]
struct RawProperty<'a> {
    name: &'a str,
    children: Vec<RawProperty<'a>>,
}

/// Current scope depth and the configured limit.
#[derive(Debug, Clone, Copy)]
struct Depth {
    level: usize,
    max: usize,
}

impl Depth {
    fn new(max: usize) -> Self {
        Self { level: 0, max }
    }

    fn descend(self) -> Option<Depth> {
        (self.level < self.max).then_some(Depth {
            level: self.level + 1,
            max: self.max,
        })
    }
}

fn too_deep(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Failure(Error::new(input, ErrorKind::TooLarge))
}

// ============================================================================
// oslc.where
// ============================================================================

/// `and` surrounded by whitespace.
fn and_keyword(input: &str) -> IResult<&str, &str> {
    delimited(multispace1, tag("and"), multispace1)(input)
}

/// `TERM (and TERM)*`
fn compound_term<'a>(input: &'a str, depth: Depth) -> IResult<&'a str, Vec<RawTerm<'a>>> {
    separated_list1(and_keyword, move |i: &'a str| term(i, depth))(input)
}

/// `IDENTIFIER (SCOPED_TERM | IN_CLAUSE | COMPARISON)`
fn term<'a>(input: &'a str, depth: Depth) -> IResult<&'a str, RawTerm<'a>> {
    let (input, name) = identifier(input)?;

    if let Ok((rest, _)) = preceded(ws, char::<&str, Error<&str>>('{'))(input) {
        let inner = depth.descend().ok_or_else(|| too_deep(rest))?;
        let (rest, terms) = cut(terminated(
            delimited(ws, move |i: &'a str| compound_term(i, inner), ws),
            char('}'),
        ))(rest)?;
        return Ok((rest, RawTerm::Scoped { name, terms }));
    }

    match in_clause(input) {
        Ok((rest, values)) => return Ok((rest, RawTerm::In { name, values })),
        Err(nom::Err::Error(_)) => {}
        Err(e) => return Err(e),
    }

    let (rest, (operator, value)) = comparison(input)?;
    Ok((rest, RawTerm::Compare { name, operator, value }))
}

/// `in [VALUE (, VALUE)*]`
fn in_clause(input: &str) -> IResult<&str, Vec<(&str, ValueToken<'_>)>> {
    let (input, _) = tuple((multispace1, tag("in"), ws, char('[')))(input)?;
    cut(terminated(delimited(ws, value_list, ws), char(']')))(input)
}

/// `OPERATOR VALUE`
fn comparison(input: &str) -> IResult<&str, (ComparisonOperator, (&str, ValueToken<'_>))> {
    let (input, operator) = preceded(ws, operator)(input)?;
    let (input, value) = cut(preceded(ws, consumed(value_token)))(input)?;
    Ok((input, (operator, value)))
}

// ============================================================================
// oslc.select
// ============================================================================

/// `PROPERTY (, PROPERTY)*`
fn property_list<'a>(input: &'a str, depth: Depth) -> IResult<&'a str, Vec<RawProperty<'a>>> {
    separated_list1(comma, move |i: &'a str| property(i, depth))(input)
}

/// `IDENTIFIER ('{' PROPERTY (, PROPERTY)* '}')?`
fn property<'a>(input: &'a str, depth: Depth) -> IResult<&'a str, RawProperty<'a>> {
    let (input, name) = identifier(input)?;
    let (input, children) = opt(move |i: &'a str| nested_properties(i, depth))(input)?;
    Ok((
        input,
        RawProperty {
            name,
            children: children.unwrap_or_default(),
        },
    ))
}

fn nested_properties<'a>(input: &'a str, depth: Depth) -> IResult<&'a str, Vec<RawProperty<'a>>> {
    let (input, _) = preceded(ws, char('{'))(input)?;
    let inner = depth.descend().ok_or_else(|| too_deep(input))?;
    cut(terminated(
        delimited(ws, move |i: &'a str| property_list(i, inner), ws),
        char('}'),
    ))(input)
}

// ============================================================================
// Lowering
// ============================================================================

struct Lowering<'s, 'r> {
    source: &'s str,
    resolver: &'r QualifiedNameResolver<'r>,
}

impl Lowering<'_, '_> {
    fn condition(&self, term: RawTerm<'_>) -> OslcResult<Condition> {
        let condition = match term {
            RawTerm::Scoped { name, terms } => {
                let children = terms
                    .into_iter()
                    .map(|t| self.condition(t))
                    .collect::<OslcResult<Vec<_>>>()?;
                Condition::scoped(self.resolver.resolve(name)?, children)
            }
            RawTerm::Compare {
                name,
                operator,
                value,
            } => Condition::compare(self.resolver.resolve(name)?, operator, self.value(value)?),
            RawTerm::In { name, values } => {
                let values = values
                    .into_iter()
                    .map(|v| self.value(v))
                    .collect::<OslcResult<Vec<_>>>()?;
                Condition::in_list(self.resolver.resolve(name)?, values)
            }
        };
        trace!(condition = %condition, "parsed where term");
        Ok(condition)
    }

    fn value(&self, (span, token): (&str, ValueToken<'_>)) -> OslcResult<TypedValue> {
        typed_value(token, self.resolver).map_err(|e| match e {
            OslcError::MalformedValue(reason) => OslcError::malformed(
                Clause::Where,
                self.source.offset(span),
                format!("malformed value: {}", reason),
            ),
            other => other,
        })
    }

    fn property(&self, raw: RawProperty<'_>) -> OslcResult<Property> {
        let children = raw
            .children
            .into_iter()
            .map(|child| self.property(child))
            .collect::<OslcResult<Vec<_>>>()?;
        Ok(Property::nested(self.resolver.resolve(raw.name)?, children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ConditionKind;
    use crate::config::CriteriaConfig;
    use crate::prefix::PrefixTable;

    const PREFIXES: &str = "dcterms=<http://purl.org/dc/terms/>,foaf=<http://xmlns.com/foaf/0.1/>,\
        oslc_qm=<http://open-services.net/ns/qm#>,oslc_rm=<http://open-services.net/ns/rm#>,\
        oslc_cm=<http://open-services.net/ns/cm#>,\
        contact_plm=<https://contact-software.com/ontologies/v1.0/plm#>,\
        xsd=<http://www.w3.org/2001/XMLSchema#>";

    const CM: &str = "http://open-services.net/ns/cm#";
    const DEFAULT_NS: &str = "http://example.org/default#";

    fn where_clause(input: &str) -> OslcResult<Vec<Condition>> {
        where_clause_nested(input, 32)
    }

    fn where_clause_nested(input: &str, max_nesting: usize) -> OslcResult<Vec<Condition>> {
        let prefixes = PrefixTable::parse(PREFIXES).unwrap();
        let config = CriteriaConfig::new(DEFAULT_NS);
        parse_where(input, &QualifiedNameResolver::new(&prefixes, &config), max_nesting)
    }

    fn select(input: &str) -> OslcResult<Vec<Property>> {
        select_nested(input, 32)
    }

    fn select_nested(input: &str, max_nesting: usize) -> OslcResult<Vec<Property>> {
        let prefixes = PrefixTable::parse(PREFIXES).unwrap();
        let config = CriteriaConfig::new(DEFAULT_NS);
        parse_select(input, &QualifiedNameResolver::new(&prefixes, &config), max_nesting)
    }

    // ========================================================================
    // oslc.where
    // ========================================================================

    mod where_terms {
        use super::*;

        #[test]
        fn test_empty_clause() {
            assert!(where_clause("").unwrap().is_empty());
            assert!(where_clause("  ").unwrap().is_empty());
        }

        #[test]
        fn test_order_preserved() {
            let conditions = where_clause("p1=\"v\" and p2=\"w\"").unwrap();
            assert_eq!(
                conditions,
                vec![
                    Condition::compare(
                        format!("{}p1", DEFAULT_NS),
                        ComparisonOperator::Equal,
                        TypedValue::string("v")
                    ),
                    Condition::compare(
                        format!("{}p2", DEFAULT_NS),
                        ComparisonOperator::Equal,
                        TypedValue::string("w")
                    ),
                ]
            );
        }

        #[test]
        fn test_all_operators() {
            let cases = [
                ("oslc_cm:n=1", ComparisonOperator::Equal),
                ("oslc_cm:n!=1", ComparisonOperator::NotEqual),
                ("oslc_cm:n<1", ComparisonOperator::LessThan),
                ("oslc_cm:n>1", ComparisonOperator::GreaterThan),
                ("oslc_cm:n<=1", ComparisonOperator::LessThanOrEqual),
                ("oslc_cm:n>=1", ComparisonOperator::GreaterThanOrEqual),
            ];
            for (input, expected) in cases {
                let conditions = where_clause(input).unwrap();
                assert_eq!(conditions[0].operator(), Some(expected), "{}", input);
                assert_eq!(conditions[0].values(), &[TypedValue::integer(1)][..]);
            }
        }

        #[test]
        fn test_less_than_iri_is_not_less_or_equal() {
            let conditions = where_clause("oslc_qm:testcase<<http://example.com/tests/1>").unwrap();
            assert_eq!(conditions[0].operator(), Some(ComparisonOperator::LessThan));
            assert_eq!(
                conditions[0].values(),
                &[TypedValue::iri("http://example.com/tests/1")][..]
            );
        }

        #[test]
        fn test_in_list() {
            let conditions = where_clause("oslc_cm:severity in [\"high\",\"medium\"]").unwrap();
            assert_eq!(
                conditions,
                vec![Condition::in_list(
                    format!("{}severity", CM),
                    vec![TypedValue::string("high"), TypedValue::string("medium")]
                )]
            );
        }

        #[test]
        fn test_in_list_with_spaces() {
            let conditions = where_clause("oslc_cm:severity in[ \"high\" , \"low\" ]").unwrap();
            assert_eq!(conditions[0].values().len(), 2);
        }

        #[test]
        fn test_scoped_term() {
            let conditions =
                where_clause("oslc_rm:discipline{contact_plm:text=\"General\"}").unwrap();
            assert_eq!(conditions.len(), 1);
            let scoped = &conditions[0];
            assert_eq!(scoped.iri, "http://open-services.net/ns/rm#discipline");
            assert!(scoped.is_scoped());
            assert_eq!(scoped.children().len(), 1);

            let child = &scoped.children()[0];
            assert_eq!(child.iri, "https://contact-software.com/ontologies/v1.0/plm#text");
            assert_eq!(child.operator(), Some(ComparisonOperator::Equal));
            assert_eq!(child.values(), &[TypedValue::string("General")][..]);
        }

        #[test]
        fn test_and_inside_scope_belongs_to_inner_term() {
            let conditions = where_clause(
                "dcterms:creator{foaf:givenName=\"Bob\" and foaf:familyName=\"Smith\"} and oslc_cm:n=1",
            )
            .unwrap();
            assert_eq!(conditions.len(), 2);
            assert_eq!(conditions[0].children().len(), 2);
            assert_eq!(conditions[1].iri, format!("{}n", CM));
        }

        #[test]
        fn test_nested_scopes_two_levels() {
            let conditions = where_clause(
                "dcterms:creator{foaf:account{foaf:accountName=\"bob\" and foaf:accountServiceHomepage=<http://x/>} \
                 and foaf:givenName=\"Bob\"} and dcterms:title=\"t\"",
            )
            .unwrap();
            assert_eq!(conditions.len(), 2);

            let creator = &conditions[0];
            assert_eq!(creator.children().len(), 2);
            let account = &creator.children()[0];
            assert!(account.is_scoped());
            assert_eq!(account.children().len(), 2);
            assert_eq!(creator.children()[1].iri, "http://xmlns.com/foaf/0.1/givenName");
            assert_eq!(conditions[1].iri, "http://purl.org/dc/terms/title");
        }

        #[test]
        fn test_and_inside_string_is_not_a_separator() {
            let conditions = where_clause("dcterms:title=\"salt and pepper\" and oslc_cm:n=1").unwrap();
            assert_eq!(conditions.len(), 2);
            assert_eq!(conditions[0].values()[0].as_text(), Some("salt and pepper"));
        }

        #[test]
        fn test_braces_inside_string_do_not_open_scope() {
            let conditions = where_clause("dcterms:title=\"{x} and }\"").unwrap();
            assert_eq!(conditions.len(), 1);
            assert_eq!(conditions[0].values()[0].as_text(), Some("{x} and }"));
        }

        #[test]
        fn test_full_mixed_clause() {
            let conditions = where_clause(
                "oslc_cm:quality_top-level.in in [\"high-top.quality\",\"medium-low.quality\"] and \
                 oslc_cm:severity in [\"high\",\"medium\"] and oslc_cm:polarity=true and \
                 oslc_cm:weight=-20.22e3 and oslc_cm:title=\"machine\" and \
                 oslc_rm:discipline{contact_plm:text=\"General\"} and \
                 dcterms:creator{foaf:firstName=\"Esser, Rebekka\"} and \
                 oslc_qm:testcase=<http://example.com/tests/31459> and \
                 oslc_qm:name=\"cat\"@en-us and oslc_qm:age=\"42\"^^xsd:integer",
            )
            .unwrap();

            assert_eq!(conditions.len(), 10);
            assert_eq!(conditions[0].iri, format!("{}quality_top-level.in", CM));
            assert_eq!(conditions[2].values(), &[TypedValue::Boolean(true)][..]);
            assert_eq!(conditions[3].values(), &[TypedValue::decimal(-20220.0)][..]);
            assert!(conditions[5].is_scoped());
            assert_eq!(
                conditions[6].children()[0].values()[0].as_text(),
                Some("Esser, Rebekka")
            );
            assert_eq!(
                conditions[7].values(),
                &[TypedValue::iri("http://example.com/tests/31459")][..]
            );
            assert_eq!(
                conditions[9].values()[0],
                TypedValue::String {
                    text: "42".to_string(),
                    language: None,
                    datatype: Some("http://www.w3.org/2001/XMLSchema#integer".to_string()),
                }
            );
        }

        #[test]
        fn test_wildcard_identifier() {
            let conditions = where_clause("*=true").unwrap();
            assert_eq!(conditions[0].iri, "*");
        }

        #[test]
        fn test_condition_kind_shapes() {
            let conditions = where_clause("dcterms:creator{foaf:name=\"x\"} and oslc_cm:n=1").unwrap();
            assert!(matches!(conditions[0].kind, ConditionKind::Scoped(ref c) if c.len() == 1));
            assert!(matches!(
                conditions[1].kind,
                ConditionKind::Leaf { operator: ComparisonOperator::Equal, ref values } if values.len() == 1
            ));
        }
    }

    mod where_errors {
        use super::*;

        fn assert_malformed(input: &str) {
            match where_clause(input) {
                Err(OslcError::MalformedWhereClause { .. }) => {}
                other => panic!("expected MalformedWhereClause for {:?}, got {:?}", input, other),
            }
        }

        #[test]
        fn test_double_equals() {
            assert_malformed("p1==");
        }

        #[test]
        fn test_malformed_shapes() {
            for input in [
                "oslc_cm:n",
                "oslc_cm:n=",
                "oslc_cm:n=machine",
                "oslc_cm:n=1 and",
                "oslc_cm:n=1 or oslc_cm:m=2",
                "oslc_cm:n=1 oslc_cm:m=2",
                "oslc_cm:s in []",
                "oslc_cm:s in [\"a\"",
                "oslc_cm:s in [\"a\",]",
                "dcterms:creator{}",
                "dcterms:creator{foaf:name=\"x\"",
                "dcterms:creator{foaf:name=\"x\"}}",
                "=1",
            ] {
                assert_malformed(input);
            }
        }

        #[test]
        fn test_error_position_points_into_scope() {
            let input = "dcterms:creator{foaf:name=oops}";
            match where_clause(input) {
                Err(OslcError::MalformedWhereClause { position, .. }) => {
                    assert_eq!(position, input.find("oops").unwrap());
                }
                other => panic!("unexpected {:?}", other),
            }
        }

        #[test]
        fn test_out_of_range_integer_reports_position() {
            let input = "oslc_cm:n=1 and oslc_cm:m=99999999999999999999";
            match where_clause(input) {
                Err(OslcError::MalformedWhereClause { position, message }) => {
                    assert_eq!(position, input.find("9999").unwrap());
                    assert!(message.contains("out of range"), "{}", message);
                }
                other => panic!("unexpected {:?}", other),
            }
        }

        #[test]
        fn test_infinite_decimal_is_rejected() {
            match where_clause("a:b=1e999") {
                Err(OslcError::MalformedWhereClause { position, message }) => {
                    assert_eq!(position, 4);
                    assert!(message.contains("out of range"), "{}", message);
                }
                other => panic!("unexpected {:?}", other),
            }
        }

        #[test]
        fn test_nesting_limit() {
            let input = "a:b{a:b{a:b{a:c=1}}}";
            assert!(where_clause_nested(input, 3).is_ok());
            match where_clause_nested(input, 2) {
                Err(OslcError::MalformedWhereClause { message, .. }) => {
                    assert!(message.contains("nested"), "{}", message);
                }
                other => panic!("unexpected {:?}", other),
            }
        }

        #[test]
        fn test_deep_nesting_does_not_overflow() {
            let input = format!("{}a:c=1{}", "a:b{".repeat(10_000), "}".repeat(10_000));
            assert!(where_clause(&input).is_err());
        }
    }

    // ========================================================================
    // oslc.select
    // ========================================================================

    mod select_properties {
        use super::*;

        #[test]
        fn test_empty_clause() {
            assert!(select("").unwrap().is_empty());
        }

        #[test]
        fn test_leaf_and_nested() {
            let properties = select("dcterms:created,dcterms:creator{foaf:firstName}").unwrap();
            assert_eq!(
                properties,
                vec![
                    Property::new("http://purl.org/dc/terms/created"),
                    Property::nested(
                        "http://purl.org/dc/terms/creator",
                        vec![Property::new("http://xmlns.com/foaf/0.1/firstName")]
                    ),
                ]
            );
        }

        #[test]
        fn test_comma_inside_scope_belongs_to_inner_list() {
            let properties = select(
                "dcterms:creator{foaf:firstName,foaf:account{foaf:accountName,foaf:accountServiceHomepage}},dcterms:title",
            )
            .unwrap();
            assert_eq!(properties.len(), 2);
            let creator = &properties[0];
            assert_eq!(creator.children.len(), 2);
            assert_eq!(creator.children[1].children.len(), 2);
            assert_eq!(properties[1].iri, "http://purl.org/dc/terms/title");
        }

        #[test]
        fn test_wildcards() {
            let properties = select("*,dcterms:creator{*}").unwrap();
            assert!(properties[0].is_wildcard());
            assert!(properties[1].children[0].is_wildcard());
        }

        #[test]
        fn test_spaces_after_commas() {
            let properties = select("dcterms:title, dcterms:creator { foaf:name }").unwrap();
            assert_eq!(properties.len(), 2);
            assert_eq!(properties[1].children.len(), 1);
        }

        #[test]
        fn test_malformed_selects() {
            for input in ["a{", "dcterms:creator{}", "dcterms:title,", ",dcterms:title", "dcterms:title}", "dcterms:title=1"] {
                match select(input) {
                    Err(OslcError::MalformedSelectClause { .. }) => {}
                    other => panic!("expected MalformedSelectClause for {:?}, got {:?}", input, other),
                }
            }
        }

        #[test]
        fn test_nesting_limit() {
            assert!(select_nested("a:b{a:c{a:d}}", 2).is_ok());
            assert!(matches!(
                select_nested("a:b{a:c{a:d}}", 1),
                Err(OslcError::MalformedSelectClause { .. })
            ));
        }
    }
}
