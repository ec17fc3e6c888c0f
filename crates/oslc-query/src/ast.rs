//! Syntax tree types produced by the `oslc.where` and `oslc.select` parsers.
//!
//! Every name in the tree is already expanded to an absolute IRI. The
//! `Display` implementations render that expanded form (IRIs in angle
//! brackets), which is meant for diagnostics rather than for sending back to
//! a server.

// =============================================================================
// Operators
// =============================================================================

/// Operators allowed in a leaf term of `oslc.where`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComparisonOperator {
    /// Equal: `=`
    Equal,
    /// Not equal: `!=`
    NotEqual,
    /// Less than: `<`
    LessThan,
    /// Less than or equal: `<=`
    LessThanOrEqual,
    /// Greater than: `>`
    GreaterThan,
    /// Greater than or equal: `>=`
    GreaterThanOrEqual,
    /// Membership in a value list: `in [...]`
    In,
}

impl ComparisonOperator {
    /// The operator as written in a query.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "!=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::In => "in",
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Values
// =============================================================================

/// Numeric literal: integer when written without `.` or exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    /// Integer value: `42`, `-7`
    Integer(i64),
    /// Decimal value: `3.14`, `-20.22e3`
    Decimal(f64),
}

impl Number {
    /// The value widened to `f64`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(n) => n as f64,
            Number::Decimal(n) => n,
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{}", n),
            Number::Decimal(n) => write!(f, "{:?}", n),
        }
    }
}

/// A typed literal from a comparison or an `in` list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypedValue {
    /// IRI reference: `<http://example.com/tests/31459>`
    Iri(String),
    /// Boolean literal: `true` or `false`
    Boolean(bool),
    /// Numeric literal.
    Number(Number),
    /// String literal, optionally tagged with a language or a datatype.
    ///
    /// `"cat"@en-us` sets `language`; `"42"^^xsd:integer` sets `datatype` to
    /// the expanded datatype IRI. The two are never both set.
    String {
        /// Unescaped text.
        text: String,
        /// Language tag without the leading `@`.
        language: Option<String>,
        /// Expanded datatype IRI.
        datatype: Option<String>,
    },
}

impl TypedValue {
    /// Creates a plain string value.
    pub fn string(text: impl Into<String>) -> Self {
        TypedValue::String {
            text: text.into(),
            language: None,
            datatype: None,
        }
    }

    /// Creates an integer value.
    pub fn integer(n: i64) -> Self {
        TypedValue::Number(Number::Integer(n))
    }

    /// Creates a decimal value.
    pub fn decimal(n: f64) -> Self {
        TypedValue::Number(Number::Decimal(n))
    }

    /// Creates an IRI value.
    pub fn iri(iri: impl Into<String>) -> Self {
        TypedValue::Iri(iri.into())
    }

    /// Returns the text of a string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TypedValue::String { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypedValue::Iri(iri) => write!(f, "<{}>", iri),
            TypedValue::Boolean(b) => write!(f, "{}", b),
            TypedValue::Number(n) => write!(f, "{}", n),
            TypedValue::String {
                text,
                language,
                datatype,
            } => {
                f.write_str("\"")?;
                for c in text.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)?;
                }
                if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Projection tree (oslc.select)
// =============================================================================

/// One projected attribute path from `oslc.select`.
///
/// Example: `dcterms:creator{foaf:firstName}` is a property with one child.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    /// Expanded IRI of the attribute, or `*`.
    pub iri: String,
    /// Nested projections; empty for a leaf.
    pub children: Vec<Property>,
}

impl Property {
    /// Creates a leaf projection.
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            children: Vec::new(),
        }
    }

    /// Creates a nested projection.
    pub fn nested(iri: impl Into<String>, children: Vec<Property>) -> Self {
        Self {
            iri: iri.into(),
            children,
        }
    }

    /// Returns true if this projection selects nested attributes.
    pub fn is_scoped(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true for the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.iri == "*"
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.iri);
        for child in &self.children {
            child.flatten_into(out);
        }
    }
}

/// Flattens a projection tree in pre-order: each property's IRI followed by
/// the flattened IRIs of its children, left to right.
pub fn flatten_properties(properties: &[Property]) -> Vec<&str> {
    let mut out = Vec::new();
    for property in properties {
        property.flatten_into(&mut out);
    }
    out
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wildcard() {
            f.write_str("*")?;
        } else {
            write!(f, "<{}>", self.iri)?;
        }
        if !self.children.is_empty() {
            f.write_str("{")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{}", child)?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Filter tree (oslc.where)
// =============================================================================

/// The two shapes a [`Condition`] can take.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionKind {
    /// Nested conjunction applied through the relation named by the
    /// condition's IRI: `dcterms:creator{foaf:firstName="Bob"}`.
    ///
    /// Never empty when produced by the parser.
    Scoped(Vec<Condition>),
    /// Comparison against literal values. `values` holds exactly one element
    /// unless `operator` is [`ComparisonOperator::In`].
    Leaf {
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Right-hand side values in query order.
        values: Vec<TypedValue>,
    },
}

/// One term of an `oslc.where` conjunction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    /// Expanded IRI of the attribute, or `*`.
    pub iri: String,
    /// Scoped or leaf shape.
    pub kind: ConditionKind,
}

impl Condition {
    /// Creates a leaf comparison with a single value.
    pub fn compare(iri: impl Into<String>, operator: ComparisonOperator, value: TypedValue) -> Self {
        Self {
            iri: iri.into(),
            kind: ConditionKind::Leaf {
                operator,
                values: vec![value],
            },
        }
    }

    /// Creates an `in` leaf.
    pub fn in_list(iri: impl Into<String>, values: Vec<TypedValue>) -> Self {
        Self {
            iri: iri.into(),
            kind: ConditionKind::Leaf {
                operator: ComparisonOperator::In,
                values,
            },
        }
    }

    /// Creates a scoped condition.
    pub fn scoped(iri: impl Into<String>, children: Vec<Condition>) -> Self {
        Self {
            iri: iri.into(),
            kind: ConditionKind::Scoped(children),
        }
    }

    /// Returns true for a nested conjunction.
    pub fn is_scoped(&self) -> bool {
        matches!(self.kind, ConditionKind::Scoped(_))
    }

    /// Nested conditions; empty for a leaf.
    pub fn children(&self) -> &[Condition] {
        match &self.kind {
            ConditionKind::Scoped(children) => children,
            ConditionKind::Leaf { .. } => &[],
        }
    }

    /// The operator of a leaf.
    pub fn operator(&self) -> Option<ComparisonOperator> {
        match &self.kind {
            ConditionKind::Leaf { operator, .. } => Some(*operator),
            ConditionKind::Scoped(_) => None,
        }
    }

    /// The values of a leaf; empty for a scoped condition.
    pub fn values(&self) -> &[TypedValue] {
        match &self.kind {
            ConditionKind::Leaf { values, .. } => values,
            ConditionKind::Scoped(_) => &[],
        }
    }

    /// The attribute paths this condition reads, as a projection tree.
    pub fn to_property(&self) -> Property {
        Property {
            iri: self.iri.clone(),
            children: self.children().iter().map(Condition::to_property).collect(),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.iri == "*" {
            f.write_str("*")?;
        } else {
            write!(f, "<{}>", self.iri)?;
        }
        match &self.kind {
            ConditionKind::Scoped(children) => {
                f.write_str("{")?;
                write_conjunction(f, children)?;
                f.write_str("}")
            }
            ConditionKind::Leaf {
                operator: ComparisonOperator::In,
                values,
            } => {
                f.write_str(" in [")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", value)?;
                }
                f.write_str("]")
            }
            ConditionKind::Leaf { operator, values } => {
                write!(f, "{}", operator)?;
                match values.first() {
                    Some(value) => write!(f, "{}", value),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Writes conditions joined with ` and `.
pub(crate) fn write_conjunction(
    f: &mut std::fmt::Formatter<'_>,
    conditions: &[Condition],
) -> std::fmt::Result {
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            f.write_str(" and ")?;
        }
        write!(f, "{}", condition)?;
    }
    Ok(())
}
