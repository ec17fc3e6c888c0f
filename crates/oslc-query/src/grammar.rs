//! Token-level grammar shared by the `oslc.prefix`, `oslc.where` and
//! `oslc.select` parsers.
//!
//! Each production of the OSLC query syntax is one nom parser, so the rules
//! can be combined and tested independently:
//!
//! ```text
//! DECIMAL       := ['+'|'-'] DIGIT+ ['.' DIGIT+] [('e'|'E') ['+'|'-'] DIGIT+]
//! STRING        := '"' <any-char-except-unescaped-quote>* '"'
//! LANGTAG       := '@' LETTER ('-'? (LETTER|DIGIT))*
//! PN_PREFIX     := LETTER ('.'? (LETTER|DIGIT|'_'|'-'))*
//! PREFIXED_NAME := PN_PREFIX ':' LOCAL_NAME
//! LOCAL_NAME    := (LETTER|DIGIT|'_') ('.'? (LETTER|DIGIT|'_'|'-'))*
//! IDENTIFIER    := '*' | PREFIXED_NAME | LOCAL_NAME
//! OPERATOR      := '!=' | '<=' | '>=' | '=' | '<' | '>'
//! IRI_REF       := '<' <any-char-except '<>"{}|`\'>+ '>'
//! VALUE         := IRI_REF | 'true' | 'false' | DECIMAL
//!                | STRING (LANGTAG | '^^' PREFIXED_NAME)?
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, one_of, satisfy},
    combinator::{map, opt, recognize, value},
    error::ErrorKind,
    multi::many0_count,
    sequence::{delimited, pair, preceded, tuple},
    IResult, Offset,
};

use crate::ast::ComparisonOperator;
use crate::error::{Clause, OslcError};

// ============================================================================
// Character classes
// ============================================================================

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_letter_or_digit(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_iri_char(c: char) -> bool {
    !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '`' | '\\')
}

/// `('.'? NAME_CHAR)*`: dots are allowed between name characters only.
fn dotted_tail(input: &str) -> IResult<&str, usize> {
    many0_count(pair(opt(char('.')), satisfy(is_name_char)))(input)
}

// ============================================================================
// Names
// ============================================================================

/// `PN_PREFIX`: the prefix part of a qualified name.
pub(crate) fn pn_prefix(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_letter), dotted_tail))(input)
}

/// `LOCAL_NAME`: the part after the colon, also accepted on its own.
pub(crate) fn local_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_name_start), dotted_tail))(input)
}

/// `PREFIXED_NAME`: `prefix:local`.
pub(crate) fn prefixed_name(input: &str) -> IResult<&str, &str> {
    recognize(tuple((pn_prefix, char(':'), local_name)))(input)
}

/// `IDENTIFIER`: wildcard, prefixed name or bare local name.
pub(crate) fn identifier(input: &str) -> IResult<&str, &str> {
    alt((tag("*"), prefixed_name, local_name))(input)
}

/// `IRI_REF`: returns the IRI without angle brackets.
pub(crate) fn iri_ref(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_while1(is_iri_char), char('>'))(input)
}

// ============================================================================
// Operators
// ============================================================================

/// `OPERATOR`: two-character forms are tried first so `<=` never lexes as `<`.
pub(crate) fn operator(input: &str) -> IResult<&str, ComparisonOperator> {
    alt((
        value(ComparisonOperator::NotEqual, tag("!=")),
        value(ComparisonOperator::LessThanOrEqual, tag("<=")),
        value(ComparisonOperator::GreaterThanOrEqual, tag(">=")),
        value(ComparisonOperator::Equal, char('=')),
        value(ComparisonOperator::LessThan, char('<')),
        value(ComparisonOperator::GreaterThan, char('>')),
    ))(input)
}

// ============================================================================
// Literals
// ============================================================================

/// `DECIMAL`: returns the lexical form.
pub(crate) fn decimal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        digit1,
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}

/// `STRING`: returns the unescaped text between the quotes.
///
/// `\"`, `\\`, `\n`, `\t` and `\r` are recognised; any other escaped
/// character stands for itself.
pub(crate) fn string_literal(input: &str) -> IResult<&str, String> {
    let (rest, _) = char('"')(input)?;
    let mut text = String::new();
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&rest[i + 1..], text)),
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, 'r')) => text.push('\r'),
                Some((_, other)) => text.push(other),
                None => break,
            },
            c => text.push(c),
        }
    }

    // Unterminated literal
    Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Char)))
}

/// `LANGTAG`: returns the tag without the leading `@`.
pub(crate) fn langtag(input: &str) -> IResult<&str, &str> {
    preceded(
        char('@'),
        recognize(pair(
            satisfy(is_letter),
            many0_count(pair(opt(char('-')), satisfy(is_letter_or_digit))),
        )),
    )(input)
}

/// A syntactically recognised `VALUE`, before datatype names are resolved.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ValueToken<'a> {
    Iri(&'a str),
    Boolean(bool),
    Number(&'a str),
    String {
        text: String,
        language: Option<&'a str>,
        /// Unresolved `prefix:local` datatype name.
        datatype: Option<&'a str>,
    },
}

#[derive(Debug, Clone)]
enum StringSuffix<'a> {
    Language(&'a str),
    Datatype(&'a str),
}

fn typed_string(input: &str) -> IResult<&str, ValueToken<'_>> {
    let (input, text) = string_literal(input)?;
    let (input, suffix) = opt(alt((
        map(langtag, StringSuffix::Language),
        map(preceded(tag("^^"), prefixed_name), StringSuffix::Datatype),
    )))(input)?;

    let (language, datatype) = match suffix {
        Some(StringSuffix::Language(lang)) => (Some(lang), None),
        Some(StringSuffix::Datatype(dt)) => (None, Some(dt)),
        None => (None, None),
    };

    Ok((
        input,
        ValueToken::String {
            text,
            language,
            datatype,
        },
    ))
}

/// `VALUE`: tried in the order IRI, boolean, number, string.
pub(crate) fn value_token(input: &str) -> IResult<&str, ValueToken<'_>> {
    alt((
        map(iri_ref, ValueToken::Iri),
        value(ValueToken::Boolean(true), tag("true")),
        value(ValueToken::Boolean(false), tag("false")),
        map(decimal, ValueToken::Number),
        typed_string,
    ))(input)
}

// ============================================================================
// Whitespace handling
// ============================================================================

/// Optional whitespace
pub(crate) fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

/// A comma with optional whitespace on either side.
pub(crate) fn comma(input: &str) -> IResult<&str, char> {
    delimited(ws, char(','), ws)(input)
}

// ============================================================================
// Error reporting
// ============================================================================

/// Converts a nom failure on `source` into the malformed-clause error for
/// `clause`, with the byte position of the offending input.
pub(crate) fn syntax_error(
    clause: Clause,
    source: &str,
    err: nom::Err<nom::error::Error<&str>>,
) -> OslcError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let position = source.offset(e.input);
            let message = match e.code {
                ErrorKind::TooLarge => "scopes nested too deeply".to_string(),
                _ if e.input.is_empty() => "unexpected end of input".to_string(),
                _ => format!("unexpected input at: '{}'", truncate(e.input, 20)),
            };
            OslcError::malformed(clause, position, message)
        }
        nom::Err::Incomplete(_) => {
            OslcError::malformed(clause, source.len(), "unexpected end of input")
        }
    }
}

/// Cuts `s` to at most `max_chars` characters.
pub(crate) fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
