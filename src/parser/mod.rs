/*!
A simple parser, and AST, for a textual representation of sum type declarations and values
*/
use crate::prettyprinter::tokens::*;
use crate::typing::Ty;
use nom::{
    branch::alt,
    bytes::complete::{is_a, is_not, tag, take_until},
    character::complete::{char, digit1, line_ending, not_line_ending, one_of},
    combinator::{map, map_res, not, opt, recognize, value},
    error::ErrorKind,
    multi::{many0, separated_list},
    sequence::{delimited, pair, preceded, terminated, tuple},
    Err, IResult,
};
use num::BigInt;
use smallvec::SmallVec;

pub mod ast;
use ast::*;
pub mod builder;

/**
Parse a single-line comment, returning the content as an `&str`.

Single-line comments begin with "//" and run until a line ending or the end of input.

# Example
```rust
use adt::parser::parse_single_comment;
assert_eq!(
    parse_single_comment("//This is a comment\nThis is not").unwrap(),
    ("This is not", "This is a comment")
);
assert_eq!(
    parse_single_comment("//This is a CRLF comment\r\nThis still isn't").unwrap(),
    ("This still isn't", "This is a CRLF comment")
);
assert_eq!(parse_single_comment("//Trailing").unwrap(), ("", "Trailing"));
assert!(parse_single_comment("This is not a comment").is_err());
```
*/
pub fn parse_single_comment(input: &str) -> IResult<&str, &str> {
    delimited(tag(SINGLE_COMMENT_START), not_line_ending, opt(line_ending))(input)
}

/**
Parse a multi-line comment, returning the content as an `&str`.

Multi-line comments begin with `/*`, end with `*/`, and may contain any character. Nested comments are
not supported.

# Example
```rust
use adt::parser::parse_multi_comment;
assert_eq!(
    parse_multi_comment("/*This is a multiline\ncomment*/\nThis is not").unwrap(),
    ("\nThis is not", "This is a multiline\ncomment")
);
assert!(parse_multi_comment(concat!("/", "*This is an unfinished comment")).is_err());
assert!(parse_multi_comment("This is not a comment").is_err());
```
*/
pub fn parse_multi_comment(input: &str) -> IResult<&str, &str> {
    delimited(
        tag(MULTI_COMMENT_OPEN),
        take_until(MULTI_COMMENT_CLOSE),
        tag(MULTI_COMMENT_CLOSE),
    )(input)
}

/**
Parse whitespace, including comments. Fails if there is none.

# Example
```rust
use adt::parser::ws;
assert_eq!(ws("   \t\n // a comment\n /* another */ Shape").unwrap(), ("Shape", ()));
assert_eq!(ws("   ").unwrap(), ("", ()));
assert!(ws("Shape").is_err());
assert!(ws("").is_err());
```
*/
pub fn ws(input: &str) -> IResult<&str, ()> {
    let (mut input, _) = alt((parse_single_comment, parse_multi_comment, is_a(WHITESPACE)))(input)?;
    loop {
        input = match alt((parse_single_comment, parse_multi_comment, is_a(WHITESPACE)))(input) {
            Ok((rest, _)) => rest,
            Err(Err::Incomplete(n)) => return Err(Err::Incomplete(n)),
            _ => return Ok((input, ())),
        }
    }
}

/// Parse optional whitespace, including comments
pub fn ows(input: &str) -> IResult<&str, ()> {
    map(opt(ws), |_| ())(input)
}

/// Parse a keyword, which must not run on into an identifier
fn keyword<'a>(kw: &'static str) -> impl Fn(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag(kw), not(parse_ident))
}

/**
Parse an identifier, which is composed of a string of non-special, non-whitespace characters.

# Example
```rust
use adt::parser::parse_ident;
assert_eq!(parse_ident("Shape.Circle").unwrap().1.get_str(), "Shape");
assert_eq!(parse_ident("Circle: (#float)").unwrap().0, ": (#float)");
assert_eq!(parse_ident("汉字(").unwrap().1.get_str(), "汉字");
assert!(parse_ident("").is_err());
assert!(parse_ident(" ").is_err());
assert!(parse_ident("#adt").is_err());
```
*/
pub fn parse_ident(input: &str) -> IResult<&str, Ident> {
    map(is_not(SPECIAL_CHARACTERS), Ident)(input)
}

/**
Parse a path, which is a non-empty sequence of identifiers separated by periods.

# Example
```rust
use adt::parser::parse_path;
let (rest, path) = parse_path("Shape.Circle(1.0)").unwrap();
assert_eq!(rest, "(1.0)");
assert_eq!(path.len(), 2);
assert_eq!(path.to_string(), "Shape.Circle");
// Trailing periods are not part of the path
assert_eq!(parse_path("Shape.").unwrap().0, ".");
assert!(parse_path(".Shape").is_err());
```
*/
pub fn parse_path(input: &str) -> IResult<&str, Path> {
    map(
        pair(parse_ident, many0(preceded(tag(PATH_SEP), parse_ident))),
        |(head, tail)| {
            let mut path = SmallVec::with_capacity(tail.len() + 1);
            path.push(head);
            path.extend(tail);
            Path(path)
        },
    )(input)
}

/**
Parse a boolean, i.e. `#true` or `#false`

# Example
```rust
use adt::parser::parse_bool;
assert_eq!(parse_bool("#true something_else"), Ok((" something_else", true)));
assert_eq!(parse_bool("#false;"), Ok((";", false)));
assert!(parse_bool("#truest").is_err());
```
*/
pub fn parse_bool(input: &str) -> IResult<&str, bool> {
    alt((
        value(true, keyword(KEYWORD_TRUE)),
        value(false, keyword(KEYWORD_FALSE)),
    ))(input)
}

/**
Parse a builtin type keyword

# Example
```rust
use adt::parser::parse_builtin_ty;
use adt::Ty;
assert_eq!(parse_builtin_ty("#int)"), Ok((")", Ty::Int)));
assert_eq!(parse_builtin_ty("#none"), Ok(("", Ty::None)));
assert!(parse_builtin_ty("#integer").is_err());
```
*/
pub fn parse_builtin_ty(input: &str) -> IResult<&str, Ty> {
    alt((
        value(Ty::Object, keyword(KEYWORD_OBJECT)),
        value(Ty::None, keyword(KEYWORD_NONE)),
        value(Ty::Bool, keyword(KEYWORD_BOOL)),
        value(Ty::Int, keyword(KEYWORD_INT)),
        value(Ty::Float, keyword(KEYWORD_FLOAT)),
        value(Ty::Str, keyword(KEYWORD_STR)),
        value(Ty::Type, keyword(KEYWORD_TYPE)),
        value(Ty::Func, keyword(KEYWORD_FUNC)),
    ))(input)
}

/// Parse a type expression: a builtin type or a path
pub fn parse_type_expr(input: &str) -> IResult<&str, TypeExpr> {
    alt((
        map(parse_builtin_ty, TypeExpr::Builtin),
        map(parse_path, TypeExpr::Path),
    ))(input)
}

/// Parse a parenthesized, comma separated list, allowing a trailing comma
fn parse_list<'a, O, F>(elem: F) -> impl Fn(&'a str) -> IResult<&'a str, Vec<O>>
where
    F: Fn(&'a str) -> IResult<&'a str, O>,
{
    delimited(
        pair(tag(TUPLE_OPEN), ows),
        separated_list(tuple((ows, tag(ARG_DELIM), ows)), elem),
        tuple((ows, opt(pair(tag(ARG_DELIM), ows)), tag(TUPLE_CLOSE))),
    )
}

/**
Parse the payload types of a field: a parenthesized tuple of types, or a bare type

# Example
```rust
use adt::parser::{parse_field_types, ast::FieldTypes};
let (_, types) = parse_field_types("(#int, #bool, #str, #none)").unwrap();
assert_eq!(types.to_string(), "(#int, #bool, #str, #none)");
assert_eq!(parse_field_types("()").unwrap().1, FieldTypes::Tuple(vec![]));
assert!(matches!(parse_field_types("#str").unwrap().1, FieldTypes::Bare(_)));
```
*/
pub fn parse_field_types(input: &str) -> IResult<&str, FieldTypes> {
    alt((
        map(parse_list(parse_type_expr), FieldTypes::Tuple),
        map(parse_type_expr, FieldTypes::Bare),
    ))(input)
}

/// Parse a field of a sum type declaration
pub fn parse_field(input: &str) -> IResult<&str, FieldDecl> {
    map(
        tuple((parse_ident, ows, tag(JUDGE_TYPE), ows, parse_field_types)),
        |(name, _, _, _, types)| FieldDecl { name, types },
    )(input)
}

/**
Parse a sum type declaration

# Example
```rust
use adt::parser::parse_adt;
let (rest, decl) = parse_adt("#adt Shape { Circle: (#float); Rect: (#float, #float); Empty: () }").unwrap();
assert_eq!(rest, "");
assert_eq!(decl.name.get_str(), "Shape");
assert_eq!(decl.fields.len(), 3);
assert_eq!(decl.to_string(), "#adt Shape { Circle: (#float); Rect: (#float, #float); Empty: () }");
```
*/
pub fn parse_adt(input: &str) -> IResult<&str, AdtDecl> {
    map(
        tuple((
            keyword(KEYWORD_ADT),
            ws,
            parse_ident,
            ows,
            tag(SCOPE_OPEN),
            ows,
            separated_list(tuple((ows, tag(FIELD_DELIM), ows)), parse_field),
            ows,
            opt(pair(tag(FIELD_DELIM), ows)),
            tag(SCOPE_CLOSE),
        )),
        |(_, _, name, _, _, _, fields, _, _, _)| AdtDecl { name, fields },
    )(input)
}

fn parse_exponent(input: &str) -> IResult<&str, &str> {
    recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))(input)
}

/**
Parse a float literal, which must have a fractional part or an exponent

# Example
```rust
use adt::parser::parse_float;
assert_eq!(parse_float("1.5)"), Ok((")", "1.5")));
assert_eq!(parse_float("-2e10"), Ok(("", "-2e10")));
assert!(parse_float("15").is_err());
```
*/
pub fn parse_float(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(char('-')),
        digit1,
        alt((
            recognize(tuple((char('.'), digit1, opt(parse_exponent)))),
            parse_exponent,
        )),
    )))(input)
}

/**
Parse an arbitrary precision integer literal

# Example
```rust
use adt::parser::parse_int;
use num::BigInt;
assert_eq!(parse_int("-15, 3"), Ok((", 3", BigInt::from(-15))));
assert!(parse_int("15abc").is_err());
```
*/
pub fn parse_int(input: &str) -> IResult<&str, BigInt> {
    map_res(
        terminated(recognize(pair(opt(char('-')), digit1)), not(parse_ident)),
        |digits: &str| digits.parse::<BigInt>(),
    )(input)
}

/**
Parse a string literal, resolving escapes

# Example
```rust
use adt::parser::parse_str;
assert_eq!(parse_str(r#""hi" rest"#), Ok((" rest", "hi".to_string())));
assert_eq!(parse_str(r#""say \"hi\"\n""#), Ok(("", "say \"hi\"\n".to_string())));
assert_eq!(parse_str(r#""del\u{7f}""#), Ok(("", "del\u{7f}".to_string())));
assert!(parse_str(r#""unterminated"#).is_err());
assert!(parse_str(r#""\u{110000}""#).is_err());
```
*/
pub fn parse_str(input: &str) -> IResult<&str, String> {
    let body = match input.strip_prefix('"') {
        Some(body) => body,
        None => return Err(Err::Error((input, ErrorKind::Char))),
    };
    let mut result = String::new();
    let mut chars = body.char_indices();
    while let Some((ix, c)) = chars.next() {
        match c {
            '"' => return Ok((&body[ix + 1..], result)),
            '\\' => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '0')) => result.push('\0'),
                Some((_, c @ '\\')) | Some((_, c @ '"')) | Some((_, c @ '\'')) => result.push(c),
                Some((_, 'u')) => match parse_unicode_escape(&mut chars) {
                    Some(c) => result.push(c),
                    None => return Err(Err::Error((input, ErrorKind::Escaped))),
                },
                _ => return Err(Err::Error((input, ErrorKind::Escaped))),
            },
            c => result.push(c),
        }
    }
    Err(Err::Error((input, ErrorKind::Char)))
}

/// Parse the `{..}` body of a `\u{..}` escape: one to six hex digits naming a scalar value
fn parse_unicode_escape(chars: &mut std::str::CharIndices) -> Option<char> {
    if chars.next()?.1 != '{' {
        return None;
    }
    let mut code = 0u32;
    let mut digits = 0;
    loop {
        match chars.next()?.1 {
            '}' if digits > 0 => return std::char::from_u32(code),
            c if digits < 6 => {
                code = code * 16 + c.to_digit(16)?;
                digits += 1;
            }
            _ => return None,
        }
    }
}

/// Parse a literal value
pub fn parse_literal(input: &str) -> IResult<&str, Literal> {
    alt((
        value(Literal::None, keyword(KEYWORD_NONE)),
        map(parse_bool, Literal::Bool),
        map(parse_float, Literal::Float),
        map(parse_int, Literal::Int),
        map(parse_str, Literal::Str),
    ))(input)
}

/// Parse an atomic expression: a literal, a builtin type, or a path
pub fn parse_atom(input: &str) -> IResult<&str, Expr> {
    alt((
        map(parse_literal, Expr::Literal),
        map(parse_builtin_ty, Expr::Builtin),
        map(parse_path, Expr::Path),
    ))(input)
}

/// A postfix operation
enum Suffix<'a> {
    Call(Vec<Expr<'a>>),
    Index(usize),
}

fn parse_suffix(input: &str) -> IResult<&str, Suffix> {
    alt((
        map(parse_list(parse_expr), Suffix::Call),
        map(
            delimited(
                pair(tag(INDEX_OPEN), ows),
                map_res(digit1, |digits: &str| digits.parse::<usize>()),
                pair(ows, tag(INDEX_CLOSE)),
            ),
            Suffix::Index,
        ),
    ))(input)
}

/// Parse an atomic expression followed by any number of calls and indices
pub fn parse_postfix(input: &str) -> IResult<&str, Expr> {
    map(pair(parse_atom, many0(parse_suffix)), |(atom, suffixes)| {
        suffixes
            .into_iter()
            .fold(atom, |base, suffix| match suffix {
                Suffix::Call(args) => Expr::Call {
                    callee: Box::new(base),
                    args,
                },
                Suffix::Index(ix) => Expr::Index {
                    base: Box::new(base),
                    ix,
                },
            })
    })(input)
}

/// Parse a binary operator
pub fn parse_binop(input: &str) -> IResult<&str, BinOp> {
    alt((
        value(BinOp::Eq, tag(OP_EQ)),
        value(BinOp::Ne, tag(OP_NE)),
        value(BinOp::In, keyword(KEYWORD_IN)),
    ))(input)
}

/**
Parse a value expression. Does *not* consume whitespace before the expression!

# Example
```rust
use adt::parser::parse_expr;
let (rest, expr) = parse_expr("Shape.Rect(1.0, 2.0)[1] == 2.0;").unwrap();
assert_eq!(rest, ";");
assert_eq!(expr.to_string(), "Shape.Rect(1.0, 2.0)[1] == 2.0");
let (_, member) = parse_expr("s #in Shape").unwrap();
assert_eq!(member.to_string(), "s #in Shape");
```
*/
pub fn parse_expr(input: &str) -> IResult<&str, Expr> {
    map(
        pair(
            parse_postfix,
            opt(pair(delimited(ows, parse_binop, ows), parse_postfix)),
        ),
        |(lhs, rhs)| match rhs {
            Some((op, rhs)) => Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            None => lhs,
        },
    )(input)
}

/// Parse a let-statement
pub fn parse_let(input: &str) -> IResult<&str, Let> {
    map(
        tuple((
            keyword(KEYWORD_LET),
            ws,
            parse_ident,
            ows,
            tag(ASSIGN),
            ows,
            parse_expr,
            ows,
            tag(STATEMENT_DELIM),
        )),
        |(_, _, var, _, _, _, rhs, _, _)| Let { var, rhs },
    )(input)
}

/// Parse an optional statement delimiter
fn opt_delim(input: &str) -> IResult<&str, ()> {
    map(opt(pair(ows, tag(STATEMENT_DELIM))), |_| ())(input)
}

/**
Parse a statement. Does *not* consume whitespace before the statement!

Declarations and expressions may be followed by a statement delimiter; `#let` statements must be.

# Example
```rust
use adt::parser::{parse_statement, ast::Statement};
let input = "#adt Unit { It: () } #let u = Unit.It(); u == Unit.It()";
let (rest, decl) = parse_statement(input).unwrap();
assert!(matches!(decl, Statement::Adt(_)));
let (rest, bind) = parse_statement(rest.trim_start()).unwrap();
assert_eq!(bind.to_string(), "#let u = Unit.It();");
let (rest, expr) = parse_statement(rest.trim_start()).unwrap();
assert_eq!(rest, "");
assert!(matches!(expr, Statement::Expr(_)));
```
*/
pub fn parse_statement(input: &str) -> IResult<&str, Statement> {
    alt((
        map(terminated(parse_adt, opt_delim), Statement::Adt),
        map(parse_let, Statement::Let),
        map(terminated(parse_expr, opt_delim), Statement::Expr),
    ))(input)
}
