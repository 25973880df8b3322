/*!
An AST for textual sum type declarations and value expressions
*/
use super::parse_ident;
use crate::prettyprinter::tokens::*;
use crate::typing::Ty;
use crate::{debug_from_display, quick_display};
use itertools::Itertools;
use num::BigInt;
use smallvec::SmallVec;
use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

/// An identifier
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ident<'a>(pub(super) &'a str);

impl<'a> TryFrom<&'a str> for Ident<'a> {
    type Error = ();
    fn try_from(s: &'a str) -> Result<Ident<'a>, ()> {
        match parse_ident(s) {
            Ok(("", s)) => Ok(s),
            _ => Err(()),
        }
    }
}

quick_display!(Ident<'_>, id, fmt => Display::fmt(id.0, fmt));
debug_from_display!(Ident<'_>);

impl<'a> Ident<'a> {
    /// Get the string underlying this identifier
    #[inline]
    pub fn get_str(&self) -> &'a str {
        self.0
    }
}

impl<'a> Deref for Ident<'a> {
    type Target = str;
    #[inline]
    fn deref(&self) -> &str {
        self.0
    }
}

/// The size of a small path
pub const SMALL_PATH: usize = 2;

/// A small vector of identifiers
pub type IdentVec<'a> = SmallVec<[Ident<'a>; SMALL_PATH]>;

/// A non-empty path of identifiers separated by periods, e.g. `Shape.Circle`
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Path<'a>(pub IdentVec<'a>);

quick_display!(Path<'_>, p, fmt => write!(fmt, "{}", p.0.iter().format(PATH_SEP)));
debug_from_display!(Path<'_>);

impl<'a> Deref for Path<'a> {
    type Target = IdentVec<'a>;
    #[inline]
    fn deref(&self) -> &IdentVec<'a> {
        &self.0
    }
}

/// A type expression
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum TypeExpr<'a> {
    /// A builtin type
    Builtin(Ty),
    /// A path to a sum type or variant type
    Path(Path<'a>),
}

impl Display for TypeExpr<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            TypeExpr::Builtin(ty) => Display::fmt(ty, fmt),
            TypeExpr::Path(path) => Display::fmt(path, fmt),
        }
    }
}

debug_from_display!(TypeExpr<'_>);

/// The declared payload types of a field
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum FieldTypes<'a> {
    /// A parenthesized tuple of types
    Tuple(Vec<TypeExpr<'a>>),
    /// A single type not wrapped in a tuple
    Bare(TypeExpr<'a>),
}

impl Display for FieldTypes<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            FieldTypes::Tuple(types) => write!(
                fmt,
                "{}{}{}",
                TUPLE_OPEN,
                types.iter().format(ARG_SEP),
                TUPLE_CLOSE
            ),
            FieldTypes::Bare(ty) => Display::fmt(ty, fmt),
        }
    }
}

debug_from_display!(FieldTypes<'_>);

/// A field of a sum type declaration
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct FieldDecl<'a> {
    /// The name of the field
    pub name: Ident<'a>,
    /// The payload types of the field
    pub types: FieldTypes<'a>,
}

quick_display!(FieldDecl<'_>, f, fmt => write!(fmt, "{}{} {}", f.name, JUDGE_TYPE, f.types));
debug_from_display!(FieldDecl<'_>);

/// A sum type declaration
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct AdtDecl<'a> {
    /// The name of the sum type
    pub name: Ident<'a>,
    /// The fields of the sum type, in declaration order
    pub fields: Vec<FieldDecl<'a>>,
}

impl Display for AdtDecl<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{} {} {}", KEYWORD_ADT, self.name, SCOPE_OPEN)?;
        if !self.fields.is_empty() {
            write!(fmt, " {} ", self.fields.iter().format(FIELD_SEP))?;
        }
        write!(fmt, "{}", SCOPE_CLOSE)
    }
}

debug_from_display!(AdtDecl<'_>);

/// A literal value
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum Literal<'a> {
    /// The null value
    None,
    /// A boolean
    Bool(bool),
    /// An integer
    Int(BigInt),
    /// A float, as written
    Float(&'a str),
    /// A string, with escapes resolved
    Str(String),
}

impl Display for Literal<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Literal::None => write!(fmt, "{}", KEYWORD_NONE),
            Literal::Bool(true) => write!(fmt, "{}", KEYWORD_TRUE),
            Literal::Bool(false) => write!(fmt, "{}", KEYWORD_FALSE),
            Literal::Int(i) => write!(fmt, "{}", i),
            Literal::Float(f) => write!(fmt, "{}", f),
            Literal::Str(s) => write!(fmt, "{:?}", s),
        }
    }
}

debug_from_display!(Literal<'_>);

/// A binary operator
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinOp {
    /// Structural equality
    Eq,
    /// Structural inequality
    Ne,
    /// Membership in a sum type, or instance-of for any other type
    In,
}

quick_display!(BinOp, op, fmt => write!(fmt, "{}", match op {
    BinOp::Eq => OP_EQ,
    BinOp::Ne => OP_NE,
    BinOp::In => KEYWORD_IN,
}));

/// A value expression
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum Expr<'a> {
    /// A literal
    Literal(Literal<'a>),
    /// A builtin type
    Builtin(Ty),
    /// A path to a symbol or one of its members
    Path(Path<'a>),
    /// A call of a function or variant type
    Call {
        /// The value being called
        callee: Box<Expr<'a>>,
        /// The positional arguments
        args: Vec<Expr<'a>>,
    },
    /// Indexing into an instance's payload
    Index {
        /// The value being indexed
        base: Box<Expr<'a>>,
        /// The index
        ix: usize,
    },
    /// A binary operation
    Binary {
        /// The operator
        op: BinOp,
        /// The left operand
        lhs: Box<Expr<'a>>,
        /// The right operand
        rhs: Box<Expr<'a>>,
    },
}

impl Display for Expr<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Expr::Literal(l) => Display::fmt(l, fmt),
            Expr::Builtin(ty) => Display::fmt(ty, fmt),
            Expr::Path(p) => Display::fmt(p, fmt),
            Expr::Call { callee, args } => write!(
                fmt,
                "{}{}{}{}",
                callee,
                TUPLE_OPEN,
                args.iter().format(ARG_SEP),
                TUPLE_CLOSE
            ),
            Expr::Index { base, ix } => write!(fmt, "{}{}{}{}", base, INDEX_OPEN, ix, INDEX_CLOSE),
            Expr::Binary { op, lhs, rhs } => write!(fmt, "{} {} {}", lhs, op, rhs),
        }
    }
}

debug_from_display!(Expr<'_>);

/// A let-statement
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Let<'a> {
    /// The variable being bound
    pub var: Ident<'a>,
    /// The value being bound to the variable
    pub rhs: Expr<'a>,
}

quick_display!(Let<'_>, l, fmt => write!(
    fmt, "{} {} {} {}{}", KEYWORD_LET, l.var, ASSIGN, l.rhs, STATEMENT_DELIM
));
debug_from_display!(Let<'_>);

/// A statement
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum Statement<'a> {
    /// A sum type declaration
    Adt(AdtDecl<'a>),
    /// A let-statement
    Let(Let<'a>),
    /// A standalone expression
    Expr(Expr<'a>),
}

impl Display for Statement<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Statement::Adt(a) => Display::fmt(a, fmt),
            Statement::Let(l) => Display::fmt(l, fmt),
            Statement::Expr(e) => Display::fmt(e, fmt),
        }
    }
}

debug_from_display!(Statement<'_>);
