/*!
A builder which evaluates parsed statements into sum types and values
*/
use super::ast::{AdtDecl, BinOp, Expr, FieldTypes, Let, Literal, Path, Statement, TypeExpr};
use super::{ows, parse_statement};
use crate::adt::{declare, FieldMethod, FieldSpec, Member, SumType, TypeList};
use crate::prelude::{OPTION, RESULT};
use crate::typing::{Ty, Typed};
use crate::value::Value;
use crate::Error;
use ahash::RandomState;
use indexmap::IndexMap;
use nom::error::ErrorKind;
use tracing::debug;

/// An error building a value from text
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// The input could not be parsed
    #[error("parse error: {0}")]
    Parse(String),
    /// A symbol was used without being defined
    #[error("undefined symbol {0:?}")]
    Undefined(String),
    /// A value has no member with the given name
    #[error("{base} has no member {name:?}")]
    NoMember {
        /// The value whose member was accessed
        base: String,
        /// The missing member
        name: String,
    },
    /// A value was used as a type but is not one
    #[error("{0} is not a type")]
    NotAType(String),
    /// A value which is not a variant instance was indexed
    #[error("cannot index into {0}")]
    NotIndexable(String),
    /// An index past the end of an instance's payload
    #[error("index {ix} is out of bounds for {value}, which has {len} element(s)")]
    IndexOutOfBounds {
        /// The instance indexed
        value: String,
        /// The index
        ix: usize,
        /// The length of the instance's payload
        len: usize,
    },
    /// Declaring, constructing or calling failed
    #[error(transparent)]
    Adt(#[from] Error),
}

impl<'a> From<nom::Err<(&'a str, ErrorKind)>> for BuildError {
    fn from(err: nom::Err<(&'a str, ErrorKind)>) -> BuildError {
        match err {
            nom::Err::Error((rest, kind)) | nom::Err::Failure((rest, kind)) => BuildError::Parse(
                format!("{:?} at {:?}", kind, rest.chars().take(16).collect::<String>()),
            ),
            nom::Err::Incomplete(_) => BuildError::Parse("incomplete input".into()),
        }
    }
}

/// A builder, holding the sum types and `#let` bindings defined so far
#[derive(Debug, Clone, Default)]
pub struct Builder {
    symbols: IndexMap<String, Value, RandomState>,
}

impl Builder {
    /// Create a new, empty builder
    pub fn new() -> Builder {
        Builder::default()
    }
    /// Create a new builder with the prelude sum types bound to their names
    pub fn with_prelude() -> Builder {
        let mut builder = Builder::new();
        for adt in [&*OPTION, &*RESULT].iter() {
            builder.define(adt.name(), (*adt).clone());
        }
        builder
    }
    /// Get the value bound to a symbol, if any
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }
    /// Get the sum type bound to a symbol, if any
    pub fn adt(&self, name: &str) -> Option<&SumType> {
        self.get(name).and_then(Member::as_adt)
    }
    /// Bind a value to a symbol, returning the previous binding, if any
    pub fn define<S: Into<String>, V: Into<Value>>(&mut self, name: S, value: V) -> Option<Value> {
        self.symbols.insert(name.into(), value.into())
    }
    /// Iterate over the symbols defined so far, in definition order
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.symbols.iter().map(|(name, value)| (name.as_str(), value))
    }
    /// Resolve a path to a value
    pub fn build_path(&self, path: &Path) -> Result<Value, BuildError> {
        let mut idents = path.iter();
        let head = match idents.next() {
            Some(head) => head,
            None => return Err(BuildError::Undefined(String::new())),
        };
        let mut result = self
            .get(head)
            .cloned()
            .ok_or_else(|| BuildError::Undefined(head.to_string()))?;
        for ident in idents {
            result = Self::member(&result, ident)?;
        }
        Ok(result)
    }
    /// Get a member of a value: a variant type of a sum type, or a field method of an instance
    fn member(base: &Value, name: &str) -> Result<Value, BuildError> {
        let member = match base {
            Value::Type(Ty::Sum(adt)) => adt.get(name).map(Value::from),
            Value::Instance(instance) => instance.method(name).map(Value::from),
            _ => None,
        };
        member.ok_or_else(|| BuildError::NoMember {
            base: base.to_string(),
            name: name.to_owned(),
        })
    }
    /// Build a type expression
    pub fn build_type(&self, ty: &TypeExpr) -> Result<Ty, BuildError> {
        match ty {
            TypeExpr::Builtin(ty) => Ok(ty.clone()),
            TypeExpr::Path(path) => match self.build_path(path)? {
                Value::Type(ty) => Ok(ty),
                value => Err(BuildError::NotAType(value.to_string())),
            },
        }
    }
    /// Declare a sum type, binding it to its name
    pub fn build_adt(&mut self, decl: &AdtDecl) -> Result<SumType, BuildError> {
        let mut fields = Vec::with_capacity(decl.fields.len());
        for field in decl.fields.iter() {
            let spec = match &field.types {
                FieldTypes::Tuple(types) => FieldSpec::Types(
                    types
                        .iter()
                        .map(|ty| self.build_type(ty))
                        .collect::<Result<TypeList, _>>()?,
                ),
                FieldTypes::Bare(ty) => FieldSpec::Bare(self.build_type(ty)?),
            };
            fields.push((field.name.get_str(), spec));
        }
        let adt = declare(decl.name.get_str(), fields, Vec::<(&str, FieldMethod)>::new())?;
        if self.define(decl.name.get_str(), adt.clone()).is_some() {
            debug!(adt = %adt.name(), "shadowed a previous binding");
        }
        Ok(adt)
    }
    /// Build a literal value
    pub fn build_literal(literal: &Literal) -> Result<Value, BuildError> {
        Ok(match literal {
            Literal::None => Value::None,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(i) => Value::Int(i.clone()),
            Literal::Float(f) => Value::Float(
                f.parse()
                    .map_err(|_| BuildError::Parse(format!("invalid float {:?}", f)))?,
            ),
            Literal::Str(s) => Value::Str(s.clone()),
        })
    }
    /// Build a value expression
    pub fn build_expr(&self, expr: &Expr) -> Result<Value, BuildError> {
        match expr {
            Expr::Literal(literal) => Self::build_literal(literal),
            Expr::Builtin(ty) => Ok(Value::Type(ty.clone())),
            Expr::Path(path) => self.build_path(path),
            Expr::Call { callee, args } => {
                let callee = self.build_expr(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.build_expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(callee.call(&args)?)
            }
            Expr::Index { base, ix } => {
                let base = self.build_expr(base)?;
                let instance = base
                    .as_instance()
                    .ok_or_else(|| BuildError::NotIndexable(base.ty().to_string()))?;
                instance
                    .get(*ix)
                    .cloned()
                    .ok_or_else(|| BuildError::IndexOutOfBounds {
                        value: instance.to_string(),
                        ix: *ix,
                        len: instance.len(),
                    })
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = self.build_expr(lhs)?;
                let rhs = self.build_expr(rhs)?;
                match op {
                    BinOp::Eq => Ok(Value::Bool(lhs == rhs)),
                    BinOp::Ne => Ok(Value::Bool(lhs != rhs)),
                    BinOp::In => match rhs {
                        Value::Type(Ty::Sum(adt)) => Ok(Value::Bool(adt.contains(&lhs))),
                        Value::Type(ty) => Ok(Value::Bool(ty.admits(&lhs))),
                        rhs => Err(BuildError::NotAType(rhs.to_string())),
                    },
                }
            }
        }
    }
    /// Build a `#let` statement, returning the bound value
    pub fn build_let(&mut self, binding: &Let) -> Result<Value, BuildError> {
        let value = self.build_expr(&binding.rhs)?;
        self.define(binding.var.get_str(), value.clone());
        Ok(value)
    }
    /// Build a statement, returning its value. Declarations evaluate to the declared sum type.
    pub fn build_statement(&mut self, statement: &Statement) -> Result<Value, BuildError> {
        match statement {
            Statement::Adt(decl) => self.build_adt(decl).map(Value::from),
            Statement::Let(binding) => self.build_let(binding),
            Statement::Expr(expr) => self.build_expr(expr),
        }
    }
    /**
    Parse and build a statement, returning the remaining input and the statement's value.

    # Example
    ```rust
    use adt::parser::builder::Builder;
    use adt::Value;
    let mut builder = Builder::new();
    let (rest, shape) = builder.parse_statement(
        "#adt Shape { Circle: (#float); Rect: (#float, #float); Empty: () }"
    ).unwrap();
    assert_eq!(rest, "");
    assert_eq!(shape.to_string(), "Shape");
    let (_, rect) = builder.parse_statement("#let s = Shape.Rect(1.0, 2.0);").unwrap();
    assert_eq!(rect.to_string(), "Shape.Rect(1.0, 2.0)");
    assert_eq!(builder.parse_statement("s == Shape.Rect(1.0, 2.0)").unwrap().1, Value::from(true));
    assert_eq!(builder.parse_statement("s #in Shape").unwrap().1, Value::from(true));
    assert_eq!(builder.parse_statement("s[1]").unwrap().1, Value::from(2.0));
    ```
    */
    pub fn parse_statement<'a>(&mut self, input: &'a str) -> Result<(&'a str, Value), BuildError> {
        let (rest, _) = ows(input)?;
        let (rest, statement) = parse_statement(rest)?;
        let value = self.build_statement(&statement)?;
        let (rest, _) = ows(rest)?;
        Ok((rest, value))
    }
    /// Parse and build every statement in the input, returning their values
    pub fn parse_all(&mut self, mut input: &str) -> Result<Vec<Value>, BuildError> {
        let mut values = Vec::new();
        input = ows(input)?.0;
        while !input.is_empty() {
            let (rest, value) = self.parse_statement(input)?;
            values.push(value);
            input = rest;
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use pretty_assertions::assert_eq;

    const SHAPES: &str = "
        // Shapes in the plane
        #adt Shape { Circle: (#float); Rect: (#float, #float); Empty: () }
        #let c = Shape.Circle(1.5);
        #let e = Shape.Empty();
    ";

    #[test]
    fn declarations_build_sum_types() {
        let mut builder = Builder::new();
        let values = builder.parse_all(SHAPES).unwrap();
        assert_eq!(values.len(), 3);
        let shape = builder.adt("Shape").unwrap().clone();
        assert_eq!(
            shape.signature().to_string(),
            "#adt Shape { Circle: (#float); Rect: (#float, #float); Empty: () }"
        );
        let circle = shape.get("Circle").unwrap();
        assert_eq!(
            builder.get("c"),
            Some(&Value::from(circle.construct(&values![1.5]).unwrap()))
        );
        assert_eq!(builder.get("e").unwrap().to_string(), "Shape.Empty()");
        let names: Vec<_> = builder.symbols().map(|(name, _)| name).collect();
        assert_eq!(names, ["Shape", "c", "e"]);
    }

    #[test]
    fn printed_values_parse_back() {
        let mut builder = Builder::new();
        builder
            .parse_all("#adt Msg { Write: (#str, #bool, #none); Move: (#int, #int) }")
            .unwrap();
        let printed = builder
            .parse_statement("Msg.Write(\"hi \\\"there\\\"\", #true, #none)")
            .unwrap()
            .1
            .to_string();
        assert_eq!(printed, "Msg.Write(\"hi \\\"there\\\"\", #true, #none)");
        let reparsed = builder.parse_statement(&printed).unwrap().1;
        assert_eq!(reparsed.to_string(), printed);
    }

    #[test]
    fn membership_and_equality_operators() {
        let mut builder = Builder::new();
        builder.parse_all(SHAPES).unwrap();
        let mut eval = |input: &str| builder.parse_statement(input).unwrap().1;
        assert_eq!(eval("c #in Shape"), Value::from(true));
        assert_eq!(eval("Shape.Circle #in Shape"), Value::from(true));
        assert_eq!(eval("Shape #in Shape"), Value::from(false));
        assert_eq!(eval("3 #in Shape"), Value::from(false));
        assert_eq!(eval("c #in Shape.Circle"), Value::from(true));
        assert_eq!(eval("e #in Shape.Circle"), Value::from(false));
        assert_eq!(eval("3 #in #int"), Value::from(true));
        assert_eq!(eval("#true #in #int"), Value::from(false));
        assert_eq!(eval("c == Shape.Circle(1.5)"), Value::from(true));
        assert_eq!(eval("c != e"), Value::from(true));
        assert_eq!(eval("c[0]"), Value::from(1.5));
    }

    #[test]
    fn construction_errors_surface() {
        let mut builder = Builder::new();
        builder.parse_all(SHAPES).unwrap();
        assert!(matches!(
            builder.parse_statement("Shape.Circle(1.5, 2.5)"),
            Err(BuildError::Adt(Error::Arity { expected: 1, got: 2, .. }))
        ));
        assert!(matches!(
            builder.parse_statement("Shape.Circle(1)"),
            Err(BuildError::Adt(Error::TypeMismatch { position: 0, .. }))
        ));
        assert_eq!(
            builder.parse_statement("Shape()"),
            Err(BuildError::Adt(Error::IllegalInstantiation("Shape".into())))
        );
        assert_eq!(
            builder.parse_statement("Shape.Square"),
            Err(BuildError::NoMember {
                base: "Shape".into(),
                name: "Square".into()
            })
        );
        assert_eq!(
            builder.parse_statement("Triangle"),
            Err(BuildError::Undefined("Triangle".into()))
        );
        assert_eq!(
            builder.parse_statement("c[1]"),
            Err(BuildError::IndexOutOfBounds {
                value: "Shape.Circle(1.5)".into(),
                ix: 1,
                len: 1
            })
        );
        assert_eq!(
            builder.parse_statement("3[0]"),
            Err(BuildError::NotIndexable("#int".into()))
        );
        assert_eq!(
            builder.parse_statement("c #in 3"),
            Err(BuildError::NotAType("3".into()))
        );
        assert!(matches!(
            builder.parse_statement("#let = 3;"),
            Err(BuildError::Parse(_))
        ));
    }

    #[test]
    fn bare_field_types_are_malformed() {
        let mut builder = Builder::new();
        assert_eq!(
            builder.parse_statement("#adt Message { Quit: (); Write: #str }"),
            Err(BuildError::Adt(Error::MalformedField {
                adt: "Message".into(),
                field: "Write".into()
            }))
        );
        assert!(builder.adt("Message").is_none());
    }

    #[test]
    fn redeclaration_shadows_with_a_new_sum_type() {
        let mut builder = Builder::new();
        builder.parse_all(SHAPES).unwrap();
        builder
            .parse_statement("#adt Shape { Circle: (#float) }")
            .unwrap();
        assert_eq!(
            builder.parse_statement("c #in Shape").unwrap().1,
            Value::from(false)
        );
        assert_eq!(
            builder.parse_statement("c == Shape.Circle(1.5)").unwrap().1,
            Value::from(false)
        );
    }

    #[test]
    fn field_methods_are_members_of_instances() {
        let mut builder = Builder::with_prelude();
        builder.parse_statement("#let r = Result.Ok(1);").unwrap();
        assert_eq!(
            builder.parse_statement("r.to_option()").unwrap().1,
            Value::from(crate::prelude::some(1))
        );
        builder.parse_statement("#let e = Result.Error(\"no\");").unwrap();
        assert_eq!(
            builder.parse_statement("e.to_option() == Option.Empty()").unwrap().1,
            Value::from(true)
        );
        assert_eq!(
            builder.parse_statement("r.unwrap()"),
            Err(BuildError::NoMember {
                base: "Result.Ok(1)".into(),
                name: "unwrap".into()
            })
        );
        assert_eq!(
            Builder::new().parse_statement("Result.Ok(1)"),
            Err(BuildError::Undefined("Result".into()))
        );
    }

    #[test]
    fn defined_values_resolve_by_name() {
        let mut builder = Builder::new();
        assert_eq!(builder.define("answer", 42), None);
        assert_eq!(builder.define("answer", 43), Some(Value::from(42)));
        assert_eq!(
            builder.parse_statement("answer #in #int").unwrap().1,
            Value::from(true)
        );
        builder.define("R", RESULT.clone());
        assert!(builder.adt("R").is_some());
        assert!(builder.adt("answer").is_none());
    }

    #[test]
    fn control_characters_parse_back() {
        let mut builder = Builder::with_prelude();
        let printed = Value::from(crate::prelude::some("bell\u{7}\tdel\u{7f}")).to_string();
        assert_eq!(printed, "Option.Some(\"bell\\u{7}\\tdel\\u{7f}\")");
        let reparsed = builder.parse_statement(&printed).unwrap().1;
        assert_eq!(reparsed.to_string(), printed);
        assert_eq!(reparsed, Value::from(crate::prelude::some("bell\u{7}\tdel\u{7f}")));
    }

    #[test]
    fn variant_types_may_appear_in_field_types() {
        let mut builder = Builder::new();
        builder.parse_all(SHAPES).unwrap();
        builder
            .parse_all("#adt Scene { Only: (Shape.Circle); Any: (Shape, #object) }")
            .unwrap();
        assert!(builder.parse_statement("Scene.Only(c)").is_ok());
        assert!(matches!(
            builder.parse_statement("Scene.Only(e)"),
            Err(BuildError::Adt(Error::TypeMismatch { .. }))
        ));
        assert_eq!(
            builder.parse_statement("Scene.Any(e, 5)").unwrap().1.to_string(),
            "Scene.Any(Shape.Empty(), 5)"
        );
        assert_eq!(
            builder.parse_statement("#adt Bad { It: (c) }"),
            Err(BuildError::NotAType("Shape.Circle(1.5)".into()))
        );
    }
}
