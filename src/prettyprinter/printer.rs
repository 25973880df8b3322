/*
The prettyprinter implementation
*/
use super::tokens::*;
use crate::adt::{FieldBase, Instance, SumType, VariantType};
use crate::typing::Ty;
use crate::value::Value;
use std::fmt::{self, Formatter};

/// A prettyprinter for values
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PrettyPrinter {
    depth: usize,
    max_depth: Option<usize>,
}

impl PrettyPrinter {
    /// Create a new prettyprinter which prints values in full
    pub fn new() -> PrettyPrinter {
        PrettyPrinter::default()
    }
    /// Create a new prettyprinter eliding instances nested deeper than `max_depth`
    pub fn with_max_depth(max_depth: usize) -> PrettyPrinter {
        PrettyPrinter {
            depth: 0,
            max_depth: Some(max_depth),
        }
    }
    /// Get the maximum depth of this prettyprinter, if any
    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
    /// Get the current nesting depth of this prettyprinter
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// Print a sequence of values separated by commas, one level deeper than the current one
    pub fn print_args(&mut self, args: &[Value], fmt: &mut Formatter) -> Result<(), fmt::Error> {
        self.depth += 1;
        let result = args.iter().enumerate().try_for_each(|(i, arg)| {
            if i != 0 {
                write!(fmt, "{}", ARG_SEP)?;
            }
            arg.prettyprint(self, fmt)
        });
        self.depth -= 1;
        result
    }
    /// Wrap a value so that it is displayed with this prettyprinter's settings
    pub fn display<'a, P: PrettyPrint>(&self, value: &'a P) -> Pretty<'a, P> {
        Pretty {
            printer: *self,
            value,
        }
    }
}

/// A value which can be prettyprinted
pub trait PrettyPrint {
    /// Prettyprint a value using a given printer
    fn prettyprint(&self, printer: &mut PrettyPrinter, fmt: &mut Formatter)
        -> Result<(), fmt::Error>;
}

/// A value displayed with a given prettyprinter
#[derive(Debug, Copy, Clone)]
pub struct Pretty<'a, P> {
    printer: PrettyPrinter,
    value: &'a P,
}

impl<P: PrettyPrint> fmt::Display for Pretty<'_, P> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        let mut printer = self.printer;
        self.value.prettyprint(&mut printer, fmt)
    }
}

impl PrettyPrint for Value {
    fn prettyprint(
        &self,
        printer: &mut PrettyPrinter,
        fmt: &mut Formatter,
    ) -> Result<(), fmt::Error> {
        match self {
            Value::None => write!(fmt, "{}", KEYWORD_NONE),
            Value::Bool(true) => write!(fmt, "{}", KEYWORD_TRUE),
            Value::Bool(false) => write!(fmt, "{}", KEYWORD_FALSE),
            Value::Int(i) => write!(fmt, "{}", i),
            Value::Float(f) => write!(fmt, "{:?}", f),
            Value::Str(s) => write!(fmt, "{:?}", s),
            Value::Type(t) => t.prettyprint(printer, fmt),
            Value::Func(_) => write!(fmt, "{}", FUNC_REPR),
            Value::Instance(i) => i.prettyprint(printer, fmt),
        }
    }
}

impl PrettyPrint for Ty {
    fn prettyprint(
        &self,
        printer: &mut PrettyPrinter,
        fmt: &mut Formatter,
    ) -> Result<(), fmt::Error> {
        match self {
            Ty::Object => write!(fmt, "{}", KEYWORD_OBJECT),
            Ty::None => write!(fmt, "{}", KEYWORD_NONE),
            Ty::Bool => write!(fmt, "{}", KEYWORD_BOOL),
            Ty::Int => write!(fmt, "{}", KEYWORD_INT),
            Ty::Float => write!(fmt, "{}", KEYWORD_FLOAT),
            Ty::Str => write!(fmt, "{}", KEYWORD_STR),
            Ty::Type => write!(fmt, "{}", KEYWORD_TYPE),
            Ty::Func => write!(fmt, "{}", KEYWORD_FUNC),
            Ty::Sum(s) => s.prettyprint(printer, fmt),
            Ty::FieldBase(b) => b.prettyprint(printer, fmt),
            Ty::Variant(v) => v.prettyprint(printer, fmt),
        }
    }
}

impl PrettyPrint for SumType {
    fn prettyprint(&self, _: &mut PrettyPrinter, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}", self.name())
    }
}

impl PrettyPrint for FieldBase {
    fn prettyprint(&self, _: &mut PrettyPrinter, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}{}", self.adt().name(), FIELD_BASE_SUFFIX)
    }
}

impl PrettyPrint for VariantType {
    fn prettyprint(&self, _: &mut PrettyPrinter, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}", self.qualname())
    }
}

impl PrettyPrint for Instance {
    fn prettyprint(
        &self,
        printer: &mut PrettyPrinter,
        fmt: &mut Formatter,
    ) -> Result<(), fmt::Error> {
        if let Some(max_depth) = printer.max_depth {
            if printer.depth >= max_depth {
                return write!(fmt, "{}", ELIDED);
            }
        }
        write!(fmt, "{}{}", self.variant().qualname(), TUPLE_OPEN)?;
        printer.print_args(self.as_slice(), fmt)?;
        write!(fmt, "{}", TUPLE_CLOSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{values, Declaration};
    use pretty_assertions::assert_eq;

    #[test]
    fn primitive_values_print_as_literals() {
        let printed: Vec<_> = values![(), true, false, -3, 1.0, 2.5, "a \"quoted\" str"]
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(
            printed,
            [
                "#none",
                "#true",
                "#false",
                "-3",
                "1.0",
                "2.5",
                "\"a \\\"quoted\\\" str\""
            ]
        );
        assert_eq!(Value::func(|_| Ok(Value::None)).to_string(), "<func>");
    }

    #[test]
    fn types_print_by_name() {
        let adt = Declaration::new("Tree")
            .field("Leaf", (Ty::Int,))
            .declare()
            .unwrap();
        assert_eq!(Ty::Object.to_string(), "#object");
        assert_eq!(Value::from(adt.clone()).to_string(), "Tree");
        assert_eq!(adt.field_base().to_string(), "TreeField");
        assert_eq!(
            Value::from(adt.get("Leaf").unwrap()).to_string(),
            "Tree.Leaf"
        );
    }

    #[test]
    fn nested_instances_are_elided_past_max_depth() {
        let leaf = Declaration::new("Leaf")
            .field("It", (Ty::Int,))
            .declare()
            .unwrap();
        let wrap = Declaration::new("Wrap")
            .field("Once", (Ty::Object, Ty::Object))
            .declare()
            .unwrap();
        let inner = leaf.get("It").unwrap().construct(&values![1]).unwrap();
        let outer = wrap
            .get("Once")
            .unwrap()
            .construct(&values![inner, 2])
            .unwrap();
        assert_eq!(outer.to_string(), "Wrap.Once(Leaf.It(1), 2)");
        let shallow = PrettyPrinter::with_max_depth(1);
        assert_eq!(shallow.display(&outer).to_string(), "Wrap.Once(..., 2)");
        assert_eq!(
            PrettyPrinter::with_max_depth(0).display(&outer).to_string(),
            "..."
        );
        assert_eq!(shallow.max_depth(), Some(1));
        assert_eq!(shallow.depth(), 0);
    }
}
