/*!
Dynamically typed values which may be stored in variant payloads
*/
use crate::adt::{FieldBase, Instance, SumType, VariantType};
use crate::typing::{Ty, Typed};
use crate::{debug_from_display, display_pretty, enum_convert, Error};
use num::BigInt;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// A value
#[derive(Clone, PartialEq)]
pub enum Value {
    /// The null value
    None,
    /// A boolean
    Bool(bool),
    /// An arbitrary precision integer
    Int(BigInt),
    /// A 64-bit float
    Float(f64),
    /// A string
    Str(String),
    /// A type, including sum types and variant types
    Type(Ty),
    /// A function
    Func(Func),
    /// An instance of a variant type
    Instance(Instance),
}

debug_from_display!(Value);
display_pretty!(Value);

impl Value {
    /// Create a function value from a closure
    pub fn func<F>(f: F) -> Value
    where
        F: Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Value::Func(Func::new(f))
    }
    /// Check whether this is the null value
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
    /// Get this value as a boolean, if it is one
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
    /// Get this value as an integer, if it is one
    #[inline]
    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
    /// Get this value as a float, if it is one
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
    /// Get this value as a string, if it is one
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
    /// Get this value as a type, if it is one
    #[inline]
    pub fn as_ty(&self) -> Option<&Ty> {
        match self {
            Value::Type(t) => Some(t),
            _ => None,
        }
    }
    /// Get this value as a function, if it is one
    #[inline]
    pub fn as_func(&self) -> Option<&Func> {
        match self {
            Value::Func(f) => Some(f),
            _ => None,
        }
    }
    /// Get this value as a variant instance, if it is one
    #[inline]
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(i) => Some(i),
            _ => None,
        }
    }
    /// Call this value with positional arguments.
    ///
    /// Functions are applied; types are constructed, which only succeeds for variant types.
    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        match self {
            Value::Func(f) => f.call(args),
            Value::Type(t) => t.construct(args),
            v => Err(Error::NotCallable(v.ty().to_string())),
        }
    }
}

impl Typed for Value {
    fn ty(&self) -> Ty {
        match self {
            Value::None => Ty::None,
            Value::Bool(_) => Ty::Bool,
            Value::Int(_) => Ty::Int,
            Value::Float(_) => Ty::Float,
            Value::Str(_) => Ty::Str,
            Value::Type(_) => Ty::Type,
            Value::Func(_) => Ty::Func,
            Value::Instance(i) => i.ty(),
        }
    }
    #[inline]
    fn is_ty(&self) -> bool {
        matches!(self, Value::Type(_))
    }
}

enum_convert! {
    impl Injection<Value> for Instance {}
    impl Injection<Value> for Func {}
}

enum_convert!(impl From<Ty> for Value { Value::Type });
enum_convert!(impl TryFrom<Value> for Ty { Value::Type });
enum_convert!(impl From<bool> for Value { Value::Bool });
enum_convert!(impl From<BigInt> for Value { Value::Int });
enum_convert!(impl From<f64> for Value { Value::Float });
enum_convert!(impl From<String> for Value { Value::Str });

macro_rules! int_values {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                #[inline]
                fn from(i: $t) -> Value {
                    Value::Int(BigInt::from(i))
                }
            }
        )*
    };
}

int_values!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Value {
        Value::None
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Value {
        Value::Str(s.to_owned())
    }
}

impl From<SumType> for Value {
    #[inline]
    fn from(adt: SumType) -> Value {
        Value::Type(Ty::Sum(adt))
    }
}

impl From<VariantType> for Value {
    #[inline]
    fn from(variant: VariantType) -> Value {
        Value::Type(Ty::Variant(variant))
    }
}

impl From<FieldBase> for Value {
    #[inline]
    fn from(base: FieldBase) -> Value {
        Value::Type(Ty::FieldBase(base))
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    #[inline]
    fn from(v: Option<V>) -> Value {
        v.map(Into::into).unwrap_or(Value::None)
    }
}

/// The signature of a function value
pub type FuncFn = dyn Fn(&[Value]) -> Result<Value, Error> + Send + Sync;

/// A reference-counted function taking positional arguments.
///
/// Functions compare equal only to clones of themselves.
#[derive(Clone)]
pub struct Func(Arc<FuncFn>);

impl Func {
    /// Wrap a closure as a function value
    pub fn new<F>(f: F) -> Func
    where
        F: Fn(&[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        Func(Arc::new(f))
    }
    /// Call this function
    #[inline]
    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        (self.0)(args)
    }
}

impl PartialEq for Func {
    #[inline]
    fn eq(&self, other: &Func) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const u8,
            Arc::as_ptr(&other.0) as *const u8,
        )
    }
}

impl Eq for Func {}

impl Debug for Func {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "Func({:p})", Arc::as_ptr(&self.0) as *const u8)
    }
}
