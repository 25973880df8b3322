/*!
The type system: builtin types, sum types, field bases and variant types
*/
use crate::adt::{FieldBase, SumType, VariantType};
use crate::value::Value;
use crate::{debug_from_display, display_pretty, Error};

/// A trait implemented by values with a type
pub trait Typed {
    /// Compute the type of this value
    fn ty(&self) -> Ty;
    /// Check whether this value is a type
    fn is_ty(&self) -> bool;
}

/// A type, against which payload values are checked
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum Ty {
    /// The top type, admitting every value
    Object,
    /// The null marker, admitting only the null value
    None,
    /// The type of booleans
    Bool,
    /// The type of integers
    Int,
    /// The type of floats
    Float,
    /// The type of strings
    Str,
    /// The type of types
    Type,
    /// The type of functions
    Func,
    /// A sum type, admitting the instances of each of its variants
    Sum(SumType),
    /// The field base of a sum type, admitting the instances of each of its variants
    FieldBase(FieldBase),
    /// A variant type, admitting only its own instances
    Variant(VariantType),
}

debug_from_display!(Ty);
display_pretty!(Ty);

impl Ty {
    /// Check whether a value is an instance of this type
    pub fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (Ty::Object, _) => true,
            (Ty::None, Value::None) => true,
            (Ty::Bool, Value::Bool(_)) => true,
            (Ty::Int, Value::Int(_)) => true,
            (Ty::Float, Value::Float(_)) => true,
            (Ty::Str, Value::Str(_)) => true,
            (Ty::Type, Value::Type(_)) => true,
            (Ty::Func, Value::Func(_)) => true,
            (Ty::Sum(adt), Value::Instance(i)) => i.adt() == adt,
            (Ty::FieldBase(base), Value::Instance(i)) => i.adt() == base.adt(),
            (Ty::Variant(variant), Value::Instance(i)) => i.variant() == variant,
            _ => false,
        }
    }
    /// Check whether this type is a subtype of another.
    ///
    /// Every type is a subtype of itself and of `Object`; a variant type is also a subtype of its sum
    /// type and of its sum type's field base.
    pub fn is_subtype(&self, other: &Ty) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (_, Ty::Object) => true,
            (Ty::Variant(variant), Ty::Sum(adt)) => variant.adt() == adt,
            (Ty::Variant(variant), Ty::FieldBase(base)) => variant.adt() == base.adt(),
            _ => false,
        }
    }
    /// Get the sum type this type was declared by, if any
    pub fn adt(&self) -> Option<&SumType> {
        match self {
            Ty::Sum(adt) => Some(adt),
            Ty::FieldBase(base) => Some(base.adt()),
            Ty::Variant(variant) => Some(variant.adt()),
            _ => None,
        }
    }
    /// Construct an instance of this type. Only variant types may be constructed.
    pub fn construct(&self, args: &[Value]) -> Result<Value, Error> {
        match self {
            Ty::Variant(variant) => variant.construct(args).map(Value::Instance),
            Ty::Sum(adt) => adt.construct(args).map(Value::Instance),
            Ty::FieldBase(base) => base.construct(args).map(Value::Instance),
            ty => Err(Error::IllegalInstantiation(ty.to_string())),
        }
    }
}

impl Typed for Ty {
    #[inline]
    fn ty(&self) -> Ty {
        Ty::Type
    }
    #[inline]
    fn is_ty(&self) -> bool {
        true
    }
}

impl From<SumType> for Ty {
    #[inline]
    fn from(adt: SumType) -> Ty {
        Ty::Sum(adt)
    }
}

impl From<FieldBase> for Ty {
    #[inline]
    fn from(base: FieldBase) -> Ty {
        Ty::FieldBase(base)
    }
}

impl From<VariantType> for Ty {
    #[inline]
    fn from(variant: VariantType) -> Ty {
        Ty::Variant(variant)
    }
}

impl From<&SumType> for Ty {
    #[inline]
    fn from(adt: &SumType) -> Ty {
        Ty::Sum(adt.clone())
    }
}

impl From<&VariantType> for Ty {
    #[inline]
    fn from(variant: &VariantType) -> Ty {
        Ty::Variant(variant.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{values, Declaration};
    use pretty_assertions::assert_eq;

    #[test]
    fn null_marker_admits_only_null() {
        assert!(Ty::None.admits(&Value::None));
        for value in values![0, false, "", 0.0].iter() {
            assert!(!Ty::None.admits(value));
        }
        assert!(!Ty::Int.admits(&Value::None));
    }

    #[test]
    fn variants_are_subtypes_of_their_sum_and_field_base() {
        let shape = Declaration::new("Shape")
            .field("Circle", (Ty::Float,))
            .field("Point", ())
            .declare()
            .unwrap();
        let other = Declaration::new("Shape")
            .field("Point", ())
            .declare()
            .unwrap();
        let circle = Ty::from(shape.get("Circle").unwrap());
        let point = Ty::from(shape.get("Point").unwrap());
        let sum = Ty::from(&shape);
        let base = Ty::from(shape.field_base());

        assert!(circle.is_subtype(&sum));
        assert!(circle.is_subtype(&base));
        assert!(circle.is_subtype(&Ty::Object));
        assert!(circle.is_subtype(&circle));
        assert!(!circle.is_subtype(&point));
        assert!(!sum.is_subtype(&circle));
        assert!(!base.is_subtype(&sum));
        assert!(!point.is_subtype(&Ty::from(&other)));
        assert_eq!(circle.adt(), Some(&shape));
        assert_eq!(base.adt(), Some(&shape));
        assert_eq!(Ty::Int.adt(), None);

        let c = Value::from(shape.get("Circle").unwrap().construct(&values![1.0]).unwrap());
        assert!(sum.admits(&c));
        assert!(base.admits(&c));
        assert!(circle.admits(&c));
        assert!(!point.admits(&c));
        assert!(!Ty::from(&other).admits(&c));
    }

    #[test]
    fn only_variant_types_construct() {
        let unit = Declaration::new("Unit").field("It", ()).declare().unwrap();
        let it = Ty::from(unit.get("It").unwrap());
        assert_eq!(format!("{}", it.construct(&[]).unwrap()), "Unit.It()");
        assert_eq!(
            Ty::from(&unit).construct(&[]),
            Err(Error::IllegalInstantiation("Unit".into()))
        );
        assert_eq!(
            Ty::from(unit.field_base()).construct(&[]),
            Err(Error::IllegalInstantiation("UnitField".into()))
        );
        assert_eq!(
            Ty::Object.construct(&[]),
            Err(Error::IllegalInstantiation("#object".into()))
        );
    }
}
