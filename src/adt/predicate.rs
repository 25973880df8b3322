/*!
Introspection predicates over sum types, variant types and their instances
*/
use super::{FieldBase, Instance, SumType, VariantType};
use crate::typing::Ty;
use crate::value::Value;

/// An object which may be a member of a sum type: a variant type or a variant instance.
///
/// Objects which are neither report no owner, so membership queries on them are simply `false`.
pub trait Member {
    /// Get the sum type this object is a variant type or variant instance of, if any
    fn owner(&self) -> Option<&SumType>;
    /// Get the sum type this object *is*, if it is one
    fn as_adt(&self) -> Option<&SumType> {
        None
    }
}

impl Member for Instance {
    #[inline]
    fn owner(&self) -> Option<&SumType> {
        Some(self.adt())
    }
}

impl Member for VariantType {
    #[inline]
    fn owner(&self) -> Option<&SumType> {
        Some(self.adt())
    }
}

impl Member for SumType {
    #[inline]
    fn owner(&self) -> Option<&SumType> {
        None
    }
    #[inline]
    fn as_adt(&self) -> Option<&SumType> {
        Some(self)
    }
}

impl Member for FieldBase {
    #[inline]
    fn owner(&self) -> Option<&SumType> {
        None
    }
}

impl Member for Ty {
    fn owner(&self) -> Option<&SumType> {
        match self {
            Ty::Variant(variant) => variant.owner(),
            _ => None,
        }
    }
    fn as_adt(&self) -> Option<&SumType> {
        match self {
            Ty::Sum(adt) => Some(adt),
            _ => None,
        }
    }
}

impl Member for Value {
    fn owner(&self) -> Option<&SumType> {
        match self {
            Value::Instance(instance) => instance.owner(),
            Value::Type(ty) => ty.owner(),
            _ => None,
        }
    }
    fn as_adt(&self) -> Option<&SumType> {
        match self {
            Value::Type(ty) => ty.as_adt(),
            _ => None,
        }
    }
}

/// Check whether an object is a sum type produced by the declarator
#[inline]
pub fn is_adt<M: Member + ?Sized>(item: &M) -> bool {
    item.as_adt().is_some()
}

/// Check whether an object is a variant type or a variant instance of any sum type
#[inline]
pub fn is_adt_field<M: Member + ?Sized>(item: &M) -> bool {
    item.owner().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{values, Declaration};

    #[test]
    fn predicates_distinguish_sums_variants_and_instances() {
        let adt = Declaration::new("MyADT")
            .field("foo", ())
            .field("bar", (Ty::Int,))
            .declare()
            .unwrap();
        let bar = adt.get("bar").unwrap();
        let instance = bar.construct(&values![1]).unwrap();

        assert!(is_adt(&adt));
        assert!(is_adt(&Value::from(adt.clone())));
        assert!(is_adt(&Ty::from(&adt)));
        assert!(!is_adt(&bar));
        assert!(!is_adt(&instance));
        assert!(!is_adt(&adt.field_base()));
        assert!(!is_adt(&Value::from(3)));

        assert!(is_adt_field(&bar));
        assert!(is_adt_field(&instance));
        assert!(is_adt_field(&Value::from(instance.clone())));
        assert!(is_adt_field(&Value::from(bar.clone())));
        assert!(!is_adt_field(&adt));
        assert!(!is_adt_field(&adt.field_base()));
        assert!(!is_adt_field(&Value::from("bar")));
    }

    #[test]
    fn membership_covers_variant_types_and_instances_only() {
        let adt = Declaration::new("MyADT")
            .field("foo", ())
            .field("bar", (Ty::Int,))
            .declare()
            .unwrap();
        let other = Declaration::new("MyADT").field("foo", ()).declare().unwrap();
        let foo = adt.get("foo").unwrap();

        assert!(adt.contains(&foo));
        assert!(adt.contains(&foo.construct(&[]).unwrap()));
        assert!(adt.contains(&Ty::from(&foo)));
        assert!(adt.contains(&Value::from(foo.clone())));
        assert!(!adt.contains(&adt));
        assert!(!adt.contains(&adt.field_base()));
        assert!(!adt.contains(&Value::from(adt.clone())));
        assert!(!adt.contains(&Value::from(3)));
        assert!(!adt.contains(&Ty::Object));
        assert!(!other.contains(&foo));
        assert!(!other.is_field(&foo.construct(&[]).unwrap()));
    }
}
