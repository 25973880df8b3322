/*!
Variant types and their instances
*/
use super::{BoundMethod, FieldBase, FieldMethodRef, SumType, TypeList};
use crate::prettyprinter::tokens::PATH_SEP;
use crate::typing::{Ty, Typed};
use crate::value::Value;
use crate::{debug_from_display, display_pretty, Error};
use elysees::Arc;
use smallvec::SmallVec;
use std::ops::Deref;
use tracing::trace;

/// The size of a small payload
pub const SMALL_PAYLOAD_SIZE: usize = 3;

/// The elements of a variant instance
pub type Payload = SmallVec<[Value; SMALL_PAYLOAD_SIZE]>;

/// The description of a single variant, owned by its sum type
#[derive(Debug)]
pub(crate) struct VariantData {
    name: String,
    qualname: String,
    types: TypeList,
}

impl VariantData {
    #[inline]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }
}

/// Synthesise the description of a variant of the sum type `adt`
pub(crate) fn make_variant(adt: &str, name: String, types: TypeList) -> VariantData {
    let qualname = format!("{}{}{}", adt, PATH_SEP, name);
    trace!(variant = %qualname, arity = types.len(), "synthesised variant type");
    VariantData {
        name,
        qualname,
        types,
    }
}

/// A variant type: one field of a sum type.
///
/// A variant type is a subtype of both its sum type and its sum type's field base.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct VariantType {
    adt: SumType,
    ix: usize,
}

debug_from_display!(VariantType);
display_pretty!(VariantType);

impl VariantType {
    #[inline]
    pub(crate) fn new(adt: SumType, ix: usize) -> VariantType {
        VariantType { adt, ix }
    }
    #[inline]
    fn data(&self) -> &VariantData {
        self.adt.variant_data(self.ix)
    }
    /// Get the sum type this variant belongs to
    #[inline]
    pub fn adt(&self) -> &SumType {
        &self.adt
    }
    /// Get the field base this variant derives from
    #[inline]
    pub fn field_base(&self) -> FieldBase {
        self.adt.field_base()
    }
    /// Get the position of this variant in its sum type's declaration
    #[inline]
    pub fn index(&self) -> usize {
        self.ix
    }
    /// Get the field name of this variant
    #[inline]
    pub fn name(&self) -> &str {
        &self.data().name
    }
    /// Get the qualified name of this variant, i.e. `<sum type>.<field>`
    #[inline]
    pub fn qualname(&self) -> &str {
        &self.data().qualname
    }
    /// Get the expected payload types of this variant
    #[inline]
    pub fn types(&self) -> &[Ty] {
        &self.data().types
    }
    /// Get the number of payload elements of this variant
    #[inline]
    pub fn arity(&self) -> usize {
        self.data().types.len()
    }
    /// Construct an instance of this variant from positional arguments.
    ///
    /// Fails with [`Error::Arity`] if the number of arguments is not this variant's arity, and with
    /// [`Error::TypeMismatch`] if an argument is not an instance of its position's type. The null
    /// value is accepted exactly at positions declared with the null marker [`Ty::None`].
    pub fn construct(&self, args: &[Value]) -> Result<Instance, Error> {
        let data = self.data();
        if args.len() != data.types.len() {
            trace!(variant = %data.qualname, got = args.len(), "arity mismatch");
            return Err(Error::Arity {
                callee: data.qualname.clone(),
                expected: data.types.len(),
                got: args.len(),
            });
        }
        for (position, (arg, ty)) in args.iter().zip(data.types.iter()).enumerate() {
            if !ty.admits(arg) {
                trace!(variant = %data.qualname, position, "type mismatch");
                return Err(Error::TypeMismatch {
                    callee: data.qualname.clone(),
                    position,
                    expected: ty.to_string(),
                    got: arg.ty().to_string(),
                });
            }
        }
        Ok(Instance(Arc::new(InstanceData {
            variant: self.clone(),
            payload: args.iter().cloned().collect(),
        })))
    }
    /// Get a field method of this variant's sum type, bound to this variant
    pub fn method(&self, name: &str) -> Option<FieldMethodRef> {
        self.adt
            .get_method(name)
            .map(|method| FieldMethodRef::new(name, method.clone(), self.clone()))
    }
    /// Iterate over the field methods bound to this variant, in declaration order
    pub fn methods(&self) -> impl Iterator<Item = FieldMethodRef> + '_ {
        self.adt.method_names().filter_map(move |name| self.method(name))
    }
}

impl Typed for VariantType {
    #[inline]
    fn ty(&self) -> Ty {
        Ty::Type
    }
    #[inline]
    fn is_ty(&self) -> bool {
        true
    }
}

/// The shared data of a variant instance
#[derive(Debug)]
struct InstanceData {
    variant: VariantType,
    payload: Payload,
}

/// An immutable instance of a variant type.
///
/// Instances dereference to their payload, so they can be iterated, indexed, sliced and
/// destructured with slice patterns. Clones share the payload.
#[derive(Clone)]
pub struct Instance(Arc<InstanceData>);

debug_from_display!(Instance);
display_pretty!(Instance);

impl Instance {
    /// Get the variant type of this instance
    #[inline]
    pub fn variant(&self) -> &VariantType {
        &self.0.variant
    }
    /// Get the sum type of this instance
    #[inline]
    pub fn adt(&self) -> &SumType {
        self.0.variant.adt()
    }
    /// Get the field name of this instance's variant
    #[inline]
    pub fn name(&self) -> &str {
        self.0.variant.name()
    }
    /// Check whether this instance is of a given variant type
    #[inline]
    pub fn is(&self, variant: &VariantType) -> bool {
        self.variant() == variant
    }
    /// Get the payload of this instance
    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.0.payload
    }
    /// Bind a field method to this instance
    pub fn method(&self, name: &str) -> Option<BoundMethod> {
        self.variant()
            .method(name)
            .map(|method| BoundMethod::new(method, self.clone()))
    }
    /// Call a field method on this instance
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, Error> {
        let method = self.method(name).ok_or_else(|| Error::UnknownMethod {
            adt: self.adt().name().to_owned(),
            name: name.to_owned(),
        })?;
        method.call(args)
    }
}

impl Typed for Instance {
    #[inline]
    fn ty(&self) -> Ty {
        Ty::Variant(self.variant().clone())
    }
    #[inline]
    fn is_ty(&self) -> bool {
        false
    }
}

impl Deref for Instance {
    type Target = [Value];
    #[inline]
    fn deref(&self) -> &[Value] {
        &self.0.payload
    }
}

impl<'a> IntoIterator for &'a Instance {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;
    #[inline]
    fn into_iter(self) -> std::slice::Iter<'a, Value> {
        self.0.payload.iter()
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.variant == other.0.variant && self.0.payload == other.0.payload)
    }
}

impl PartialEq<Value> for Instance {
    #[inline]
    fn eq(&self, other: &Value) -> bool {
        match other {
            Value::Instance(other) => self == other,
            _ => false,
        }
    }
}

impl PartialEq<Instance> for Value {
    #[inline]
    fn eq(&self, other: &Instance) -> bool {
        other == self
    }
}
