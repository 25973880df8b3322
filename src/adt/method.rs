/*!
Field methods: behaviour declared once on a sum type and bound onto each of its variants
*/
use super::{Instance, SumType, VariantType};
use crate::prettyprinter::tokens::PATH_SEP;
use crate::typing::{Ty, Typed};
use crate::value::{Func, Value};
use crate::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// The signature of a field method: the receiving instance, its sum type, and the explicit arguments
pub type FieldMethodFn = dyn Fn(&Instance, &SumType, &[Value]) -> Result<Value, Error> + Send + Sync;

/// A field method, shared by every variant of the sum type declaring it
#[derive(Clone)]
pub struct FieldMethod(Arc<FieldMethodFn>);

impl FieldMethod {
    /// Wrap a closure as a field method
    pub fn new<F>(f: F) -> FieldMethod
    where
        F: Fn(&Instance, &SumType, &[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        FieldMethod(Arc::new(f))
    }
    #[inline]
    pub(crate) fn invoke(&self, receiver: &Instance, args: &[Value]) -> Result<Value, Error> {
        (self.0)(receiver, receiver.adt(), args)
    }
}

impl Debug for FieldMethod {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "FieldMethod({:p})", Arc::as_ptr(&self.0) as *const u8)
    }
}

/// A field method bound to one variant type of its sum type
#[derive(Debug, Clone)]
pub struct FieldMethodRef {
    name: String,
    method: FieldMethod,
    variant: VariantType,
}

impl FieldMethodRef {
    #[inline]
    pub(crate) fn new(name: &str, method: FieldMethod, variant: VariantType) -> FieldMethodRef {
        FieldMethodRef {
            name: name.to_owned(),
            method,
            variant,
        }
    }
    /// Get the name of this method
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Get the variant this method is bound to
    #[inline]
    pub fn variant(&self) -> &VariantType {
        &self.variant
    }
    /// Get the sum type declaring this method
    #[inline]
    pub fn adt(&self) -> &SumType {
        self.variant.adt()
    }
    fn check_receiver(&self, receiver: &Instance) -> Result<(), Error> {
        if receiver.variant() == &self.variant {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                callee: self.to_string(),
                position: 0,
                expected: self.variant.qualname().to_owned(),
                got: receiver.ty().to_string(),
            })
        }
    }
    /// Call this method with an explicit receiver, which must be an instance of the bound variant
    pub fn call(&self, receiver: &Instance, args: &[Value]) -> Result<Value, Error> {
        self.check_receiver(receiver)?;
        self.method.invoke(receiver, args)
    }
    /// Bind a receiver to this method
    pub fn bind(self, receiver: Instance) -> Result<BoundMethod, Error> {
        self.check_receiver(&receiver)?;
        Ok(BoundMethod::new(self, receiver))
    }
}

impl Display for FieldMethodRef {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{}{}{}", self.variant.qualname(), PATH_SEP, self.name)
    }
}

/// A field method bound to a receiving instance
#[derive(Debug, Clone)]
pub struct BoundMethod {
    method: FieldMethodRef,
    receiver: Instance,
}

impl BoundMethod {
    #[inline]
    pub(crate) fn new(method: FieldMethodRef, receiver: Instance) -> BoundMethod {
        BoundMethod { method, receiver }
    }
    /// Get the name of this method
    #[inline]
    pub fn name(&self) -> &str {
        self.method.name()
    }
    /// Get the receiving instance
    #[inline]
    pub fn receiver(&self) -> &Instance {
        &self.receiver
    }
    /// Call this method
    #[inline]
    pub fn call(&self, args: &[Value]) -> Result<Value, Error> {
        self.method.method.invoke(&self.receiver, args)
    }
}

impl From<BoundMethod> for Func {
    fn from(bound: BoundMethod) -> Func {
        Func::new(move |args| bound.call(args))
    }
}

impl From<BoundMethod> for Value {
    #[inline]
    fn from(bound: BoundMethod) -> Value {
        Value::Func(bound.into())
    }
}

/// Check that a method or function received exactly `n` arguments
pub fn expect_args(callee: &str, args: &[Value], n: usize) -> Result<(), Error> {
    if args.len() == n {
        Ok(())
    } else {
        Err(Error::Arity {
            callee: callee.to_owned(),
            expected: n,
            got: args.len(),
        })
    }
}

/// Get the argument at `position` as a function
pub fn expect_func<'a>(callee: &str, args: &'a [Value], position: usize) -> Result<&'a Func, Error> {
    let arg = args.get(position).ok_or_else(|| Error::Arity {
        callee: callee.to_owned(),
        expected: position + 1,
        got: args.len(),
    })?;
    arg.as_func().ok_or_else(|| Error::TypeMismatch {
        callee: callee.to_owned(),
        position,
        expected: Ty::Func.to_string(),
        got: arg.ty().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{values, Declaration};
    use pretty_assertions::assert_eq;

    fn counter() -> SumType {
        Declaration::new("Counter")
            .field("Zero", ())
            .field("Succ", (Ty::Int,))
            .method("value", |this, _, args| {
                expect_args("Counter.value", args, 0)?;
                Ok(match this.as_slice() {
                    [n] => n.clone(),
                    _ => Value::from(0),
                })
            })
            .method("next", |this, adt, args| {
                expect_args("Counter.next", args, 0)?;
                let n = this
                    .get(0)
                    .and_then(Value::as_int)
                    .cloned()
                    .unwrap_or_default();
                adt.field("Succ")?
                    .construct(&[Value::from(n + 1u32)])
                    .map(Value::Instance)
            })
            .declare()
            .unwrap()
    }

    #[test]
    fn methods_are_bound_onto_every_variant() {
        let adt = counter();
        for variant in adt.variants() {
            let names: Vec<_> = variant.methods().map(|m| m.name().to_owned()).collect();
            assert_eq!(names, ["value", "next"]);
        }
        let zero = adt.get("Zero").unwrap().construct(&[]).unwrap();
        let one = zero.call("next", &[]).unwrap();
        assert_eq!(format!("{}", one), "Counter.Succ(1)");
        let one = one.as_instance().unwrap();
        assert_eq!(one.call("value", &[]), Ok(Value::from(1)));
        assert_eq!(zero.call("value", &[]), Ok(Value::from(0)));
    }

    #[test]
    fn unknown_methods_and_bad_arity_fail() {
        let adt = counter();
        let zero = adt.get("Zero").unwrap().construct(&[]).unwrap();
        assert_eq!(
            zero.call("prev", &[]),
            Err(Error::UnknownMethod {
                adt: "Counter".into(),
                name: "prev".into()
            })
        );
        assert_eq!(
            zero.call("value", &values![1]),
            Err(Error::Arity {
                callee: "Counter.value".into(),
                expected: 0,
                got: 1
            })
        );
        assert!(adt.get("Zero").unwrap().method("prev").is_none());
    }

    #[test]
    fn method_refs_check_their_receiver() {
        let adt = counter();
        let zero_ty = adt.get("Zero").unwrap();
        let succ_ty = adt.get("Succ").unwrap();
        let value = succ_ty.method("value").unwrap();
        assert_eq!(value.to_string(), "Counter.Succ.value");
        assert_eq!(value.adt(), &adt);
        let two = succ_ty.construct(&values![2]).unwrap();
        assert_eq!(value.call(&two, &[]), Ok(Value::from(2)));

        let zero = zero_ty.construct(&[]).unwrap();
        assert!(matches!(
            value.call(&zero, &[]),
            Err(Error::TypeMismatch { position: 0, .. })
        ));
        assert!(value.clone().bind(zero).is_err());
        let bound = value.bind(two.clone()).unwrap();
        assert_eq!(bound.receiver(), &two);
        assert_eq!(bound.name(), "value");
    }

    #[test]
    fn bound_methods_become_functions() {
        let adt = counter();
        let zero = adt.get("Zero").unwrap().construct(&[]).unwrap();
        let next = Value::from(zero.method("next").unwrap());
        let one = next.call(&[]).unwrap();
        assert_eq!(
            one,
            Value::from(adt.get("Succ").unwrap().construct(&values![1]).unwrap())
        );
    }

    #[test]
    fn expect_func_reports_position() {
        let f = Value::func(|_| Ok(Value::None));
        let args = [Value::from(1), f.clone()];
        assert_eq!(expect_func("m", &args, 1).ok(), f.as_func());
        assert_eq!(
            expect_func("m", &args, 0),
            Err(Error::TypeMismatch {
                callee: "m".into(),
                position: 0,
                expected: "#func".into(),
                got: "#int".into()
            })
        );
        assert!(matches!(
            expect_func("m", &args, 2),
            Err(Error::Arity { expected: 3, got: 2, .. })
        ));
    }
}
