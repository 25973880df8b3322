/*!
An optional value: `Some(x)` or `Empty()`
*/
use crate::adt::{expect_args, expect_func, Declaration, Instance, SumType};
use crate::typing::Ty;
use crate::value::Value;
use crate::Error;
use once_cell::sync::Lazy;

/// The name of the `Some` field of [`OPTION`]
pub const SOME: &str = "Some";

/// The name of the `Empty` field of [`OPTION`]
pub const EMPTY: &str = "Empty";

/// The optional value sum type, with fields `Some: (#object)` and `Empty: ()`.
///
/// Field methods:
/// - `map(f)`: `Some(f(x))` for `Some(x)`, otherwise unchanged
/// - `and_then(f)`: `f(x)` for `Some(x)`, otherwise unchanged
/// - `with_default(d)`: unchanged for `Some(x)`, otherwise `Some(d)`
pub static OPTION: Lazy<SumType> = Lazy::new(|| {
    Declaration::new("Option")
        .field(SOME, (Ty::Object,))
        .field(EMPTY, ())
        .method("map", option_map)
        .method("and_then", option_and_then)
        .method("with_default", option_with_default)
        .declare()
        .expect("the option declaration is well formed")
});

/// Construct `Option.Some(value)`
pub fn some<V: Into<Value>>(value: V) -> Instance {
    wrap(&OPTION, SOME, value.into())
}

/// Construct `Option.Empty()`
pub fn empty() -> Instance {
    wrap(&OPTION, EMPTY, Value::None)
}

/// Construct a single-element or zero-element variant of a prelude sum type
pub(super) fn wrap(adt: &SumType, field: &str, value: Value) -> Instance {
    let variant = adt
        .get(field)
        .expect("prelude sum types declare their fields");
    let result = if variant.arity() == 0 {
        variant.construct(&[])
    } else {
        variant.construct(&[value])
    };
    result.expect("prelude fields accept any object")
}

fn option_map(this: &Instance, adt: &SumType, args: &[Value]) -> Result<Value, Error> {
    expect_args("Option.map", args, 1)?;
    let f = expect_func("Option.map", args, 0)?;
    match this.as_slice() {
        [x] if this.name() == SOME => {
            let mapped = f.call(&[x.clone()])?;
            Ok(adt.field(SOME)?.construct(&[mapped])?.into())
        }
        _ => Ok(this.clone().into()),
    }
}

fn option_and_then(this: &Instance, _: &SumType, args: &[Value]) -> Result<Value, Error> {
    expect_args("Option.and_then", args, 1)?;
    let f = expect_func("Option.and_then", args, 0)?;
    match this.as_slice() {
        [x] if this.name() == SOME => f.call(&[x.clone()]),
        _ => Ok(this.clone().into()),
    }
}

fn option_with_default(this: &Instance, adt: &SumType, args: &[Value]) -> Result<Value, Error> {
    expect_args("Option.with_default", args, 1)?;
    if this.name() == SOME {
        Ok(this.clone().into())
    } else {
        Ok(adt.field(SOME)?.construct(&args[..1])?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values;
    use num::Integer;
    use pretty_assertions::assert_eq;

    #[test]
    fn option_fields() {
        assert_eq!(
            OPTION.signature().to_string(),
            "#adt Option { Some: (#object); Empty: () }"
        );
        assert_eq!(some(1).to_string(), "Option.Some(1)");
        assert_eq!(empty().to_string(), "Option.Empty()");
        assert!(OPTION.contains(&some(())));
        assert_eq!(some(5), some(5));
        assert_ne!(some(5), empty());
    }

    #[test]
    fn map_applies_only_to_some() {
        let double = Value::func(|args| match args {
            [Value::Int(i)] => Ok(Value::Int(i * 2u32)),
            _ => Err(Error::msg("expected an integer")),
        });
        assert_eq!(some(4).call("map", &[double.clone()]), Ok(Value::from(some(8))));
        assert_eq!(empty().call("map", &[double.clone()]), Ok(Value::from(empty())));
        assert_eq!(
            some("x").call("map", &[double]),
            Err(Error::msg("expected an integer"))
        );
        assert!(matches!(
            some(4).call("map", &values![4]),
            Err(Error::TypeMismatch { position: 0, .. })
        ));
    }

    #[test]
    fn and_then_and_with_default() {
        let halve = Value::func(|args| match args {
            [Value::Int(i)] if i.is_even() => Ok(Value::from(some(i / 2u32))),
            _ => Ok(Value::from(empty())),
        });
        assert_eq!(some(4).call("and_then", &[halve.clone()]), Ok(Value::from(some(2))));
        assert_eq!(some(3).call("and_then", &[halve.clone()]), Ok(Value::from(empty())));
        assert_eq!(empty().call("and_then", &[halve]), Ok(Value::from(empty())));
        assert_eq!(empty().call("with_default", &values![7]), Ok(Value::from(some(7))));
        assert_eq!(some(1).call("with_default", &values![7]), Ok(Value::from(some(1))));
        assert!(matches!(
            some(1).call("with_default", &[]),
            Err(Error::Arity { expected: 1, got: 0, .. })
        ));
    }
}
