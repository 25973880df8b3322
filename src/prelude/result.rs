/*!
The result of a fallible computation: `Ok(x)` or `Error(e)`
*/
use super::option::{wrap, OPTION, SOME};
use crate::adt::{expect_args, expect_func, Declaration, Instance, SumType};
use crate::typing::Ty;
use crate::value::Value;
use crate::Error;
use once_cell::sync::Lazy;

/// The name of the `Ok` field of [`RESULT`]
pub const OK: &str = "Ok";

/// The name of the `Error` field of [`RESULT`]
pub const ERROR: &str = "Error";

/// The result sum type, with fields `Ok: (#object)` and `Error: (#object)`.
///
/// Field methods:
/// - `map(f)`: `Ok(f(x))` for `Ok(x)`, otherwise unchanged
/// - `map_error(f)`: `Error(f(e))` for `Error(e)`, otherwise unchanged
/// - `and_then(f)`: `f(x)` for `Ok(x)`, otherwise unchanged
/// - `with_default(d)`: unchanged for `Ok(x)`, otherwise `Ok(d)`
/// - `to_option()`: `Option.Some(x)` for `Ok(x)`, otherwise `Option.Empty()`
pub static RESULT: Lazy<SumType> = Lazy::new(|| {
    Declaration::new("Result")
        .field(OK, (Ty::Object,))
        .field(ERROR, (Ty::Object,))
        .method("map", result_map)
        .method("map_error", result_map_error)
        .method("and_then", result_and_then)
        .method("with_default", result_with_default)
        .method("to_option", result_to_option)
        .declare()
        .expect("the result declaration is well formed")
});

/// Construct `Result.Ok(value)`
pub fn ok<V: Into<Value>>(value: V) -> Instance {
    wrap(&RESULT, OK, value.into())
}

/// Construct `Result.Error(error)`
pub fn error<V: Into<Value>>(error: V) -> Instance {
    wrap(&RESULT, ERROR, error.into())
}

/// Convert an optional value into a result: `Ok(x)` for `Option.Some(x)`, otherwise `Error(error)`
pub fn from_option<V: Into<Value>>(option: &Value, error: V) -> Instance {
    match option.as_instance() {
        Some(some) if some.adt() == &*OPTION && some.name() == SOME => {
            wrap(&RESULT, OK, some[0].clone())
        }
        _ => wrap(&RESULT, ERROR, error.into()),
    }
}

/// Apply the function at `args[0]` to the payload of `this` if it is of field `field`
fn map_field(
    this: &Instance,
    adt: &SumType,
    field: &str,
    callee: &str,
    args: &[Value],
) -> Result<Value, Error> {
    expect_args(callee, args, 1)?;
    let f = expect_func(callee, args, 0)?;
    match this.as_slice() {
        [x] if this.name() == field => {
            let mapped = f.call(&[x.clone()])?;
            Ok(adt.field(field)?.construct(&[mapped])?.into())
        }
        _ => Ok(this.clone().into()),
    }
}

fn result_map(this: &Instance, adt: &SumType, args: &[Value]) -> Result<Value, Error> {
    map_field(this, adt, OK, "Result.map", args)
}

fn result_map_error(this: &Instance, adt: &SumType, args: &[Value]) -> Result<Value, Error> {
    map_field(this, adt, ERROR, "Result.map_error", args)
}

fn result_and_then(this: &Instance, _: &SumType, args: &[Value]) -> Result<Value, Error> {
    expect_args("Result.and_then", args, 1)?;
    let f = expect_func("Result.and_then", args, 0)?;
    match this.as_slice() {
        [x] if this.name() == OK => f.call(&[x.clone()]),
        _ => Ok(this.clone().into()),
    }
}

fn result_with_default(this: &Instance, adt: &SumType, args: &[Value]) -> Result<Value, Error> {
    expect_args("Result.with_default", args, 1)?;
    if this.name() == OK {
        Ok(this.clone().into())
    } else {
        Ok(adt.field(OK)?.construct(&args[..1])?.into())
    }
}

fn result_to_option(this: &Instance, _: &SumType, args: &[Value]) -> Result<Value, Error> {
    expect_args("Result.to_option", args, 0)?;
    match this.as_slice() {
        [x] if this.name() == OK => Ok(super::some(x.clone()).into()),
        _ => Ok(super::empty().into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{empty, some};
    use crate::values;
    use num::BigInt;
    use pretty_assertions::assert_eq;

    fn do_something() -> Value {
        Value::func(|args| match args {
            [Value::Int(value)] if value >= &BigInt::from(0) => {
                Ok(ok(value >= &BigInt::from(100)).into())
            }
            [Value::Int(_)] => Ok(error("Negative value").into()),
            _ => Err(Error::msg("expected an integer")),
        })
    }

    #[test]
    fn and_then_chains_ok_values() {
        let f = do_something();
        let and_then = |r: Instance| r.call("and_then", &[f.clone()]);
        assert_eq!(and_then(ok(1)), Ok(Value::from(ok(false))));
        assert_eq!(and_then(ok(100)), Ok(Value::from(ok(true))));
        assert_eq!(and_then(ok(-1)), Ok(Value::from(error("Negative value"))));
        assert_eq!(and_then(error("err")), Ok(Value::from(error("err"))));
        assert_eq!(and_then(ok("x")), Err(Error::msg("expected an integer")));
    }

    #[test]
    fn map_and_map_error_touch_one_side() {
        let len = Value::func(|args| match args {
            [Value::Str(s)] => Ok(s.len().into()),
            _ => Err(Error::msg("expected a string")),
        });
        assert_eq!(
            ok("four").call("map", &[len.clone()]),
            Ok(Value::from(ok(4)))
        );
        assert_eq!(
            error("four").call("map", &[len.clone()]),
            Ok(Value::from(error("four")))
        );
        assert_eq!(
            error("four").call("map_error", &[len.clone()]),
            Ok(Value::from(error(4)))
        );
        assert_eq!(
            ok("four").call("map_error", &[len]),
            Ok(Value::from(ok("four")))
        );
    }

    #[test]
    fn defaults_and_conversions() {
        assert_eq!(
            error("e").call("with_default", &values![0]),
            Ok(Value::from(ok(0)))
        );
        assert_eq!(
            ok(1).call("with_default", &values![0]),
            Ok(Value::from(ok(1)))
        );
        assert_eq!(ok(1).call("to_option", &[]), Ok(Value::from(some(1))));
        assert_eq!(error(1).call("to_option", &[]), Ok(Value::from(empty())));
        assert_eq!(from_option(&some(3).into(), "missing"), ok(3));
        assert_eq!(from_option(&empty().into(), "missing"), error("missing"));
        assert_eq!(from_option(&Value::from(3), "missing"), error("missing"));
    }

    #[test]
    fn result_and_option_are_distinct() {
        assert!(RESULT.contains(&ok(1)));
        assert!(!OPTION.contains(&ok(1)));
        assert_ne!(Value::from(ok(1)), Value::from(some(1)));
        assert_eq!(
            RESULT.signature().to_string(),
            "#adt Result { Ok: (#object); Error: (#object) }"
        );
    }
}
