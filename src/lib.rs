/*!
`adt` provides algebraic data types for a dynamically typed value model.

A sum type is declared at run time from an ordered set of named fields, each carrying an ordered tuple
of expected payload types. Declaration synthesises one variant type per field; every variant is a
subtype of both the sum type and a private field-base type, checks the arity and types of its payload
on construction, and produces immutable instances with structural equality, iteration and indexing.
Field methods declared alongside the fields are bound onto every variant and receive the instance and
its owning sum type, so their bodies can branch on which variant they were called on.

```rust
use adt::{values, Declaration, Ty};

let my_adt = Declaration::new("MyADT")
    .field("foo", ())
    .field("bar", (Ty::Int,))
    .field("baz", (Ty::Int, Ty::Bool, Ty::Str, Ty::None))
    .declare()
    .unwrap();
let bar = my_adt.get("bar").unwrap();
let one = bar.construct(&values![1]).unwrap();
assert_eq!(one, bar.construct(&values![1]).unwrap());
assert_ne!(one, bar.construct(&values![2]).unwrap());
assert_eq!(format!("{}", one), "MyADT.bar(1)");
assert!(my_adt.contains(&one));
assert!(!my_adt.contains(&my_adt));
```
*/
#![forbid(unsafe_code, missing_docs, missing_debug_implementations)]

pub mod util;

mod error;
pub use error::Error;

pub mod adt;
pub use adt::{
    declare, is_adt, is_adt_field, BoundMethod, Declaration, FieldBase, FieldMethod,
    FieldMethodRef, FieldSpec, Instance, Member, SumType, VariantType,
};

pub mod typing;
pub use typing::{Ty, Typed};

pub mod value;
pub use value::{Func, Value};

pub mod prelude;
pub mod prettyprinter;

#[cfg(feature = "parser")]
pub mod parser;
