/*!
Sum types: declaration, field bases, and the instantiation guard
*/
use crate::typing::Ty;
use crate::value::Value;
use crate::{debug_from_display, display_pretty, Error};
use ahash::RandomState;
use elysees::Arc;
use indexmap::IndexMap;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

mod variant;
pub use variant::*;
mod method;
pub use method::*;
mod predicate;
pub use predicate::*;

/// The size of a small list of expected payload types
pub const SMALL_TYPE_LIST: usize = 4;

/// The expected payload types of a field
pub type TypeList = SmallVec<[Ty; SMALL_TYPE_LIST]>;

/// The declared shape of a field's payload.
///
/// Only `Types` is well formed; declaring a field with any other shape fails with
/// [`Error::MalformedField`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSpec {
    /// An ordered sequence of expected types
    Types(TypeList),
    /// A single type which is not wrapped in a sequence
    Bare(Ty),
    /// A value which is not a type at all
    Opaque(Value),
}

impl FieldSpec {
    /// Get the expected types of this field, if it is well formed
    pub fn types(&self) -> Option<&[Ty]> {
        match self {
            FieldSpec::Types(types) => Some(types),
            _ => None,
        }
    }
}

impl From<()> for FieldSpec {
    #[inline]
    fn from(_: ()) -> FieldSpec {
        FieldSpec::Types(TypeList::new())
    }
}

impl From<Ty> for FieldSpec {
    #[inline]
    fn from(ty: Ty) -> FieldSpec {
        FieldSpec::Bare(ty)
    }
}

impl From<Value> for FieldSpec {
    #[inline]
    fn from(value: Value) -> FieldSpec {
        match value {
            Value::Type(ty) => FieldSpec::Bare(ty),
            value => FieldSpec::Opaque(value),
        }
    }
}

impl From<Vec<Ty>> for FieldSpec {
    #[inline]
    fn from(types: Vec<Ty>) -> FieldSpec {
        FieldSpec::Types(TypeList::from_vec(types))
    }
}

impl From<&[Ty]> for FieldSpec {
    #[inline]
    fn from(types: &[Ty]) -> FieldSpec {
        FieldSpec::Types(types.iter().cloned().collect())
    }
}

macro_rules! tuple_field_spec {
    ($($T:ident),+) => {
        impl<$($T: Into<Ty>),+> From<($($T,)+)> for FieldSpec {
            #[allow(non_snake_case)]
            fn from(($($T,)+): ($($T,)+)) -> FieldSpec {
                FieldSpec::Types(smallvec::smallvec![$($T.into()),+])
            }
        }
    };
}

tuple_field_spec!(A);
tuple_field_spec!(A, B);
tuple_field_spec!(A, B, C);
tuple_field_spec!(A, B, C, D);
tuple_field_spec!(A, B, C, D, E);
tuple_field_spec!(A, B, C, D, E, F);
tuple_field_spec!(A, B, C, D, E, F, G);
tuple_field_spec!(A, B, C, D, E, F, G, H);

/// A declaration of a sum type: a name, an ordered set of fields, and field methods
#[derive(Debug, Clone)]
pub struct Declaration {
    name: String,
    fields: Vec<(String, FieldSpec)>,
    methods: Vec<(String, FieldMethod)>,
}

impl Declaration {
    /// Start declaring a sum type with a given name
    pub fn new<S: Into<String>>(name: S) -> Declaration {
        Declaration {
            name: name.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }
    /// Add a field to this declaration
    pub fn field<S: Into<String>, F: Into<FieldSpec>>(mut self, name: S, spec: F) -> Declaration {
        self.fields.push((name.into(), spec.into()));
        self
    }
    /// Add a field method to this declaration, to be bound onto every variant
    pub fn method<S, F>(mut self, name: S, method: F) -> Declaration
    where
        S: Into<String>,
        F: Fn(&Instance, &SumType, &[Value]) -> Result<Value, Error> + Send + Sync + 'static,
    {
        self.methods.push((name.into(), FieldMethod::new(method)));
        self
    }
    /// Get the name of the sum type being declared
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Declare the sum type
    pub fn declare(self) -> Result<SumType, Error> {
        declare(self.name, self.fields, self.methods)
    }
}

/// Declare a sum type from its name, its fields and its field methods.
///
/// Every field specification is checked before any variant is built, so a failed declaration leaves
/// nothing behind. Declaring the same name twice yields two unrelated sum types.
pub fn declare<N, S, F, M, I, J>(name: N, fields: I, methods: J) -> Result<SumType, Error>
where
    N: Into<String>,
    S: Into<String>,
    F: Into<FieldSpec>,
    M: Into<String>,
    I: IntoIterator<Item = (S, F)>,
    J: IntoIterator<Item = (M, FieldMethod)>,
{
    let name = name.into();
    let mut declared: IndexMap<String, TypeList, RandomState> = IndexMap::default();
    for (field, spec) in fields {
        let field = field.into();
        let types = match spec.into() {
            FieldSpec::Types(types) => types,
            _ => {
                debug!(adt = %name, field = %field, "rejected malformed field");
                return Err(Error::MalformedField { adt: name, field });
            }
        };
        if declared.contains_key(&field) {
            return Err(Error::DuplicateMember { adt: name, name: field });
        }
        declared.insert(field, types);
    }
    let mut bound: IndexMap<String, FieldMethod, RandomState> = IndexMap::default();
    for (method, body) in methods {
        let method = method.into();
        if bound.contains_key(&method) {
            return Err(Error::DuplicateMember { adt: name, name: method });
        }
        bound.insert(method, body);
    }

    let fields = declared
        .into_iter()
        .map(|(field, types)| {
            let data = make_variant(&name, field, types);
            (data.name().to_owned(), data)
        })
        .collect();
    let adt = SumType(Arc::new(SumData {
        name,
        fields,
        methods: bound,
    }));
    debug!(
        adt = %adt.name(),
        fields = adt.0.fields.len(),
        methods = adt.0.methods.len(),
        "declared sum type"
    );
    Ok(adt)
}

/// The shared, immutable description of a sum type
struct SumData {
    name: String,
    fields: IndexMap<String, VariantData, RandomState>,
    methods: IndexMap<String, FieldMethod, RandomState>,
}

/// A sum type.
///
/// Handles are cheap to clone; two handles are equal only if they come from the same declaration.
#[derive(Clone)]
pub struct SumType(Arc<SumData>);

debug_from_display!(SumType);
display_pretty!(SumType);

impl PartialEq for SumType {
    #[inline]
    fn eq(&self, other: &SumType) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SumType {}

impl Hash for SumType {
    #[inline]
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        std::ptr::hash(&*self.0, hasher)
    }
}

impl SumType {
    /// Get the name of this sum type
    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }
    /// Get the field base shared by the variants of this sum type
    #[inline]
    pub fn field_base(&self) -> FieldBase {
        FieldBase { adt: self.clone() }
    }
    /// Get the number of fields of this sum type
    #[inline]
    pub fn len(&self) -> usize {
        self.0.fields.len()
    }
    /// Check whether this sum type has no fields
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.fields.is_empty()
    }
    /// Get the variant type of a field, if any
    pub fn get(&self, field: &str) -> Option<VariantType> {
        self.0
            .fields
            .get_full(field)
            .map(|(ix, _, _)| VariantType::new(self.clone(), ix))
    }
    /// Get the variant type of a field, failing if there is none
    pub fn field(&self, field: &str) -> Result<VariantType, Error> {
        self.get(field).ok_or_else(|| Error::UnknownField {
            adt: self.name().to_owned(),
            name: field.to_owned(),
        })
    }
    /// Iterate over the variant types of this sum type, in declaration order
    pub fn variants(&self) -> impl Iterator<Item = VariantType> + '_ {
        (0..self.len()).map(move |ix| VariantType::new(self.clone(), ix))
    }
    /// Iterate over the names of the field methods of this sum type, in declaration order
    pub fn method_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.methods.keys().map(String::as_str)
    }
    /// Get a field method by name
    pub(crate) fn get_method(&self, name: &str) -> Option<&FieldMethod> {
        self.0.methods.get(name)
    }
    /// Get the data of the variant at a given index
    pub(crate) fn variant_data(&self, ix: usize) -> &VariantData {
        &self.0.fields[ix]
    }
    /// Check whether an object is one of this sum type's variant types or variant instances.
    ///
    /// Anything else, including this sum type itself and its field base, is not a member.
    pub fn is_field<M: Member + ?Sized>(&self, item: &M) -> bool {
        item.owner().map(|adt| adt == self).unwrap_or(false)
    }
    /// Membership test: an alias for [`is_field`](SumType::is_field)
    #[inline]
    pub fn contains<M: Member + ?Sized>(&self, item: &M) -> bool {
        self.is_field(item)
    }
    /// Sum types cannot be instantiated: this always fails with [`Error::IllegalInstantiation`]
    pub fn construct(&self, _args: &[Value]) -> Result<Instance, Error> {
        Err(Error::IllegalInstantiation(self.name().to_owned()))
    }
    /// Get a displayable declaration of this sum type's fields
    pub fn signature(&self) -> Signature {
        Signature(self)
    }
}

/// The field base of a sum type: the common ancestor of all of its variant types.
///
/// Field bases cannot be instantiated.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct FieldBase {
    adt: SumType,
}

debug_from_display!(FieldBase);
display_pretty!(FieldBase);

impl FieldBase {
    /// Get the sum type this is the field base of
    #[inline]
    pub fn adt(&self) -> &SumType {
        &self.adt
    }
    /// Field bases cannot be instantiated: this always fails with [`Error::IllegalInstantiation`]
    pub fn construct(&self, _args: &[Value]) -> Result<Instance, Error> {
        trace!(adt = %self.adt.name(), "refused to instantiate field base");
        Err(Error::IllegalInstantiation(self.to_string()))
    }
}

/// The declaration of a sum type's fields, displayed in the textual declaration syntax
#[derive(Debug, Copy, Clone)]
pub struct Signature<'a>(&'a SumType);

impl Display for Signature<'_> {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        use crate::prettyprinter::tokens::*;
        write!(fmt, "{} {} {}", KEYWORD_ADT, self.0.name(), SCOPE_OPEN)?;
        if self.0.is_empty() {
            return write!(fmt, "{}", SCOPE_CLOSE);
        }
        let fields = self.0.variants().format_with(FIELD_SEP, |variant, f| {
            f(&format_args!(
                "{}{} {}{}{}",
                variant.name(),
                JUDGE_TYPE,
                TUPLE_OPEN,
                variant.types().iter().format(ARG_SEP),
                TUPLE_CLOSE
            ))
        });
        write!(fmt, " {} {}", fields, SCOPE_CLOSE)
    }
}
