/*!
Miscellaneous utilities and macros used throughout the crate
*/

/// Quickly implement `Display` using a given function
#[macro_export]
macro_rules! quick_display {
    ($t:ty, $s:ident, $fmt:ident => $e:expr) => {
        impl std::fmt::Display for $t {
            fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
                let $s = self;
                let $fmt = fmt;
                $e
            }
        }
    };
}

/// Implement `Debug` for a type which implements `Display`
#[macro_export]
macro_rules! debug_from_display {
    ($t:ty) => {
        impl std::fmt::Debug for $t {
            fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
                std::fmt::Display::fmt(self, fmt)
            }
        }
    };
}

/// Implement `Display` for a type using a default prettyprinter
#[macro_export]
macro_rules! display_pretty {
    ($t:ty) => {
        impl std::fmt::Display for $t {
            fn fmt(&self, fmt: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
                let mut printer = $crate::prettyprinter::PrettyPrinter::default();
                $crate::prettyprinter::PrettyPrint::prettyprint(self, &mut printer, fmt)
            }
        }
    };
}

/// Implement `From<T> for E` and implement `TryFrom<E> for T>` where `T` is an enum variant of `E`
#[macro_export]
macro_rules! enum_convert {
    (impl From<$T:ty> for $E:ty { $f:expr }) => {
        impl From<$T> for $E {
            fn from(v: $T) -> $E { $f(v) }
        }
    };
    (impl From<$T:ident> for $E:ident {}) => {
        $crate::enum_convert!(
            impl From<$T> for $E { $E::$T }
        );
    };
    (impl TryFrom<$E:ident> for $T:ty { $($p:path),+ }) => {
        impl std::convert::TryFrom<$E> for $T {
            type Error = $E;
            fn try_from(v: $E) -> Result<$T, $E> {
                #[allow(unreachable_patterns)]
                match v {
                    $($p(v) => Ok(v),)+
                    e => Err(e)
                }
            }
        }
    };
    (impl TryFrom<$E:ident> for $T:ident {}) => {
        $crate::enum_convert!(
            impl TryFrom<$E> for $T { $E::$T }
        );
    };
    ($(impl Injection<$E:ident> for $T:ident {})*) => {
        $(
            $crate::enum_convert!(impl From<$T> for $E {});
            $crate::enum_convert!(impl TryFrom<$E> for $T {});
        )*
    }
}

/// Build an array of [`Value`](crate::Value)s from anything convertible into one
///
/// # Example
/// ```rust
/// use adt::{values, Value};
/// let args = values![1, false, "hi", ()];
/// assert_eq!(args.len(), 4);
/// assert_eq!(args[3], Value::None);
/// ```
#[macro_export]
macro_rules! values {
    ($($e:expr),* $(,)?) => {
        [$($crate::value::Value::from($e)),*]
    };
}
