/*!
Commonly used sum types, declared lazily on first use
*/

mod option;
pub use option::*;
mod result;
pub use result::*;
