/*!
A prettyprinter for sum types, variant types and their values
*/

mod printer;
pub use printer::*;

pub mod tokens;
