/*!
The basic tokens making up the textual representation of sum types and their values
*/

/// The special characters, including whitespace
pub const SPECIAL_CHARACTERS: &str = " \t\r\n#()[]{},\"\':.;/=!<>";

/// The whitespace characters
pub const WHITESPACE: &str = " \t\r\n";

/// The path separator character
pub const PATH_SEP: &str = ".";

/// The typing judgement character
pub const JUDGE_TYPE: &str = ":";

/// The assignment character
pub const ASSIGN: &str = "=";

/// The keyword for `let`-statements
pub const KEYWORD_LET: &str = "#let";

/// The keyword for sum type declarations
pub const KEYWORD_ADT: &str = "#adt";

/// The keyword for membership tests
pub const KEYWORD_IN: &str = "#in";

/// The keyword for `true`
pub const KEYWORD_TRUE: &str = "#true";

/// The keyword for `false`
pub const KEYWORD_FALSE: &str = "#false";

/// The keyword for the null value and the null marker type
pub const KEYWORD_NONE: &str = "#none";

/// The keyword for the top type
pub const KEYWORD_OBJECT: &str = "#object";

/// The keyword for the boolean type
pub const KEYWORD_BOOL: &str = "#bool";

/// The keyword for the integer type
pub const KEYWORD_INT: &str = "#int";

/// The keyword for the float type
pub const KEYWORD_FLOAT: &str = "#float";

/// The keyword for the string type
pub const KEYWORD_STR: &str = "#str";

/// The keyword for the type of types
pub const KEYWORD_TYPE: &str = "#type";

/// The keyword for the type of functions
pub const KEYWORD_FUNC: &str = "#func";

/// The equality operator
pub const OP_EQ: &str = "==";

/// The inequality operator
pub const OP_NE: &str = "!=";

/// The delimiter for statements
pub const STATEMENT_DELIM: &str = ";";

/// The delimiter between the fields of a declaration
pub const FIELD_DELIM: &str = ";";

/// The separator printed between the fields of a declaration
pub const FIELD_SEP: &str = "; ";

/// The delimiter between arguments
pub const ARG_DELIM: &str = ",";

/// The separator printed between arguments
pub const ARG_SEP: &str = ", ";

/// The delimiter for single-line comments
pub const SINGLE_COMMENT_START: &str = "//";

/// The opening delimiter for a multi-line comment
pub const MULTI_COMMENT_OPEN: &str = "/*";

/// The closing delimiter for a multi-line comment
pub const MULTI_COMMENT_CLOSE: &str = "*/";

/// The opening delimiter for a tuple of types or arguments
pub const TUPLE_OPEN: &str = "(";

/// The closing delimiter for a tuple of types or arguments
pub const TUPLE_CLOSE: &str = ")";

/// The opening delimiter for an index
pub const INDEX_OPEN: &str = "[";

/// The closing delimiter for an index
pub const INDEX_CLOSE: &str = "]";

/// The opening delimiter for a scope
pub const SCOPE_OPEN: &str = "{";

/// The closing delimiter for a scope
pub const SCOPE_CLOSE: &str = "}";

/// The suffix of a field base's name
pub const FIELD_BASE_SUFFIX: &str = "Field";

/// The representation of an elided value
pub const ELIDED: &str = "...";

/// The representation of a function value
pub const FUNC_REPR: &str = "<func>";
