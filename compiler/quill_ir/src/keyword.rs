//! Reserved spellings of the Quill surface syntax.

/// Ordinary class declaration: `(class Name [inherits Super] ...)`.
pub const CLASS: &str = "class";
/// Template class declaration: `(tclass Name (Param...) ...)`.
pub const TEMPLATE_CLASS: &str = "tclass";
pub const INHERITS: &str = "inherits";
pub const FIELD: &str = "field";
pub const METHOD: &str = "method";

pub const INT: &str = "int";
pub const BOOL: &str = "bool";
pub const STRING: &str = "string";
/// Return type of methods that produce no value.
pub const VOID: &str = "void";

pub const NULL: &str = "null";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";

/// Class instantiated when a program starts.
pub const MAIN_CLASS: &str = "main";
/// Method invoked on the main object.
pub const MAIN_METHOD: &str = "main";

/// Separator between a template name and its arguments (`Node@int`).
pub const TEMPLATE_SEPARATOR: char = '@';
