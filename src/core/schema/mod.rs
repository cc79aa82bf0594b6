//! Structural reads of object-definition sources, built on the lexer.

mod fields;
mod options;

pub use fields::{extract_fields, fields_block_keys, is_convertible_key, FieldKey};
pub use options::{find_select_fields, OptionValue, SelectField, SelectKind};
