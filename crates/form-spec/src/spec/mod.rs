pub mod field;
pub mod form;
pub mod required;

pub use field::{FieldOption, FieldPresentation, FieldSpec, FieldType, ValidationRule};
pub use form::FormSpec;
pub use required::{Required, RequiredFn};
