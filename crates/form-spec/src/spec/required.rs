use std::fmt;

use schemars::JsonSchema;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::values::FormValues;

/// Predicate deciding requiredness from a snapshot of the current values.
pub type RequiredFn = fn(&FormValues) -> bool;

/// Whether a field must be filled before the form is valid.
#[derive(Clone, Copy)]
pub enum Required {
    Static(bool),
    Dynamic {
        depends_on: &'static [&'static str],
        predicate: RequiredFn,
    },
}

impl Required {
    pub fn evaluate(&self, values: &FormValues) -> bool {
        match self {
            Required::Static(flag) => *flag,
            Required::Dynamic { predicate, .. } => predicate(values),
        }
    }

    pub fn depends_on(&self) -> &[&str] {
        match self {
            Required::Static(_) => &[],
            Required::Dynamic { depends_on, .. } => *depends_on,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Required::Dynamic { .. })
    }
}

impl Default for Required {
    fn default() -> Self {
        Required::Static(false)
    }
}

impl From<bool> for Required {
    fn from(flag: bool) -> Self {
        Required::Static(flag)
    }
}

impl fmt::Debug for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Required::Static(flag) => f.debug_tuple("Static").field(flag).finish(),
            Required::Dynamic { depends_on, .. } => f
                .debug_struct("Dynamic")
                .field("depends_on", depends_on)
                .finish_non_exhaustive(),
        }
    }
}

impl Serialize for Required {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Required::Static(flag) => serializer.serialize_bool(*flag),
            Required::Dynamic { depends_on, .. } => {
                let mut state = serializer.serialize_struct("Required", 2)?;
                state.serialize_field("depends_on", depends_on)?;
                state.serialize_field("dynamic", &true)?;
                state.end()
            }
        }
    }
}

/// Schema shape of the serialized [`Required`] value.
///
/// Never constructed: it only backs `#[schemars(with)]` on `FieldSpec::required`,
/// so it must mirror the hand-written `Serialize` impl above.
#[allow(dead_code)]
#[derive(JsonSchema)]
#[serde(untagged)]
pub(crate) enum RequiredSchema {
    Static(bool),
    Dynamic { depends_on: Vec<String>, dynamic: bool },
}
