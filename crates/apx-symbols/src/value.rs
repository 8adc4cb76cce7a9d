//! Approximate runtime values.
//!
//! Abstract interpretation produces a best-effort, possibly-indeterminate
//! estimate of what a variable holds at a program point. The resolver only
//! needs the value's defining type; the variants exist because the
//! dispatcher treats them differently (instance methods resolve on
//! class-instance, standard and loop values but not on a bare static
//! scope).

/// Best-effort runtime value estimate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApproxValue {
    /// An instance of a user-defined class.
    ClassInstance { type_name: String },
    /// A value of a standard-library type.
    Standard { type_name: String },
    /// The iteration value of a loop over a typed collection.
    Loop { element_type: Option<String> },
    /// Unknown value; the declared type may still be known.
    Indeterminate { declared_type: Option<String> },
}

impl ApproxValue {
    /// The type this value's methods resolve against, when known.
    pub fn defining_type(&self) -> Option<&str> {
        match self {
            ApproxValue::ClassInstance { type_name } | ApproxValue::Standard { type_name } => {
                Some(type_name)
            }
            ApproxValue::Loop { element_type } => element_type.as_deref(),
            ApproxValue::Indeterminate { declared_type } => declared_type.as_deref(),
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, ApproxValue::Indeterminate { .. })
    }
}
