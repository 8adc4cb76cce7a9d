//! Canonical names for standard-library types.
//!
//! Source code refers to standard types by several aliases (`Schema` vs
//! `System.Schema`); the resolver normalizes through this table before
//! querying so that all aliases land on one canonical defining type.

/// Canonical name of the `Schema` system class, the one standard receiver
/// the dispatcher special-cases.
pub const SYSTEM_SCHEMA: &str = "System.Schema";

const ALIASES: &[(&str, &str)] = &[
    ("schema", SYSTEM_SCHEMA),
    ("system.schema", SYSTEM_SCHEMA),
    ("database", "System.Database"),
    ("system.database", "System.Database"),
    ("limits", "System.Limits"),
    ("system.limits", "System.Limits"),
    ("math", "System.Math"),
    ("system.math", "System.Math"),
    ("userinfo", "System.UserInfo"),
    ("system.userinfo", "System.UserInfo"),
    ("test", "System.Test"),
    ("system.test", "System.Test"),
];

/// Normalize `name` to its canonical form. Names outside the alias table
/// pass through unchanged.
pub fn canonical_name(name: &str) -> String {
    let folded = name.to_ascii_lowercase();
    for (alias, canonical) in ALIASES {
        if folded == *alias {
            return (*canonical).to_string();
        }
    }
    name.to_string()
}

/// Whether `name` is an alias of `System.Schema`.
pub fn is_system_schema(name: &str) -> bool {
    canonical_name(name).eq_ignore_ascii_case(SYSTEM_SCHEMA)
}
