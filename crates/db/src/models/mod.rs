//! Row structs mapping database rows onto domain types.

pub mod issue;
