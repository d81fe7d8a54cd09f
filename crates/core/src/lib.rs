//! Domain layer of the issue tracker: types, validation, partial-update
//! merge, query filters, the record store seam and the issue service.

pub mod error;
pub mod filter;
pub mod issue;
pub mod service;
pub mod store;
pub mod types;
