//! SQLite-backed storage implementation.

mod bases;
mod colorants;
mod formulas;
pub mod schema;
mod store;
mod transaction;

pub use store::SqliteStore;
