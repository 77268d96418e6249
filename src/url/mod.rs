//! URL handling module for Home-Harvest
//!
//! Detail pages are stored under an identifier derived from their URL.

mod identifier;

pub use identifier::extract_id;
