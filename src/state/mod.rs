//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `DetailState`: the fetch state of a single detail item

mod detail_state;

pub use detail_state::DetailState;
