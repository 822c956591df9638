//! Terminal progress affordances.

pub mod progress;

pub use progress::create_spinner;
