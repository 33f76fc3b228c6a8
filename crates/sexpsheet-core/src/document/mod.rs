//! Worksheet state and operations.

mod io;
mod ops;
mod state;

pub use state::Worksheet;
