//! State Management
//!
//! Signals mirroring the controller's rendered state.

pub mod global;

pub use global::{provide_global_state, GlobalState};
