//! Roster refresh from the ProPublica Congress API.

pub mod api;
pub mod roster;

pub use api::{CongressApi, CongressSettings};
pub use roster::refresh_roster;
