// src/process/mod.rs
//! Sheet rows → project cards.

pub mod normalize;
pub mod rows;
pub mod status;
pub mod utils;

pub use normalize::{normalize_rows, normalize_rows_at, ProjectRecord};
pub use rows::{parse_rows, RawRow};
pub use status::ApprovalStatus;
