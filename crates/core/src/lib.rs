//! Survey response validation and analytics.
//!
//! Pure logic only: nothing in this crate touches the database. Callers
//! load definitions and recorded answers through `survey-db` and hand them
//! to the functions here.

pub mod analytics;
pub mod error;
pub mod roster;
pub mod submission;
pub mod survey;
pub mod text_analysis;
pub mod types;
