//! Row models and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where rows are inserted directly, a `Deserialize` create DTO.

pub mod answer;
pub mod participant;
pub mod participant_field;
pub mod question;
pub mod survey;
