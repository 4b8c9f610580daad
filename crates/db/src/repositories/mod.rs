//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod answer_repo;
pub mod participant_field_repo;
pub mod participant_repo;
pub mod question_repo;
pub mod roster_repo;
pub mod submission_repo;
pub mod survey_repo;

pub use answer_repo::AnswerRepo;
pub use participant_field_repo::ParticipantFieldRepo;
pub use participant_repo::ParticipantRepo;
pub use question_repo::QuestionRepo;
pub use roster_repo::RosterRepo;
pub use submission_repo::SubmissionRepo;
pub use survey_repo::SurveyRepo;
