//! Application intake: the submission workflow and the admin read view.

pub mod admin;
pub mod ids;
pub mod workflow;

pub use admin::{AdminView, Dashboard, Origin, Summary};
pub use ids::LocalIdGenerator;
pub use workflow::{Source, Submission, SubmissionWorkflow, SubmitError};
