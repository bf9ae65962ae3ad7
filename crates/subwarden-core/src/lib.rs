pub mod catalogue;
pub mod extract;
pub mod fields;
pub mod form;
pub mod record;

pub use extract::extract_profile;
pub use fields::{Field, FieldError};
pub use form::{
    ApplicantInfo, CompletionDetails, ExtractedProfile, FormState, UploadedDocument,
    ValidationError,
};
pub use record::{ApplicationRecord, RecordId, StoredApplication};
