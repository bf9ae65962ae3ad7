//! Multi-step form state and the checks that gate a submission.
//!
//! The UI collects three steps: applicant details with leadership roles, a
//! single PDF upload (from which a profile may be extracted), and the
//! completion step with position, motivation and terms. [`FormState`] is the
//! assembled result handed to the submission workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{
    ApplicationRecord, DEFAULT_MOTIVATION, DEFAULT_POSITION, FALLBACK_EMAIL, FALLBACK_NAME,
};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
/// Upload limit for the combined application PDF (10 MiB).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no document was uploaded; please upload your application PDF first")]
    MissingDocument,
    #[error("uploaded document {0:?} is not a PDF")]
    NotPdf(String),
    #[error("uploaded document is {size} bytes; the limit is {limit} bytes")]
    DocumentTooLarge { size: u64, limit: u64 },
    #[error("the terms and conditions must be accepted")]
    TermsNotAccepted,
    #[error("the motivation text must not be empty")]
    EmptyMotivation,
}

/// Step 1: personal details and leadership experience.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantInfo {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone: String,
    pub student_number: String,
    /// Checkbox labels, in the order they were ticked.
    pub leadership_roles: Vec<String>,
    pub other_role: Option<String>,
}

/// Step 2: metadata of the uploaded document. Contents are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size_bytes: u64,
}

impl UploadedDocument {
    pub fn pdf(file_name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: Some(PDF_CONTENT_TYPE.to_string()),
            size_bytes,
        }
    }

    /// A declared content type wins; otherwise the file extension decides.
    pub fn is_pdf(&self) -> bool {
        match self.content_type.as_deref() {
            Some(ct) => ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE),
            None => self.file_name.to_ascii_lowercase().ends_with(".pdf"),
        }
    }
}

/// Step 2 output: fields pre-filled from the uploaded CV.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedProfile {
    pub experience: Vec<String>,
    pub leadership: Vec<String>,
    pub profile_summary: String,
    pub education: Vec<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Step 3: position, motivation and terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionDetails {
    pub position_applied_for: String,
    pub why_interested: String,
    pub terms_accepted: bool,
}

/// Everything collected across the form steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub applicant: ApplicantInfo,
    pub document: Option<UploadedDocument>,
    pub extracted: ExtractedProfile,
    pub completion: CompletionDetails,
}

impl FormState {
    /// Check the submission preconditions, returning the attached document.
    pub fn validate(&self) -> Result<&UploadedDocument, ValidationError> {
        let document = self
            .document
            .as_ref()
            .ok_or(ValidationError::MissingDocument)?;
        if !document.is_pdf() {
            return Err(ValidationError::NotPdf(document.file_name.clone()));
        }
        if document.size_bytes > MAX_DOCUMENT_BYTES {
            return Err(ValidationError::DocumentTooLarge {
                size: document.size_bytes,
                limit: MAX_DOCUMENT_BYTES,
            });
        }
        if !self.completion.terms_accepted {
            return Err(ValidationError::TermsNotAccepted);
        }
        if self.completion.why_interested.trim().is_empty() {
            return Err(ValidationError::EmptyMotivation);
        }
        Ok(document)
    }

    /// Extracted entries, then ticked roles, then the free-text role.
    ///
    /// Order is preserved and duplicates are kept.
    pub fn merged_leadership(&self) -> Vec<String> {
        let other = self
            .applicant
            .other_role
            .as_ref()
            .filter(|role| !role.trim().is_empty());
        self.extracted
            .leadership
            .iter()
            .chain(&self.applicant.leadership_roles)
            .chain(other)
            .cloned()
            .collect()
    }

    /// Validate and package the form into an [`ApplicationRecord`].
    pub fn to_record(&self, created_at: DateTime<Utc>) -> Result<ApplicationRecord, ValidationError> {
        let document = self.validate()?;
        let applicant = &self.applicant;
        let extracted = &self.extracted;

        let full_name = format!("{} {}", applicant.name.trim(), applicant.surname.trim());
        let name = non_blank(full_name.trim())
            .or_else(|| extracted.full_name.as_deref().and_then(non_blank))
            .unwrap_or_else(|| FALLBACK_NAME.to_string());
        let email = non_blank(&applicant.email)
            .or_else(|| extracted.email.as_deref().and_then(non_blank))
            .unwrap_or_else(|| FALLBACK_EMAIL.to_string());
        let phone =
            non_blank(&applicant.phone).or_else(|| extracted.phone.as_deref().and_then(non_blank));

        Ok(ApplicationRecord {
            name,
            email,
            student_number: non_blank(&applicant.student_number),
            phone,
            position_applied_for: non_blank(&self.completion.position_applied_for)
                .unwrap_or_else(|| DEFAULT_POSITION.to_string()),
            leadership: self.merged_leadership(),
            education: extracted.education.clone(),
            why_interested: non_blank(&self.completion.why_interested)
                .unwrap_or_else(|| DEFAULT_MOTIVATION.to_string()),
            file_name: document.file_name.clone(),
            created_at,
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-02-21T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn builds_record_from_complete_form() {
        let record = fixtures::jane_doe().to_record(now()).unwrap();
        assert_eq!(record.name(), "Jane Doe");
        assert_eq!(record.email(), "jane@example.com");
        assert_eq!(record.student_number(), Some("DOEJAN001"));
        assert_eq!(record.phone(), None);
        assert_eq!(record.leadership(), ["Student Council"]);
        assert_eq!(record.file_name(), "CV.pdf");
        assert_eq!(record.created_at(), now());
    }

    #[test]
    fn leadership_merges_in_order_without_dedup() {
        let mut form = fixtures::jane_doe();
        form.extracted.leadership = vec!["Head of Debating Society".into(), "Student Council".into()];
        form.applicant.leadership_roles = vec!["Student Council".into(), "Residence Mentor".into()];
        form.applicant.other_role = Some("Choir Secretary".into());

        assert_eq!(
            form.merged_leadership(),
            [
                "Head of Debating Society",
                "Student Council",
                "Student Council",
                "Residence Mentor",
                "Choir Secretary",
            ]
        );
    }

    #[test]
    fn blank_other_role_is_skipped() {
        let mut form = fixtures::jane_doe();
        form.applicant.other_role = Some("   ".into());
        assert_eq!(form.merged_leadership(), ["Student Council"]);
        form.applicant.other_role = None;
        assert_eq!(form.merged_leadership(), ["Student Council"]);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let mut form = fixtures::jane_doe();
        form.applicant.name.clear();
        form.applicant.surname.clear();
        form.applicant.email.clear();
        form.applicant.student_number = "  ".into();
        form.completion.position_applied_for.clear();

        let record = form.to_record(now()).unwrap();
        assert_eq!(record.name(), "Applicant");
        assert_eq!(record.email(), "no-email@example.com");
        assert_eq!(record.student_number(), None);
        assert_eq!(record.position_applied_for(), "Not specified");
        assert!(record.education().is_empty());
    }

    #[test]
    fn extracted_profile_backs_up_personal_details() {
        let mut form = fixtures::jane_doe();
        form.applicant.name.clear();
        form.applicant.surname.clear();
        form.applicant.email.clear();
        form.extracted.full_name = Some("Jane A. Doe".into());
        form.extracted.email = Some("jdoe@uct.ac.za".into());
        form.extracted.phone = Some("021 650 9111".into());
        form.extracted.education = vec!["University of Cape Town".into()];

        let record = form.to_record(now()).unwrap();
        assert_eq!(record.name(), "Jane A. Doe");
        assert_eq!(record.email(), "jdoe@uct.ac.za");
        assert_eq!(record.phone(), Some("021 650 9111"));
        assert_eq!(record.education(), ["University of Cape Town"]);
    }

    #[test]
    fn missing_document_is_rejected() {
        let mut form = fixtures::jane_doe();
        form.document = None;
        assert_eq!(form.validate(), Err(ValidationError::MissingDocument));
        assert_eq!(form.to_record(now()), Err(ValidationError::MissingDocument));
    }

    #[test]
    fn terms_and_motivation_are_required() {
        let mut form = fixtures::jane_doe();
        form.completion.terms_accepted = false;
        assert_eq!(form.validate(), Err(ValidationError::TermsNotAccepted));

        let mut form = fixtures::jane_doe();
        form.completion.why_interested = " \n ".into();
        assert_eq!(form.validate(), Err(ValidationError::EmptyMotivation));
    }

    #[test]
    fn only_small_pdfs_are_accepted() {
        let mut form = fixtures::jane_doe();
        form.document = Some(UploadedDocument {
            file_name: "CV.docx".into(),
            content_type: Some("application/msword".into()),
            size_bytes: 1_000,
        });
        assert_eq!(form.validate(), Err(ValidationError::NotPdf("CV.docx".into())));

        form.document = Some(UploadedDocument::pdf("CV.pdf", MAX_DOCUMENT_BYTES + 1));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::DocumentTooLarge { .. })
        ));
    }

    #[test]
    fn extension_decides_when_content_type_absent() {
        let doc = UploadedDocument {
            file_name: "DOE_J_Roscommon_SubWarden.PDF".into(),
            content_type: None,
            size_bytes: 10,
        };
        assert!(doc.is_pdf());
        let doc = UploadedDocument {
            file_name: "notes.txt".into(),
            content_type: None,
            size_bytes: 10,
        };
        assert!(!doc.is_pdf());
    }

    #[test]
    fn form_state_decodes_from_camel_case_json() {
        let json = r#"{
            "applicant": {
                "name": "Jane",
                "surname": "Doe",
                "email": "jane@example.com",
                "leadershipRoles": ["Student Council"],
                "otherRole": ""
            },
            "document": { "fileName": "CV.pdf", "sizeBytes": 1024 },
            "completion": {
                "positionAppliedFor": "Roscommon Sub-Warden 2026",
                "whyInterested": "Community.",
                "termsAccepted": true
            }
        }"#;
        let form: FormState = serde_json::from_str(json).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.applicant.leadership_roles, ["Student Council"]);
        assert!(form.extracted.leadership.is_empty());
    }
}
