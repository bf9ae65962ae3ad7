//! The canonical submitted-application entity and its persisted envelope.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email used when neither the applicant nor the CV supplied one.
pub const FALLBACK_EMAIL: &str = "no-email@example.com";
/// Name used when the form carries no name and the CV yielded none.
pub const FALLBACK_NAME: &str = "Applicant";
pub const DEFAULT_POSITION: &str = "Not specified";
pub const DEFAULT_MOTIVATION: &str = "Not provided";

/// Prefix reserved for locally generated ids.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// One submitted application.
///
/// Records are built once by the submission workflow (or decoded from a
/// store) and never mutated afterwards, so fields are only readable from
/// outside this crate. `leadership` and `education` are always present,
/// possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub(crate) name: String,
    pub(crate) email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) student_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) phone: Option<String>,
    pub(crate) position_applied_for: String,
    #[serde(default)]
    pub(crate) leadership: Vec<String>,
    #[serde(default)]
    pub(crate) education: Vec<String>,
    pub(crate) why_interested: String,
    pub(crate) file_name: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn student_number(&self) -> Option<&str> {
        self.student_number.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn position_applied_for(&self) -> &str {
        &self.position_applied_for
    }

    pub fn leadership(&self) -> &[String] {
        &self.leadership
    }

    pub fn education(&self) -> &[String] {
        &self.education
    }

    pub fn why_interested(&self) -> &str {
        &self.why_interested
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Identifier of a persisted application.
///
/// Remote ids are assigned by the record store; local ids are
/// `local-<unix-millis>` and never enter the remote namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an id assigned by the remote store.
    ///
    /// Returns `None` for empty ids and for ids inside the local namespace.
    pub fn remote(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() || id.starts_with(LOCAL_ID_PREFIX) {
            return None;
        }
        Some(Self(id))
    }

    /// Build a local id from a millisecond timestamp.
    pub fn local(unix_millis: i64) -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{unix_millis}"))
    }

    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    /// Timestamp a local id was generated from.
    pub fn local_millis(&self) -> Option<i64> {
        self.0.strip_prefix(LOCAL_ID_PREFIX)?.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record together with the id it was persisted under.
///
/// This is the shape of one entry in the local store and of one row listed
/// from the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredApplication {
    pub id: RecordId,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: ApplicationRecord,
}

impl StoredApplication {
    pub fn new(id: RecordId, record: ApplicationRecord, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            submitted_at,
            record,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record() -> ApplicationRecord {
        ApplicationRecord {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            student_number: Some("DOEJAN001".into()),
            phone: None,
            position_applied_for: "Roscommon Sub-Warden 2026".into(),
            leadership: vec!["House Committee Member".into(), "Student Council".into()],
            education: vec!["BSc Computer Science (University of Cape Town)".into()],
            why_interested: "I want to support first-year students.".into(),
            file_name: "DOE_J_Roscommon_SubWarden.pdf".into(),
            created_at: "2026-02-21T10:00:00Z".parse().unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_json_uses_camel_case_keys() {
        let json = serde_json::to_value(fixtures::record()).unwrap();
        assert_eq!(json["studentNumber"], "DOEJAN001");
        assert_eq!(json["positionAppliedFor"], "Roscommon Sub-Warden 2026");
        assert_eq!(json["fileName"], "DOE_J_Roscommon_SubWarden.pdf");
        assert_eq!(json["createdAt"], "2026-02-21T10:00:00Z");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn missing_sequences_decode_as_empty() {
        let json = r#"{
            "name": "Jane Doe",
            "email": "jane@example.com",
            "positionAppliedFor": "Not specified",
            "whyInterested": "Not provided",
            "fileName": "CV.pdf",
            "createdAt": "2026-02-21T10:00:00Z"
        }"#;
        let record: ApplicationRecord = serde_json::from_str(json).unwrap();
        assert!(record.leadership().is_empty());
        assert!(record.education().is_empty());
        assert_eq!(record.student_number(), None);
    }

    #[test]
    fn stored_application_flattens_record() {
        let stored = StoredApplication::new(
            RecordId::local(1_771_668_000_000),
            fixtures::record(),
            "2026-02-21T10:00:01Z".parse().unwrap(),
        );
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], "local-1771668000000");
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["submittedAt"], "2026-02-21T10:00:01Z");

        let parsed: StoredApplication = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, stored);
    }

    #[test]
    fn remote_ids_cannot_enter_local_namespace() {
        assert!(RecordId::remote("recA1b2C3d4E5f6G7").is_some());
        assert!(RecordId::remote("local-1771668000000").is_none());
        assert!(RecordId::remote("  ").is_none());
    }

    #[test]
    fn local_ids_are_flagged() {
        assert!(RecordId::local(42).is_local());
        assert!(!RecordId::remote("rec42").unwrap().is_local());
        assert_eq!(RecordId::local(42).to_string(), "local-42");
        assert_eq!(RecordId::local(42).local_millis(), Some(42));
        assert_eq!(RecordId::remote("rec42").unwrap().local_millis(), None);
    }
}
