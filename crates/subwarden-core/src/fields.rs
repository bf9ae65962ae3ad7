//! Field-name mapping between [`ApplicationRecord`] and the remote record store.
//!
//! The remote table uses human display names as column keys. The mapping is
//! a closed enum so adding a record field without a column name fails to
//! compile rather than silently dropping data.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::ApplicationRecord;

/// Separator used when a sequence is flattened into a single text column.
pub const LIST_SEPARATOR: &str = ", ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("required field {0:?} is missing")]
    Missing(&'static str),
    #[error("field {field:?} has an unexpected JSON type")]
    WrongType { field: &'static str },
    #[error("field {field:?} is not an RFC 3339 timestamp: {value}")]
    BadTimestamp { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    StudentNumber,
    Phone,
    PositionAppliedFor,
    Leadership,
    Education,
    WhyInterested,
    FileName,
    CreatedAt,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Name,
        Field::Email,
        Field::StudentNumber,
        Field::Phone,
        Field::PositionAppliedFor,
        Field::Leadership,
        Field::Education,
        Field::WhyInterested,
        Field::FileName,
        Field::CreatedAt,
    ];

    /// Key used in the local JSON representation.
    pub const fn internal_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::StudentNumber => "studentNumber",
            Field::Phone => "phone",
            Field::PositionAppliedFor => "positionAppliedFor",
            Field::Leadership => "leadership",
            Field::Education => "education",
            Field::WhyInterested => "whyInterested",
            Field::FileName => "fileName",
            Field::CreatedAt => "createdAt",
        }
    }

    /// Column name in the remote table.
    pub const fn external_name(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::StudentNumber => "Student Number",
            Field::Phone => "Phone",
            Field::PositionAppliedFor => "Position Applied For",
            Field::Leadership => "Leadership",
            Field::Education => "Education",
            Field::WhyInterested => "Why Interested",
            Field::FileName => "File Name",
            Field::CreatedAt => "Created At",
        }
    }

    pub fn from_internal(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.internal_name() == name)
    }

    pub fn from_external(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.external_name() == name)
    }
}

/// Encode a record as the remote store's `fields` object.
///
/// Absent optionals become empty strings and sequences are joined with
/// [`LIST_SEPARATOR`]. Decoding splits on every comma, so an item that itself
/// contains a comma comes back as several items.
pub fn to_external(record: &ApplicationRecord) -> Map<String, Value> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let value = match field {
                Field::Name => record.name.clone(),
                Field::Email => record.email.clone(),
                Field::StudentNumber => record.student_number.clone().unwrap_or_default(),
                Field::Phone => record.phone.clone().unwrap_or_default(),
                Field::PositionAppliedFor => record.position_applied_for.clone(),
                Field::Leadership => record.leadership.join(LIST_SEPARATOR),
                Field::Education => record.education.join(LIST_SEPARATOR),
                Field::WhyInterested => record.why_interested.clone(),
                Field::FileName => record.file_name.clone(),
                Field::CreatedAt => record
                    .created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            };
            (field.external_name().to_string(), Value::String(value))
        })
        .collect()
}

/// Decode a remote `fields` object back into a record.
///
/// `fallback_created_at` is used when the `Created At` column is empty, which
/// happens for rows entered by hand in the remote table.
pub fn from_external(
    fields: &Map<String, Value>,
    fallback_created_at: Option<DateTime<Utc>>,
) -> Result<ApplicationRecord, FieldError> {
    let name = text(fields, Field::Name)?.ok_or(FieldError::Missing(Field::Name.external_name()))?;
    let created_at = match text(fields, Field::CreatedAt)? {
        Some(raw) => DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|_| FieldError::BadTimestamp {
                field: Field::CreatedAt.external_name(),
                value: raw,
            })?,
        None => fallback_created_at.ok_or(FieldError::Missing(Field::CreatedAt.external_name()))?,
    };

    Ok(ApplicationRecord {
        name,
        email: text(fields, Field::Email)?.unwrap_or_default(),
        student_number: text(fields, Field::StudentNumber)?,
        phone: text(fields, Field::Phone)?,
        position_applied_for: text(fields, Field::PositionAppliedFor)?.unwrap_or_default(),
        leadership: list(fields, Field::Leadership)?,
        education: list(fields, Field::Education)?,
        why_interested: text(fields, Field::WhyInterested)?.unwrap_or_default(),
        file_name: text(fields, Field::FileName)?.unwrap_or_default(),
        created_at,
    })
}

/// Trimmed, non-empty text value of a column; absent, null and blank read as `None`.
///
/// Number and boolean cells (a student number typed into a numeric column)
/// are read as their JSON text.
fn text(fields: &Map<String, Value>, field: Field) -> Result<Option<String>, FieldError> {
    match fields.get(field.external_name()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
        Some(_) => Err(FieldError::WrongType {
            field: field.external_name(),
        }),
    }
}

fn list(fields: &Map<String, Value>, field: Field) -> Result<Vec<String>, FieldError> {
    Ok(text(fields, field)?
        .map(|joined| {
            joined
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default())
}
