#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use subwarden_core::{
    ApplicantInfo, ApplicationRecord, CompletionDetails, ExtractedProfile, FormState, RecordId,
    StoredApplication, UploadedDocument,
};
use subwarden_store::{LocalStore, StoreError};
use subwarden_sync::{RecordStore, RemoteError};

/// In-process record store that either always succeeds or always fails.
pub struct FakeRemote {
    fail: bool,
    calls: AtomicUsize,
    rows: Mutex<Vec<StoredApplication>>,
}

impl FakeRemote {
    pub fn working() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::working()
        }
    }

    /// Number of `create` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FakeRemote {
    async fn create(&self, record: &ApplicationRecord) -> Result<RecordId, RemoteError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(RemoteError::Status {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        let id = RecordId::remote(format!("rec{n:06}")).expect("remote id");
        self.rows.lock().unwrap().push(StoredApplication::new(
            id.clone(),
            record.clone(),
            record.created_at(),
        ));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<StoredApplication>, RemoteError> {
        if self.fail {
            return Err(RemoteError::Status {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// Local store whose writes always fail.
pub struct BrokenLocal;

#[async_trait]
impl LocalStore for BrokenLocal {
    async fn append(&self, _entry: StoredApplication) -> Result<(), StoreError> {
        Err(StoreError::Other("disk full".into()))
    }

    async fn list_all(&self) -> Vec<StoredApplication> {
        Vec::new()
    }
}

/// The applicant from the reference scenario.
pub fn jane_doe() -> FormState {
    FormState {
        applicant: ApplicantInfo {
            name: "Jane".into(),
            surname: "Doe".into(),
            email: "jane@example.com".into(),
            phone: String::new(),
            student_number: String::new(),
            leadership_roles: vec!["Student Council".into()],
            other_role: Some(String::new()),
        },
        document: Some(UploadedDocument::pdf("CV.pdf", 420_000)),
        extracted: ExtractedProfile::default(),
        completion: CompletionDetails {
            position_applied_for: "Roscommon Sub-Warden 2026".into(),
            why_interested: "Having lived in Roscommon for two years, I want to give back \
                to the residence that shaped me. As a sub-warden I would support first-year \
                students through their transition, help the house committee run inclusive \
                events, and be a steady point of contact when things go wrong. My experience \
                on the Student Council taught me to listen first and act fairly."
                .into(),
            terms_accepted: true,
        },
    }
}
