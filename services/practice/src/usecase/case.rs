use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use docket_domain::account::AccountType;
use docket_domain::id::CaseId;
use docket_domain::priority::Priority;

use crate::domain::repository::{CaseRepository, UserRepository};
use crate::domain::types::{
    Case, CaseDocument, CaseFilter, CaseNote, CasePatch, CaseStatus, CaseType, trimmed,
};
use crate::error::PracticeServiceError;
use crate::usecase::populate::{CaseView, case_view, case_views};

// ── CreateCase ───────────────────────────────────────────────────────────────

pub struct CreateCaseInput {
    pub title: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub case_type: Option<CaseType>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
}

pub struct CreateCaseUseCase<U: UserRepository, C: CaseRepository> {
    pub users: U,
    pub cases: C,
}

impl<U: UserRepository, C: CaseRepository> CreateCaseUseCase<U, C> {
    pub async fn execute(&self, input: CreateCaseInput) -> Result<CaseView, PracticeServiceError> {
        let title = input.title.trim().to_owned();
        if title.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }

        let client = self.users.find_by_id(input.client_id).await?;
        if !client.is_some_and(|u| u.account_type == AccountType::Client) {
            return Err(PracticeServiceError::InvalidClient);
        }
        let lawyer = self.users.find_by_id(input.lawyer_id).await?;
        if !lawyer.is_some_and(|u| u.account_type == AccountType::Lawyer) {
            return Err(PracticeServiceError::InvalidLawyer);
        }

        let now = Utc::now();
        let case = Case {
            id: CaseId(Uuid::now_v7()),
            title,
            description: trimmed(input.description),
            client_id: input.client_id,
            lawyer_id: input.lawyer_id,
            case_type: input.case_type.unwrap_or_default(),
            status: CaseStatus::default(),
            priority: input.priority.unwrap_or_default(),
            start_date: input.start_date.unwrap_or_else(|| now.date_naive()),
            end_date: input.end_date,
            estimated_completion: input.estimated_completion,
            documents: vec![],
            notes: vec![],
            created_at: now,
            updated_at: now,
        };
        self.cases.create(&case).await?;
        tracing::info!(case_id = %case.id, "case opened");
        case_view(&self.users, case).await
    }
}

// ── GetCase ──────────────────────────────────────────────────────────────────

pub struct GetCaseUseCase<U: UserRepository, C: CaseRepository> {
    pub users: U,
    pub cases: C,
}

impl<U: UserRepository, C: CaseRepository> GetCaseUseCase<U, C> {
    pub async fn execute(&self, id: CaseId) -> Result<CaseView, PracticeServiceError> {
        let case = self
            .cases
            .find_by_id(id)
            .await?
            .ok_or(PracticeServiceError::CaseNotFound)?;
        case_view(&self.users, case).await
    }
}

// ── ListCases ────────────────────────────────────────────────────────────────

pub struct ListCasesUseCase<U: UserRepository, C: CaseRepository> {
    pub users: U,
    pub cases: C,
}

impl<U: UserRepository, C: CaseRepository> ListCasesUseCase<U, C> {
    pub async fn execute(&self, filter: CaseFilter) -> Result<Vec<CaseView>, PracticeServiceError> {
        let cases = self.cases.list(filter).await?;
        case_views(&self.users, cases).await
    }
}

// ── UpdateCase ───────────────────────────────────────────────────────────────

pub struct UpdateCaseUseCase<U: UserRepository, C: CaseRepository> {
    pub users: U,
    pub cases: C,
}

impl<U: UserRepository, C: CaseRepository> UpdateCaseUseCase<U, C> {
    /// Partial merge. Re-pointing the client or lawyer is not re-validated against account
    /// types; only creation enforces them.
    pub async fn execute(
        &self,
        id: CaseId,
        mut patch: CasePatch,
    ) -> Result<CaseView, PracticeServiceError> {
        if patch.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }
        if let Some(title) = patch.title.take() {
            let title = title.trim().to_owned();
            if title.is_empty() {
                return Err(PracticeServiceError::MissingData);
            }
            patch.title = Some(title);
        }
        patch.description = patch.description.map(|d| d.trim().to_owned());

        let case = self
            .cases
            .update(id, &patch)
            .await?
            .ok_or(PracticeServiceError::CaseNotFound)?;
        case_view(&self.users, case).await
    }
}

// ── DeleteCase ───────────────────────────────────────────────────────────────

pub struct DeleteCaseUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> DeleteCaseUseCase<C> {
    pub async fn execute(&self, id: CaseId) -> Result<(), PracticeServiceError> {
        if !self.cases.delete(id).await? {
            return Err(PracticeServiceError::CaseNotFound);
        }
        tracing::info!(case_id = %id, "case deleted");
        Ok(())
    }
}

// ── AddCaseDocument ──────────────────────────────────────────────────────────

pub struct AddCaseDocumentInput {
    pub name: String,
    pub url: String,
}

pub struct AddCaseDocumentUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> AddCaseDocumentUseCase<C> {
    pub async fn execute(
        &self,
        id: CaseId,
        input: AddCaseDocumentInput,
    ) -> Result<CaseDocument, PracticeServiceError> {
        let name = input.name.trim().to_owned();
        let url = input.url.trim().to_owned();
        if name.is_empty() || url.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }
        let document = CaseDocument {
            id: Uuid::now_v7(),
            name,
            url,
            uploaded_at: Utc::now(),
        };
        self.cases.append_document(id, &document).await?;
        Ok(document)
    }
}

// ── AddCaseNote ──────────────────────────────────────────────────────────────

pub struct AddCaseNoteInput {
    pub content: String,
    pub created_by: Option<Uuid>,
}

pub struct AddCaseNoteUseCase<C: CaseRepository> {
    pub cases: C,
}

impl<C: CaseRepository> AddCaseNoteUseCase<C> {
    pub async fn execute(
        &self,
        id: CaseId,
        input: AddCaseNoteInput,
    ) -> Result<CaseNote, PracticeServiceError> {
        let content = input.content.trim().to_owned();
        if content.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }
        let note = CaseNote {
            id: Uuid::now_v7(),
            content,
            created_by: input.created_by,
            created_at: Utc::now(),
        };
        self.cases.append_note(id, &note).await?;
        Ok(note)
    }
}
