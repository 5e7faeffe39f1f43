use crate::model::{Student, StudentDraft, StudentPatch};
use crate::query::{self, Filters};
use crate::roster::Event;
use crate::store::RecordStore;

/// Tagged result of a mutation, surfaced to the caller alongside the state
/// events to fold into the roster. Remote failures never mutate local state
/// and are never swallowed.
#[derive(Debug)]
pub enum MutationOutcome {
    Created(Student),
    Updated { id: String },
    Deleted { id: String },
    /// Refused locally; no remote call was made.
    Rejected { code: &'static str, reason: String },
    StoreError { message: String },
}

/// Validate the create form and insert the record. The store assigns the
/// identifier; the first stored row is appended to local state. The form
/// closes only on success.
pub fn create_student(
    store: &dyn RecordStore,
    draft: &StudentDraft,
) -> (MutationOutcome, Vec<Event>) {
    let row = match draft.validate() {
        Ok(row) => row,
        Err(reason) => {
            return (
                MutationOutcome::Rejected {
                    code: "validation_failed",
                    reason,
                },
                Vec::new(),
            )
        }
    };

    match store.insert(&[row]) {
        Ok(mut stored) => {
            if stored.is_empty() {
                // The store reported success but handed back nothing to
                // append; without a stored row there is no identifier.
                let message = "insert returned no rows".to_string();
                tracing::error!("create failed: {message}");
                return (MutationOutcome::StoreError { message }, Vec::new());
            }
            let student = stored.remove(0);
            let events = vec![Event::RecordAppended(student.clone()), Event::ModalClosed];
            (MutationOutcome::Created(student), events)
        }
        Err(e) => {
            tracing::error!("create failed: {e:#}");
            (
                MutationOutcome::StoreError {
                    message: e.to_string(),
                },
                Vec::new(),
            )
        }
    }
}

/// Update the record with the given identifier. The identifier is required
/// up front and never part of the patch payload; on success the patch
/// fields merge into the matching local record.
pub fn update_student(
    store: &dyn RecordStore,
    id: &str,
    patch: &StudentPatch,
) -> (MutationOutcome, Vec<Event>) {
    if id.trim().is_empty() {
        return (
            MutationOutcome::Rejected {
                code: "bad_params",
                reason: "student id is missing".to_string(),
            },
            Vec::new(),
        );
    }
    if patch.is_empty() {
        return (
            MutationOutcome::Rejected {
                code: "bad_params",
                reason: "empty patch".to_string(),
            },
            Vec::new(),
        );
    }

    match store.update(id, patch) {
        Ok(()) => {
            let events = vec![
                Event::RecordMerged {
                    id: id.to_string(),
                    patch: patch.clone(),
                },
                Event::ModalClosed,
            ];
            (MutationOutcome::Updated { id: id.to_string() }, events)
        }
        Err(e) => {
            tracing::error!("update failed for {id}: {e:#}");
            (
                MutationOutcome::StoreError {
                    message: e.to_string(),
                },
                Vec::new(),
            )
        }
    }
}

/// Delete by identifier. The interactive confirmation lives in the
/// renderer; an unconfirmed request is refused before any remote call.
pub fn delete_student(
    store: &dyn RecordStore,
    id: &str,
    confirmed: bool,
) -> (MutationOutcome, Vec<Event>) {
    if id.trim().is_empty() {
        return (
            MutationOutcome::Rejected {
                code: "bad_params",
                reason: "student id is missing".to_string(),
            },
            Vec::new(),
        );
    }
    if !confirmed {
        return (
            MutationOutcome::Rejected {
                code: "not_confirmed",
                reason: "delete not confirmed".to_string(),
            },
            Vec::new(),
        );
    }

    match store.delete(id) {
        Ok(()) => (
            MutationOutcome::Deleted { id: id.to_string() },
            vec![Event::RecordRemoved(id.to_string())],
        ),
        Err(e) => {
            tracing::error!("delete failed for {id}: {e:#}");
            (
                MutationOutcome::StoreError {
                    message: e.to_string(),
                },
                Vec::new(),
            )
        }
    }
}

/// Run the compiled filter predicates through the store. A failed call
/// degrades to an empty result set: the table shows empty rather than an
/// error state, with the failure logged.
pub fn run_fetch(store: &dyn RecordStore, filters: &Filters, seq: u64) -> Event {
    let predicates = query::build_predicates(filters);
    match store.select(&predicates) {
        Ok(records) => Event::FetchCompleted { seq, records },
        Err(e) => {
            tracing::warn!("fetch failed: {e:#}");
            Event::FetchFailed { seq }
        }
    }
}
