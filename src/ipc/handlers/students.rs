use serde_json::json;

use crate::gateway::{self, MutationOutcome};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{StudentDraft, StudentPatch};
use crate::present;

fn rows_json(state: &AppState) -> serde_json::Value {
    json!({
        "students": present::project_rows(&state.roster.records, state.roster.active_row)
    })
}

fn outcome_err(id: &str, outcome: MutationOutcome) -> serde_json::Value {
    match outcome {
        MutationOutcome::Rejected { code, reason } => err(id, code, reason, None),
        MutationOutcome::StoreError { message } => err(id, "store_error", message, None),
        other => err(
            id,
            "internal_error",
            format!("unexpected outcome: {other:?}"),
            None,
        ),
    }
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_deref() else {
        return err(&req.id, "no_store", "connect a store first", None);
    };

    let event = gateway::run_fetch(store, &state.roster.filters, state.roster.fetch_seq);
    state.apply(event);
    ok(&req.id, rows_json(state))
}

fn draft_from_params(params: &serde_json::Value) -> StudentDraft {
    // Missing or mistyped fields come through empty so validation can
    // answer with the single form-level message.
    let courses = params
        .get("courses")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let text = |key: &str| {
        params
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    StudentDraft {
        name: text("name"),
        cohort: text("cohort"),
        courses,
        date_joined: text("dateJoined"),
        status: text("status"),
        student_class: text("studentClass"),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_deref() else {
        return err(&req.id, "no_store", "connect a store first", None);
    };

    let draft = draft_from_params(&req.params);
    let (outcome, events) = gateway::create_student(store, &draft);
    for event in events {
        state.apply(event);
    }

    match outcome {
        MutationOutcome::Created(student) => ok(&req.id, json!({ "studentId": student.id })),
        other => outcome_err(&req.id, other),
    }
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = req
        .params
        .get("studentId")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let Some(patch_value) = req.params.get("patch") else {
        return err(&req.id, "bad_params", "missing patch", None);
    };
    let patch: StudentPatch = match serde_json::from_value(patch_value.clone()) {
        Ok(p) => p,
        Err(e) => return err(&req.id, "bad_params", format!("invalid patch: {e}"), None),
    };

    let Some(store) = state.store.as_deref() else {
        return err(&req.id, "no_store", "connect a store first", None);
    };

    let (outcome, events) = gateway::update_student(store, &student_id, &patch);
    for event in events {
        state.apply(event);
    }

    match outcome {
        MutationOutcome::Updated { id } => ok(&req.id, json!({ "studentId": id })),
        other => outcome_err(&req.id, other),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = req
        .params
        .get("studentId")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let confirmed = req
        .params
        .get("confirmed")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let Some(store) = state.store.as_deref() else {
        return err(&req.id, "no_store", "connect a store first", None);
    };

    let (outcome, events) = gateway::delete_student(store, &student_id, confirmed);
    for event in events {
        state.apply(event);
    }

    match outcome {
        MutationOutcome::Deleted { id } => ok(&req.id, json!({ "studentId": id })),
        other => outcome_err(&req.id, other),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
