use serde_json::json;

use crate::gateway;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model;
use crate::present;
use crate::roster::{Event, ModalState, RosterState};

fn snapshot(roster: &RosterState) -> serde_json::Value {
    json!({
        "filters": {
            "cohort": roster.filters.cohort,
            "class": roster.filters.class,
            "search": roster.filters.search,
        },
        "modal": modal_json(&roster.modal),
        "activeRow": roster.active_row,
        "students": present::project_rows(&roster.records, roster.active_row),
    })
}

/// The edit snapshot carries the decoded course list so the form can
/// pre-populate its multi-select without re-parsing the stored string.
fn modal_json(modal: &ModalState) -> serde_json::Value {
    match modal {
        ModalState::Closed => json!({ "kind": "closed" }),
        ModalState::Create => json!({ "kind": "create" }),
        ModalState::Edit(student) => json!({
            "kind": "edit",
            "student": student,
            "courses": student
                .courses
                .as_deref()
                .and_then(model::decode_courses)
                .unwrap_or_default(),
        }),
    }
}

/// One fetch against the connected store with the current filters, folded
/// through the reducer. Callers ensure a store is connected.
fn refetch(state: &mut AppState) {
    let Some(store) = state.store.as_deref() else {
        return;
    };
    let event = gateway::run_fetch(store, &state.roster.filters, state.roster.fetch_seq);
    state.apply(event);
}

fn handle_roster_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, snapshot(&state.roster))
}

fn handle_set_filters(state: &mut AppState, req: &Request) -> serde_json::Value {
    if state.store.is_none() {
        return err(&req.id, "no_store", "connect a store first", None);
    }

    if let Some(v) = req.params.get("cohort").and_then(|v| v.as_str()) {
        state.apply(Event::CohortFilterChanged(v.to_string()));
    }
    if let Some(v) = req.params.get("class").and_then(|v| v.as_str()) {
        state.apply(Event::ClassFilterChanged(v.to_string()));
    }
    if let Some(v) = req.params.get("search").and_then(|v| v.as_str()) {
        state.apply(Event::SearchChanged(v.to_string()));
    }

    // Exactly one re-fetch per filter-change request, whatever subset of
    // filters it touched.
    refetch(state);

    ok(
        &req.id,
        json!({
            "students": present::project_rows(&state.roster.records, state.roster.active_row)
        }),
    )
}

fn handle_toggle_row(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(index) = req.params.get("index").and_then(|v| v.as_u64()) else {
        return err(&req.id, "bad_params", "missing index", None);
    };
    state.apply(Event::RowToggled(index as usize));
    ok(&req.id, json!({ "activeRow": state.roster.active_row }))
}

fn handle_open_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.apply(Event::CreateModalOpened);
    ok(&req.id, json!({ "modal": modal_json(&state.roster.modal) }))
}

fn handle_open_edit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(student_id) = req.params.get("studentId").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing studentId", None);
    };

    let Some(student) = state
        .roster
        .records
        .iter()
        .find(|s| s.id == student_id)
        .cloned()
    else {
        return err(&req.id, "not_found", "student not in current view", None);
    };

    state.apply(Event::EditModalOpened(student));
    ok(&req.id, json!({ "modal": modal_json(&state.roster.modal) }))
}

fn handle_close_modal(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.apply(Event::ModalClosed);
    ok(&req.id, json!({ "modal": modal_json(&state.roster.modal) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "roster.state" => Some(handle_roster_state(state, req)),
        "roster.setFilters" => Some(handle_set_filters(state, req)),
        "roster.toggleRow" => Some(handle_toggle_row(state, req)),
        "roster.openCreate" => Some(handle_open_create(state, req)),
        "roster.openEdit" => Some(handle_open_edit(state, req)),
        "roster.closeModal" => Some(handle_close_modal(state, req)),
        _ => None,
    }
}
