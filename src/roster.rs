use crate::model::{Student, StudentPatch};
use crate::query::{self, Filters};

/// Modal/editing UI state mirrored by the daemon so the renderer stays a
/// thin view over the snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Create,
    Edit(Student),
}

/// The local roster view: a cache of the remote collection under the active
/// filters, never authoritative. Discarded wholesale on every re-fetch.
#[derive(Debug, Clone, Default)]
pub struct RosterState {
    pub records: Vec<Student>,
    pub filters: Filters,
    pub modal: ModalState,
    pub active_row: Option<usize>,
    /// Sequence of the latest issued fetch; completions carrying an older
    /// sequence are superseded and must be dropped.
    pub fetch_seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CohortFilterChanged(String),
    ClassFilterChanged(String),
    SearchChanged(String),
    FetchCompleted { seq: u64, records: Vec<Student> },
    FetchFailed { seq: u64 },
    RowToggled(usize),
    CreateModalOpened,
    EditModalOpened(Student),
    ModalClosed,
    RecordAppended(Student),
    RecordMerged { id: String, patch: StudentPatch },
    RecordRemoved(String),
}

/// Pure reducer: the only way roster state changes.
pub fn reduce(mut state: RosterState, event: Event) -> RosterState {
    match event {
        Event::CohortFilterChanged(value) => {
            state.filters.cohort = query::normalize(&value);
            state.fetch_seq += 1;
        }
        Event::ClassFilterChanged(value) => {
            state.filters.class = query::normalize(&value);
            state.fetch_seq += 1;
        }
        Event::SearchChanged(value) => {
            state.filters.search = query::normalize(&value);
            state.fetch_seq += 1;
        }
        Event::FetchCompleted { seq, records } => {
            // A fetch result fully replaces the list, but only when it is
            // the latest issued one; superseded results are dropped.
            if seq == state.fetch_seq {
                state.records = records;
                state.active_row = None;
            }
        }
        Event::FetchFailed { seq } => {
            if seq == state.fetch_seq {
                state.records.clear();
                state.active_row = None;
            }
        }
        Event::RowToggled(index) => {
            if state.active_row == Some(index) {
                state.active_row = None;
            } else if index < state.records.len() {
                state.active_row = Some(index);
            }
        }
        Event::CreateModalOpened => state.modal = ModalState::Create,
        Event::EditModalOpened(student) => state.modal = ModalState::Edit(student),
        Event::ModalClosed => state.modal = ModalState::Closed,
        Event::RecordAppended(student) => state.records.push(student),
        Event::RecordMerged { id, patch } => {
            if let Some(student) = state.records.iter_mut().find(|s| s.id == id) {
                patch.apply_to(student);
            }
        }
        Event::RecordRemoved(id) => {
            state.records.retain(|s| s.id != id);
            // Row indices shifted; the expansion no longer points anywhere.
            state.active_row = None;
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, name: &str) -> Student {
        Student {
            id: id.into(),
            name: name.into(),
            cohort: "AY 2024-2025".into(),
            courses: Some("[\"Math\"]".into()),
            date_joined: None,
            last_login: None,
            status: true,
            student_class: "9".into(),
        }
    }

    fn with_records(n: usize) -> RosterState {
        let mut state = RosterState::default();
        for i in 0..n {
            state.records.push(student(&format!("s{i}"), "x"));
        }
        state
    }

    #[test]
    fn filter_change_bumps_fetch_sequence() {
        let state = RosterState::default();
        let state = reduce(state, Event::CohortFilterChanged("AY 2024-2025".into()));
        assert_eq!(state.fetch_seq, 1);
        assert_eq!(state.filters.cohort.as_deref(), Some("AY 2024-2025"));

        let state = reduce(state, Event::ClassFilterChanged("9".into()));
        let state = reduce(state, Event::SearchChanged("ali".into()));
        assert_eq!(state.fetch_seq, 3);
    }

    #[test]
    fn blank_filter_value_clears_the_filter() {
        let state = reduce(
            RosterState::default(),
            Event::CohortFilterChanged("AY 2024-2025".into()),
        );
        let state = reduce(state, Event::CohortFilterChanged("".into()));
        assert_eq!(state.filters.cohort, None);
        assert_eq!(state.fetch_seq, 2);
    }

    #[test]
    fn current_fetch_replaces_the_list() {
        let mut state = with_records(2);
        state.fetch_seq = 5;
        state.active_row = Some(1);
        let state = reduce(
            state,
            Event::FetchCompleted {
                seq: 5,
                records: vec![student("s9", "Nina")],
            },
        );
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].id, "s9");
        assert_eq!(state.active_row, None);
    }

    #[test]
    fn superseded_fetch_is_dropped() {
        let mut state = with_records(2);
        state.fetch_seq = 6;
        let state = reduce(
            state,
            Event::FetchCompleted {
                seq: 5,
                records: Vec::new(),
            },
        );
        assert_eq!(state.records.len(), 2);
    }

    #[test]
    fn failed_fetch_yields_empty_list() {
        let mut state = with_records(3);
        state.fetch_seq = 2;
        let state = reduce(state, Event::FetchFailed { seq: 2 });
        assert!(state.records.is_empty());

        // A stale failure must not clobber a newer result.
        let mut state = with_records(3);
        state.fetch_seq = 2;
        let state = reduce(state, Event::FetchFailed { seq: 1 });
        assert_eq!(state.records.len(), 3);
    }

    #[test]
    fn row_expansion_is_exclusive() {
        let state = with_records(3);
        let state = reduce(state, Event::RowToggled(0));
        assert_eq!(state.active_row, Some(0));
        let state = reduce(state, Event::RowToggled(2));
        assert_eq!(state.active_row, Some(2));
    }

    #[test]
    fn toggling_the_expanded_row_collapses_it() {
        let state = with_records(2);
        let state = reduce(state, Event::RowToggled(1));
        let state = reduce(state, Event::RowToggled(1));
        assert_eq!(state.active_row, None);
    }

    #[test]
    fn toggling_out_of_range_is_ignored() {
        let state = with_records(1);
        let state = reduce(state, Event::RowToggled(7));
        assert_eq!(state.active_row, None);
    }

    #[test]
    fn merge_patches_only_the_matching_record() {
        let state = with_records(2);
        let patch = StudentPatch {
            name: Some("Renamed".into()),
            ..StudentPatch::default()
        };
        let state = reduce(
            state,
            Event::RecordMerged {
                id: "s1".into(),
                patch,
            },
        );
        assert_eq!(state.records[0].name, "x");
        assert_eq!(state.records[1].name, "Renamed");
    }

    #[test]
    fn remove_drops_exactly_the_matching_id_and_collapses() {
        let mut state = with_records(3);
        state.active_row = Some(2);
        let state = reduce(state, Event::RecordRemoved("s1".into()));
        let ids: Vec<&str> = state.records.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s0", "s2"]);
        assert_eq!(state.active_row, None);
    }

    #[test]
    fn modal_lifecycle() {
        let state = reduce(RosterState::default(), Event::CreateModalOpened);
        assert_eq!(state.modal, ModalState::Create);
        let state = reduce(state, Event::EditModalOpened(student("s0", "Alice")));
        assert!(matches!(state.modal, ModalState::Edit(_)));
        let state = reduce(state, Event::ModalClosed);
        assert_eq!(state.modal, ModalState::Closed);
    }
}
