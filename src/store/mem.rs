use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::RecordStore;
use crate::model::{NewStudent, Student, StudentPatch};
use crate::query::{ilike_matches, Predicate};

/// In-memory stand-in for the hosted store with the same filter and
/// mutation semantics, selectable at connect time. Integration tests drive
/// the sidecar against this backend.
#[derive(Default)]
pub struct MemStore {
    rows: Mutex<Vec<Student>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Student>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Student>> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn field_value(student: &Student, field: &str) -> Option<String> {
    match field {
        "id" => Some(student.id.clone()),
        "name" => Some(student.name.clone()),
        "cohort" => Some(student.cohort.clone()),
        "student_class" => Some(student.student_class.clone()),
        _ => None,
    }
}

fn matches(student: &Student, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Eq { field, value } => {
            field_value(student, field).is_some_and(|v| v == *value)
        }
        Predicate::ILike { field, pattern } => {
            field_value(student, field).is_some_and(|v| ilike_matches(pattern, &v))
        }
    }
}

impl RecordStore for MemStore {
    fn select(&self, predicates: &[Predicate]) -> anyhow::Result<Vec<Student>> {
        Ok(self
            .lock()
            .iter()
            .filter(|s| predicates.iter().all(|p| matches(s, p)))
            .cloned()
            .collect())
    }

    fn insert(&self, rows: &[NewStudent]) -> anyhow::Result<Vec<Student>> {
        let mut guard = self.lock();
        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let student = Student {
                id: Uuid::new_v4().to_string(),
                name: row.name.clone(),
                cohort: row.cohort.clone(),
                courses: Some(row.courses.clone()),
                date_joined: Some(row.date_joined),
                last_login: None,
                status: row.status,
                student_class: row.student_class.clone(),
            };
            guard.push(student.clone());
            stored.push(student);
        }
        Ok(stored)
    }

    // Like the remote store, updating or deleting an absent id succeeds and
    // affects zero rows.
    fn update(&self, id: &str, patch: &StudentPatch) -> anyhow::Result<()> {
        if let Some(student) = self.lock().iter_mut().find(|s| s.id == id) {
            patch.apply_to(student);
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.lock().retain(|s| s.id != id);
        Ok(())
    }
}
