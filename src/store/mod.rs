use crate::model::{NewStudent, Student, StudentPatch};
use crate::query::Predicate;

mod http;
mod mem;

pub use http::HttpStore;
pub use mem::MemStore;

/// The consumed contract of the hosted table store, over the `students`
/// table. Implementations own wire format and transport; callers only see
/// typed rows.
pub trait RecordStore {
    fn select(&self, predicates: &[Predicate]) -> anyhow::Result<Vec<Student>>;
    /// Returns the stored rows, identifiers assigned by the store.
    fn insert(&self, rows: &[NewStudent]) -> anyhow::Result<Vec<Student>>;
    fn update(&self, id: &str, patch: &StudentPatch) -> anyhow::Result<()>;
    fn delete(&self, id: &str) -> anyhow::Result<()>;
}
