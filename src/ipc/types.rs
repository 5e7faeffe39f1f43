use serde::Deserialize;

use crate::roster::{self, Event, RosterState};
use crate::store::RecordStore;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Default)]
pub struct AppState {
    pub store: Option<Box<dyn RecordStore>>,
    pub backend: Option<String>,
    pub roster: RosterState,
}

impl AppState {
    /// Fold one event through the reducer.
    pub fn apply(&mut self, event: Event) {
        self.roster = roster::reduce(std::mem::take(&mut self.roster), event);
    }
}
