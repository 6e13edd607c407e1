use std::sync::Arc;
use tokio::sync::Mutex;

use crate::records::DayRecordService;
use crate::storage::ProgressStore;

#[derive(Clone)]
pub struct AppState {
    pub store: ProgressStore,
    pub records: DayRecordService,
    /// The store is last-writer-wins, so mutating handlers take this first.
    pub write_gate: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: ProgressStore) -> Self {
        Self {
            records: DayRecordService::new(store.clone()),
            store,
            write_gate: Arc::new(Mutex::new(())),
        }
    }
}
