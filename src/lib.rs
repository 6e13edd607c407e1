pub mod app;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod records;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use records::DayRecordService;
pub use state::AppState;
pub use storage::{resolve_data_dir, JsonFileStore, KvStore, MemoryStore, ProgressStore};
