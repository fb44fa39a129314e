pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use ledger::{Ledger, LedgerError};
pub use persistence::{KeyValueStore, MemoryStore, PersistenceAdapter};
pub use state::AppState;
pub use storage::FileStore;
