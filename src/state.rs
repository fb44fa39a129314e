use crate::ledger::Ledger;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared handle to the session's single ledger.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<Ledger<FileStore>>>,
}

impl AppState {
    pub fn new(ledger: Ledger<FileStore>) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}
