//! In-memory inbox for accepted submissions.
//!
//! The accept handler never writes the map itself. It pushes an
//! `InboxEntry` on the channel and returns the receipt; `start_inbox_recorder`
//! is the only writer. Lookups by receipt take a read lock.
//!
//! - `InboxState`: clonable handle shared as `web::Data` in `main.rs`.
//! - `InboxEntry`: one accepted package and its receipt id.
//! - `start_inbox_recorder`: long-running task draining the channel.

use common::model::submission::SubmissionPackage;
use log::info;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// Capacity of the recorder channel.
pub const INBOX_CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct InboxState {
    /// Receipt id to recorded package.
    pub submissions: Arc<RwLock<HashMap<String, SubmissionPackage>>>,

    /// Sender side of the recorder channel. Handlers clone the state and push here.
    pub tx: mpsc::Sender<InboxEntry>,
}

#[derive(Debug)]
pub struct InboxEntry {
    pub(crate) receipt_id: String,
    pub(crate) package: SubmissionPackage,
}

impl InboxState {
    /// Creates an empty inbox and the receiver its recorder must drain.
    pub fn new() -> (Self, mpsc::Receiver<InboxEntry>) {
        let (tx, rx) = mpsc::channel(INBOX_CHANNEL_CAPACITY);
        let state = InboxState {
            submissions: Arc::new(RwLock::new(HashMap::new())),
            tx,
        };
        (state, rx)
    }

    pub async fn get(&self, receipt_id: &str) -> Option<SubmissionPackage> {
        self.submissions.read().await.get(receipt_id).cloned()
    }
}

/// Drains the recorder channel into the shared map until every sender is gone.
pub async fn start_inbox_recorder(state: InboxState, mut rx: mpsc::Receiver<InboxEntry>) {
    while let Some(entry) = rx.recv().await {
        info!(
            "Recorded submission {} for template `{}` ({} fields)",
            entry.receipt_id,
            entry.package.template_id,
            entry.package.data.len()
        );
        let mut submissions = state.submissions.write().await;
        submissions.insert(entry.receipt_id, entry.package);
    }
}
