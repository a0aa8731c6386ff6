use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::model::Task;
use crate::remote::client::IssueClient;
use crate::remote::issue::IssuePatch;

/// Intents sent from the UI thread to the sync worker. `seq` ties a
/// mutation to the optimistic change it confirms or rolls back.
#[derive(Debug)]
pub enum SyncCommand {
    Load,
    Create {
        seq: u64,
        title: String,
        body: String,
    },
    SetState {
        seq: u64,
        number: u64,
        completed: bool,
    },
    Edit {
        seq: u64,
        number: u64,
        title: String,
        body: String,
    },
    Shutdown,
}

/// Effects polled by the UI thread each tick.
#[derive(Debug)]
pub enum SyncEvent {
    Loaded { tasks: Vec<Task> },
    LoadFailed { error: String },
    Created { seq: u64, task: Task },
    CreateFailed { seq: u64, error: String },
    Updated { seq: u64, task: Task },
    UpdateFailed { seq: u64, error: String },
}

const LOAD_ATTEMPTS: u32 = 3;
const LOAD_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Background thread owning the HTTP client. Commands are processed
/// sequentially; every command produces exactly one event.
pub struct SyncWorker {
    tx: Sender<SyncCommand>,
    rx: Receiver<SyncEvent>,
}

impl SyncWorker {
    pub fn start(client: IssueClient) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        thread::spawn(move || run_worker(client, cmd_rx, evt_tx));
        SyncWorker {
            tx: cmd_tx,
            rx: evt_rx,
        }
    }

    /// A worker with no thread behind it: commands land in the returned
    /// receiver, events come from the returned sender. For tests.
    #[cfg(test)]
    pub fn loopback() -> (Self, Receiver<SyncCommand>, Sender<SyncEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        (
            SyncWorker {
                tx: cmd_tx,
                rx: evt_rx,
            },
            cmd_rx,
            evt_tx,
        )
    }

    pub fn send(&self, cmd: SyncCommand) {
        let _ = self.tx.send(cmd);
    }

    /// Non-blocking poll for pending events. Returns all queued events
    /// (may be empty); called once per event-loop tick.
    pub fn poll(&self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for SyncWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(SyncCommand::Shutdown);
    }
}

fn run_worker(client: IssueClient, cmd_rx: Receiver<SyncCommand>, evt_tx: Sender<SyncEvent>) {
    while let Ok(cmd) = cmd_rx.recv() {
        let event = match cmd {
            SyncCommand::Shutdown => break,
            SyncCommand::Load => load_with_retry(&client),
            SyncCommand::Create { seq, title, body } => match client.create(&title, &body) {
                Ok(task) => SyncEvent::Created { seq, task },
                Err(e) => {
                    warn!(seq, error = %e, "create failed");
                    SyncEvent::CreateFailed {
                        seq,
                        error: e.to_string(),
                    }
                }
            },
            SyncCommand::SetState {
                seq,
                number,
                completed,
            } => match client.update(number, &IssuePatch::state(completed)) {
                Ok(task) => SyncEvent::Updated { seq, task },
                Err(e) => {
                    warn!(seq, number, error = %e, "state update failed");
                    SyncEvent::UpdateFailed {
                        seq,
                        error: e.to_string(),
                    }
                }
            },
            SyncCommand::Edit {
                seq,
                number,
                title,
                body,
            } => match client.update(number, &IssuePatch::text(title, body)) {
                Ok(task) => SyncEvent::Updated { seq, task },
                Err(e) => {
                    warn!(seq, number, error = %e, "edit failed");
                    SyncEvent::UpdateFailed {
                        seq,
                        error: e.to_string(),
                    }
                }
            },
        };
        if evt_tx.send(event).is_err() {
            break;
        }
    }
}

/// Loads are idempotent, so they get a few attempts before the failure is
/// surfaced. Mutations are never retried.
fn load_with_retry(client: &IssueClient) -> SyncEvent {
    let mut last_error = String::new();
    for attempt in 1..=LOAD_ATTEMPTS {
        match client.list() {
            Ok(tasks) => return SyncEvent::Loaded { tasks },
            Err(e) => {
                warn!(attempt, error = %e, "load failed");
                last_error = e.to_string();
                if attempt < LOAD_ATTEMPTS {
                    thread::sleep(LOAD_RETRY_DELAY);
                }
            }
        }
    }
    SyncEvent::LoadFailed { error: last_error }
}
