use super::store::WizardStore;
use crate::domain::amount::AmountUpdate;
use crate::domain::session::{PaymentSession, WizardCommand};
use crate::error::{Result, WizardError};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// The sessions on either side of one committed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub before: PaymentSession,
    pub after: PaymentSession,
}

enum Request {
    Apply {
        command: WizardCommand,
        reply: Option<oneshot::Sender<Transition>>,
    },
    Snapshot(oneshot::Sender<PaymentSession>),
}

/// Cloneable handle to a store running on its own task.
///
/// Commands from every handle land in one FIFO queue and are applied one at a
/// time against the committed session.
#[derive(Clone)]
pub struct StoreHandle {
    requests: mpsc::UnboundedSender<Request>,
    snapshots: watch::Receiver<PaymentSession>,
}

/// Moves `store` onto a task that serializes every update to it.
///
/// The task ends once all handles are dropped and yields the store back.
pub fn spawn_store(store: WizardStore) -> (StoreHandle, JoinHandle<WizardStore>) {
    let (requests, mut inbox) = mpsc::unbounded_channel::<Request>();
    let (publisher, snapshots) = watch::channel(store.session().clone());

    let task = tokio::spawn(async move {
        let mut store = store;
        while let Some(request) = inbox.recv().await {
            match request {
                Request::Apply { command, reply } => {
                    let before = reply.as_ref().map(|_| store.session().clone());
                    let committed = store.dispatch(command).clone();
                    publisher.send_replace(committed.clone());
                    if let (Some(reply), Some(before)) = (reply, before) {
                        // The caller may have stopped waiting.
                        let _ = reply.send(Transition {
                            before,
                            after: committed,
                        });
                    }
                }
                Request::Snapshot(reply) => {
                    let _ = reply.send(store.session().clone());
                }
            }
        }
        tracing::debug!("wizard store queue drained");
        store
    });

    (StoreHandle { requests, snapshots }, task)
}

impl StoreHandle {
    /// Queues `command` without waiting for it to commit.
    pub fn send(&self, command: WizardCommand) -> Result<()> {
        self.requests
            .send(Request::Apply {
                command,
                reply: None,
            })
            .map_err(|_| WizardError::StoreClosed)
    }

    /// Queues `command` and waits for the session it produced.
    pub async fn dispatch(&self, command: WizardCommand) -> Result<PaymentSession> {
        Ok(self.dispatch_transition(command).await?.after)
    }

    /// Queues `command` and waits for the sessions it was applied to and
    /// produced. Both are read inside the queue, so nothing else lands
    /// between them.
    pub async fn dispatch_transition(&self, command: WizardCommand) -> Result<Transition> {
        let (reply, committed) = oneshot::channel();
        self.requests
            .send(Request::Apply {
                command,
                reply: Some(reply),
            })
            .map_err(|_| WizardError::StoreClosed)?;
        committed.await.map_err(|_| WizardError::StoreClosed)
    }

    /// The session after every command queued so far has been applied.
    pub async fn current(&self) -> Result<PaymentSession> {
        let (reply, session) = oneshot::channel();
        self.requests
            .send(Request::Snapshot(reply))
            .map_err(|_| WizardError::StoreClosed)?;
        session.await.map_err(|_| WizardError::StoreClosed)
    }

    /// The most recently committed session. Does not wait for queued commands.
    pub fn snapshot(&self) -> PaymentSession {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PaymentSession> {
        self.snapshots.clone()
    }

    pub fn send_amount(&self, update: impl Into<AmountUpdate>) -> Result<()> {
        self.send(WizardCommand::SetAmount(update.into()))
    }
}
