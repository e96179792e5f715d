//! One-shot completion signals.
//!
//! A [`SignalTrigger`] settles exactly once, with success or a
//! [`SignalError`]. Any number of cloned [`Signal`] handles can await the
//! outcome, including handles taken after it settled.

use thiserror::Error;
use tokio::sync::watch;

pub type SignalResult = Result<(), SignalError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("player disconnected")]
    Disconnected,
    #[error("signal dropped before it was settled")]
    Dropped,
    #[error("{0}")]
    Failed(String),
}

/// Settling side of a signal.
#[derive(Debug)]
pub struct SignalTrigger {
    tx: watch::Sender<Option<SignalResult>>,
}

/// Awaiting side of a signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Signal {
    rx: watch::Receiver<Option<SignalResult>>,
}

/// Create an unsettled signal.
pub fn signal() -> (SignalTrigger, Signal) {
    let (tx, rx) = watch::channel(None);
    (SignalTrigger { tx }, Signal { rx })
}

impl SignalTrigger {
    /// Settle with success. Returns false if the signal was already settled.
    pub fn resolve(&self) -> bool {
        self.settle(Ok(()))
    }

    /// Settle with a failure. Returns false if the signal was already settled.
    pub fn fail(&self, err: SignalError) -> bool {
        self.settle(Err(err))
    }

    pub fn is_settled(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// A new handle onto this signal.
    pub fn signal(&self) -> Signal {
        Signal {
            rx: self.tx.subscribe(),
        }
    }

    fn settle(&self, outcome: SignalResult) -> bool {
        self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(outcome);
            true
        })
    }
}

impl Signal {
    /// Current outcome without waiting.
    pub fn peek(&self) -> Option<SignalResult> {
        self.rx.borrow().clone()
    }

    /// Wait until the signal settles.
    pub async fn wait(mut self) -> SignalResult {
        let outcome = match self.rx.wait_for(Option::is_some).await {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        outcome.unwrap_or(Err(SignalError::Dropped))
    }
}
