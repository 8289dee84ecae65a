use tokio::sync::mpsc::{self, error::TrySendError, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::wizard::Msg;

pub const DEBUG_BUS_CAPACITY: usize = 256;

/// Best-effort diagnostics from background tasks to the wizard loop.
///
/// Publishing never blocks: when the buffer is full the line is dropped.
/// A disabled bus (no `--debug`) discards everything.
#[derive(Debug, Clone)]
pub struct DebugBus {
    tx: Option<mpsc::Sender<String>>,
}

/// Receiving half of an enabled [`DebugBus`].
#[derive(Debug)]
pub struct DebugListener {
    rx: mpsc::Receiver<String>,
}

impl DebugBus {
    pub fn new(enabled: bool) -> (Self, Option<DebugListener>) {
        if !enabled {
            return (Self::disabled(), None);
        }
        let (tx, rx) = mpsc::channel(DEBUG_BUS_CAPACITY);
        (Self { tx: Some(tx) }, Some(DebugListener { rx }))
    }

    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn publish(&self, line: impl Into<String>) {
        let Some(tx) = &self.tx else {
            return;
        };
        let line = line.into();
        tracing::debug!("{}", line);
        match tx.try_send(format!("[debug] {}", line)) {
            Ok(()) | Err(TrySendError::Closed(_)) => {}
            Err(TrySendError::Full(_)) => tracing::trace!("debug bus full, dropping line"),
        }
    }
}

impl DebugListener {
    /// Forward each line to the wizard as its own `Msg::Debug`, until
    /// cancelled or every publisher is gone.
    pub fn listen(mut self, tx: UnboundedSender<Msg>, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let line = tokio::select! {
                    _ = cancel.cancelled() => break,
                    line = self.rx.recv() => line,
                };
                let Some(line) = line else {
                    break;
                };
                if tx.send(Msg::Debug(line)).is_err() {
                    break;
                }
            }
        })
    }
}
