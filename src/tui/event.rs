use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::Result;
use crate::wizard::Msg;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }

    /// Pump terminal events into the message channel on a dedicated thread.
    ///
    /// crossterm polling blocks, so this stays off the async runtime. Keys
    /// keep flowing after the wizard's work is cancelled; the thread exits
    /// once the receiver is dropped.
    pub fn spawn(self, tx: UnboundedSender<Msg>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            loop {
                let msg = match self.next() {
                    Ok(AppEvent::Key(key)) => Msg::Key(key),
                    Ok(AppEvent::Tick) => Msg::Tick,
                    Err(e) => {
                        tracing::error!("terminal event error: {}", e);
                        break;
                    }
                };
                if tx.send(msg).is_err() {
                    break;
                }
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Select,
    Insert(char),
    Backspace,
    None,
}
