//! The interactive flow: collect a target and a printer, then run.
//!
//! ```text
//! ModeSelect → SpaceInput | PostInput → PrinterSelect → Running → Done | Error
//! ```
//!
//! State changes only in [`update`], which is pure: it takes one [`Msg`] and
//! returns the [`Effect`]s to start. The [`Runtime`] runs each effect as a
//! task that answers with one `Msg`, so all state lives on the loop that
//! calls [`Controller::handle`].

pub mod bus;
mod effect;
mod msg;
mod runtime;
mod state;
mod update;

pub use bus::{DebugBus, DebugListener};
pub use effect::Effect;
pub use msg::{JobOutcome, Msg};
pub use runtime::{Controller, Runtime};
pub use state::{Step, WizardState, MAX_LOG_LINES};
pub use update::update;
