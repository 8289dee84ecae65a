use crossterm::event::KeyEvent;

use crate::domain::Post;
use crate::render::RenderedDocument;
use crate::tui::event::Action;

/// Outcome of one queued render(+print) job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    RenderFailed {
        error: String,
    },
    Saved {
        document: RenderedDocument,
    },
    Printed {
        document: RenderedDocument,
        printer: String,
    },
    PrintFailed {
        document: RenderedDocument,
        printer: String,
        error: String,
    },
}

/// Everything that can happen to the wizard, in arrival order.
///
/// Completion messages carry errors as display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Raw key press; the controller translates it into [`Msg::Input`].
    Key(KeyEvent),
    /// A key press already mapped to an action.
    Input(Action),
    /// UI tick, advances the spinner.
    Tick,
    /// SIGINT outside of raw mode.
    Interrupted,
    PrintersLoaded(Vec<String>),
    RendererLaunched(Result<(), String>),
    /// Single post rendered.
    Rendered(Result<RenderedDocument, String>),
    /// Single post printed.
    Printed {
        printer: String,
        result: Result<(), String>,
    },
    /// Initial full fetch of the space.
    SpaceSynced(Result<Vec<Post>, String>),
    /// Poll interval elapsed.
    PollTick,
    Polled(Result<Vec<Post>, String>),
    /// A queued job finished, successfully or not.
    Processed {
        post: Post,
        outcome: JobOutcome,
    },
    Debug(String),
}
