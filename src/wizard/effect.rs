use crate::domain::Post;
use crate::render::RenderedDocument;

/// Work the controller asks for. Each effect runs as its own task and
/// reports back with exactly one [`Msg`](crate::wizard::Msg).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadPrinters,
    LaunchRenderer,
    RenderPost {
        base: String,
        post_id: String,
    },
    PrintDocument {
        printer: String,
        document: RenderedDocument,
    },
    SyncSpace {
        base: String,
        space_id: String,
    },
    SchedulePoll,
    FetchPosts {
        base: String,
        space_id: String,
    },
    ProcessPost {
        base: String,
        post: Post,
        printer: Option<String>,
    },
    /// Raise the process-wide cancellation signal.
    Cancel,
}
