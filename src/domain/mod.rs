pub mod choice;
pub mod post;
pub mod space;

pub use choice::{ListEntry, Mode, ModeChoice, PrinterChoice};
pub use post::{Post, PostsResponse};
pub use space::{canonical_space_id, default_base, resolve_space_input, SpaceInputError, SpaceRef};
