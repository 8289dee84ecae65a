//! # postprint
//!
//! Watches a smallerworld space (or takes a single post), renders each post's
//! print page to a PDF cut to the post card, and optionally sends it to a
//! printer.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → SeenPosts → JobQueue → Renderer → Spooler
//!                 ↑ wizard::update (single owner of state) ↓
//!                 └──────────── Msg ← Runtime tasks ←───────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Watch a space and print new posts
//! postprint
//!
//! # Against a local dev server, with diagnostics
//! postprint --local --debug
//! ```

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires the fetcher, spooler and browser
/// launcher used by the wizard runtime.
pub mod app;

/// Command-line flags.
pub mod cli;

/// Configuration loaded from `~/.config/postprint/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Post`](domain::Post): one post from a space feed
/// - [`resolve_space_input`](domain::resolve_space_input): space URL or ID to canonical form
/// - [`ModeChoice`](domain::ModeChoice), [`PrinterChoice`](domain::PrinterChoice): list rows
pub mod domain;

/// HTTP access to a space's posts.
pub mod fetcher;

/// Print submission through CUPS.
pub mod print;

/// Headless Chromium rendering.
pub mod render;

/// Terminal user interface.
pub mod tui;

/// Dedup state and the processing queue for watched spaces.
pub mod watch;

/// The wizard state machine and the runtime that drives it.
pub mod wizard;
