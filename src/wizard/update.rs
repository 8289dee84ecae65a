use crate::domain::{resolve_space_input, Mode, ModeChoice, Post, PrinterChoice};
use crate::tui::event::Action;
use crate::wizard::msg::JobOutcome;
use crate::wizard::state::{Step, WizardState};
use crate::wizard::{Effect, Msg};

const WATCHING: &str = "Watching for new posts...";

/// Apply one message to the wizard and return the work it asks for.
///
/// Never blocks. Completion messages that arrive outside `Running` are stale
/// (cancelled or superseded work) and are dropped.
pub fn update(state: &mut WizardState, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::Input(action) => handle_input(state, action),
        Msg::Tick => {
            state.spinner = state.spinner.wrapping_add(1);
            Vec::new()
        }
        Msg::Debug(line) => {
            state.add_log(line);
            Vec::new()
        }
        Msg::Interrupted => quit(state),
        Msg::Key(_) => Vec::new(),
        Msg::PrintersLoaded(printers) if state.step == Step::PrinterSelect => {
            load_printers(state, printers);
            Vec::new()
        }
        msg if state.step == Step::Running => handle_running(state, msg),
        msg => {
            tracing::debug!("dropping {:?} in step {:?}", msg, state.step);
            Vec::new()
        }
    }
}

fn handle_input(state: &mut WizardState, action: Action) -> Vec<Effect> {
    if action == Action::Quit {
        return quit(state);
    }

    match state.step {
        Step::ModeSelect => match action {
            Action::MoveUp | Action::MoveDown => {
                move_cursor(state, action, ModeChoice::all().len());
                Vec::new()
            }
            Action::Select => {
                let Some(choice) = ModeChoice::all().get(state.cursor).copied() else {
                    return Vec::new();
                };
                state.mode = choice.mode;
                state.step = match choice.mode {
                    Mode::Space => Step::SpaceInput,
                    Mode::Post => Step::PostInput,
                };
                state.input.clear();
                state.input_error = None;
                state.cursor = 0;
                Vec::new()
            }
            _ => Vec::new(),
        },
        Step::SpaceInput | Step::PostInput => match action {
            Action::Insert(c) => {
                state.input.push(c);
                state.input_error = None;
                Vec::new()
            }
            Action::Backspace => {
                state.input.pop();
                state.input_error = None;
                Vec::new()
            }
            Action::Select => submit_input(state),
            _ => Vec::new(),
        },
        Step::PrinterSelect => match action {
            Action::MoveUp | Action::MoveDown => {
                let len = state.printer_choices().len();
                move_cursor(state, action, len);
                Vec::new()
            }
            Action::Select => select_printer(state),
            _ => Vec::new(),
        },
        Step::Running | Step::Done | Step::Error => Vec::new(),
    }
}

fn submit_input(state: &mut WizardState) -> Vec<Effect> {
    let value = state.input.trim().to_string();
    if value.is_empty() {
        state.input_error = Some("Input cannot be empty".to_string());
        return Vec::new();
    }

    if state.step == Step::SpaceInput {
        match resolve_space_input(&value, &state.default_base) {
            Ok(space) => {
                state.base = space.base;
                state.target_id = space.id;
            }
            Err(e) => {
                state.input_error = Some(format!("Invalid space input: {}", e));
                return Vec::new();
            }
        }
    } else {
        if value.contains(['/', '\\']) || value == "." || value == ".." {
            state.input_error = Some("Post ID cannot contain path separators".to_string());
            return Vec::new();
        }
        state.base = state.default_base.clone();
        state.target_id = value;
    }

    state.input_error = None;
    state.step = Step::PrinterSelect;
    state.cursor = 0;
    state.printers.clear();
    state.printers_loading = true;
    vec![Effect::LoadPrinters]
}

fn load_printers(state: &mut WizardState, printers: Vec<String>) {
    // Keep the highlighted choice stable while rows are inserted above it.
    let selected = state.printer_choices().get(state.cursor).cloned();
    state.printers = printers;
    state.printers_loading = false;
    let choices = state.printer_choices();
    state.cursor = selected
        .and_then(|s| choices.iter().position(|c| *c == s))
        .unwrap_or(0);
}

fn select_printer(state: &mut WizardState) -> Vec<Effect> {
    let Some(choice) = state.printer_choices().get(state.cursor).cloned() else {
        return Vec::new();
    };
    if choice == PrinterChoice::Cancel {
        return quit(state);
    }

    state.printer = choice.printer_name().map(String::from);
    state.step = Step::Running;
    state.status = "Downloading Chromium (first run) / launching browser".to_string();
    vec![Effect::LaunchRenderer]
}

fn handle_running(state: &mut WizardState, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::RendererLaunched(Err(e)) => fail(state, "Failed to start browser", e),
        Msg::RendererLaunched(Ok(())) => {
            state.add_log("Browser ready");
            match state.mode {
                Mode::Post => {
                    state.status = "Rendering post".to_string();
                    vec![Effect::RenderPost {
                        base: state.base.clone(),
                        post_id: state.target_id.clone(),
                    }]
                }
                Mode::Space => {
                    state.status = "Syncing space".to_string();
                    vec![Effect::SyncSpace {
                        base: state.base.clone(),
                        space_id: state.target_id.clone(),
                    }]
                }
            }
        }
        Msg::Rendered(Err(e)) => fail(state, "Render failed", e),
        Msg::Rendered(Ok(document)) => {
            state.add_log(document.path.display().to_string());
            match state.printer.clone() {
                Some(printer) => {
                    state.status = "Printing".to_string();
                    vec![Effect::PrintDocument { printer, document }]
                }
                None => finish(state),
            }
        }
        Msg::Printed { result: Err(e), .. } => fail(state, "Print failed", e),
        Msg::Printed {
            printer,
            result: Ok(()),
        } => {
            state.add_log(format!("[print] Sent to {}", printer));
            finish(state)
        }
        Msg::SpaceSynced(Err(e)) => fail(state, "Initial sync failed", e),
        Msg::SpaceSynced(Ok(posts)) => {
            state.seen.seed(&posts);
            state.add_log(format!("Tracking {} existing posts.", posts.len()));
            state.status = WATCHING.to_string();
            vec![Effect::SchedulePoll]
        }
        Msg::PollTick => vec![Effect::FetchPosts {
            base: state.base.clone(),
            space_id: state.target_id.clone(),
        }],
        Msg::Polled(result) => handle_poll(state, result),
        Msg::Processed { post, outcome } => handle_processed(state, post, outcome),
        other => {
            tracing::debug!("ignoring {:?} while running", other);
            Vec::new()
        }
    }
}

fn handle_poll(state: &mut WizardState, result: Result<Vec<Post>, String>) -> Vec<Effect> {
    let posts = match result {
        Ok(posts) => posts,
        Err(e) => {
            if state.debug {
                state.add_log(format!("[debug] polling error: {}", e));
            }
            return vec![Effect::SchedulePoll];
        }
    };

    let discovered = state.seen.filter_new(&posts);
    for post in &discovered {
        state.add_log(post.discovery_line());
    }

    match state.queue.enqueue(discovered) {
        Some(head) => {
            state.status = format!("Rendering {} new post(s)", state.queue.len());
            vec![process(state, head)]
        }
        None if state.queue.is_idle() => vec![Effect::SchedulePoll],
        // The job in flight reschedules polling once the queue drains.
        None => Vec::new(),
    }
}

fn handle_processed(state: &mut WizardState, post: Post, outcome: JobOutcome) -> Vec<Effect> {
    match outcome {
        JobOutcome::RenderFailed { error } => {
            state.add_log(format!("[error] render {}: {}", post.id, error));
        }
        JobOutcome::Saved { document } => {
            state.add_log(document.path.display().to_string());
        }
        JobOutcome::Printed { document, printer } => {
            state.add_log(document.path.display().to_string());
            state.add_log(format!("[print] Sent to {}", printer));
        }
        JobOutcome::PrintFailed {
            document, error, ..
        } => {
            state.add_log(format!(
                "{} [print error: {}]",
                document.path.display(),
                error
            ));
        }
    }

    match state.queue.complete(&post.id) {
        Some(next) => {
            state.status = format!("Rendering {} remaining", state.queue.len());
            vec![process(state, next)]
        }
        None if state.queue.is_idle() => {
            state.status = WATCHING.to_string();
            vec![Effect::SchedulePoll]
        }
        None => Vec::new(),
    }
}

fn process(state: &WizardState, post: Post) -> Effect {
    Effect::ProcessPost {
        base: state.base.clone(),
        post,
        printer: state.printer.clone(),
    }
}

fn move_cursor(state: &mut WizardState, action: Action, len: usize) {
    if len == 0 {
        return;
    }
    state.cursor = match action {
        Action::MoveUp => state.cursor.saturating_sub(1),
        Action::MoveDown => (state.cursor + 1).min(len - 1),
        _ => state.cursor,
    };
}

fn finish(state: &mut WizardState) -> Vec<Effect> {
    state.status = "Done".to_string();
    state.step = Step::Done;
    vec![Effect::Cancel]
}

fn fail(state: &mut WizardState, status: &str, error: String) -> Vec<Effect> {
    tracing::error!("{}: {}", status, error);
    state.status = status.to_string();
    state.error = Some(error);
    state.step = Step::Error;
    vec![Effect::Cancel]
}

fn quit(state: &mut WizardState) -> Vec<Effect> {
    state.should_quit = true;
    vec![Effect::Cancel]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_base;
    use crate::domain::post::post;
    use crate::render::RenderedDocument;
    use std::path::PathBuf;

    const HEX: &str = "abcdef0123456789abcdef0123456789";
    const CANONICAL: &str = "abcdef01-2345-6789-abcd-ef0123456789";

    fn new_state() -> WizardState {
        WizardState::new(default_base(false), false)
    }

    fn input(state: &mut WizardState, action: Action) -> Vec<Effect> {
        update(state, Msg::Input(action))
    }

    fn type_text(state: &mut WizardState, text: &str) {
        for c in text.chars() {
            input(state, Action::Insert(c));
        }
    }

    fn doc(id: &str) -> RenderedDocument {
        RenderedDocument {
            path: PathBuf::from(format!("/tmp/{}.pdf", id)),
            width: 384,
            height: 480,
        }
    }

    /// Walk the wizard to `Running` in space mode with the given printer row.
    fn running_space(printer_row: usize, printers: &[&str]) -> WizardState {
        let mut state = new_state();
        input(&mut state, Action::Select);
        type_text(&mut state, &format!("cozy-hut-{}", HEX));
        input(&mut state, Action::Select);
        update(
            &mut state,
            Msg::PrintersLoaded(printers.iter().map(|p| p.to_string()).collect()),
        );
        for _ in 0..printer_row {
            input(&mut state, Action::MoveDown);
        }
        assert_eq!(input(&mut state, Action::Select), vec![Effect::LaunchRenderer]);
        state
    }

    fn watching(printers: &[&str], printer_row: usize) -> WizardState {
        let mut state = running_space(printer_row, printers);
        update(&mut state, Msg::RendererLaunched(Ok(())));
        let effects = update(
            &mut state,
            Msg::SpaceSynced(Ok(vec![
                post("p2", "2024-01-02T00:00:00Z"),
                post("p1", "2024-01-01T00:00:00Z"),
            ])),
        );
        assert_eq!(effects, vec![Effect::SchedulePoll]);
        state
    }

    fn processing_order(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::ProcessPost { post, .. } => Some(post.id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_mode_select_moves_to_inputs() {
        let mut state = new_state();
        assert_eq!(state.step(), Step::ModeSelect);
        input(&mut state, Action::Select);
        assert_eq!(state.step(), Step::SpaceInput);
        assert_eq!(state.mode(), Mode::Space);

        let mut state = new_state();
        input(&mut state, Action::MoveDown);
        input(&mut state, Action::MoveDown);
        assert_eq!(state.cursor(), 1);
        input(&mut state, Action::Select);
        assert_eq!(state.step(), Step::PostInput);
        assert_eq!(state.mode(), Mode::Post);
    }

    #[test]
    fn test_empty_input_keeps_step() {
        let mut state = new_state();
        input(&mut state, Action::Select);
        type_text(&mut state, "   ");
        assert!(input(&mut state, Action::Select).is_empty());
        assert_eq!(state.step(), Step::SpaceInput);
        assert_eq!(state.input_error(), Some("Input cannot be empty"));
    }

    #[test]
    fn test_unknown_host_keeps_step_with_error() {
        let mut state = new_state();
        input(&mut state, Action::Select);
        type_text(&mut state, &format!("https://example.com/spaces/{}", HEX));
        assert!(input(&mut state, Action::Select).is_empty());
        assert_eq!(state.step(), Step::SpaceInput);
        assert_eq!(
            state.input_error(),
            Some("Invalid space input: unexpected host: example.com")
        );

        // Editing clears the message.
        input(&mut state, Action::Backspace);
        assert_eq!(state.input_error(), None);
    }

    #[test]
    fn test_valid_space_moves_to_printer_select() {
        let mut state = new_state();
        input(&mut state, Action::Select);
        type_text(&mut state, &format!("cozy-hut-{}", HEX));
        assert_eq!(input(&mut state, Action::Select), vec![Effect::LoadPrinters]);
        assert_eq!(state.step(), Step::PrinterSelect);
        assert_eq!(state.target_id(), CANONICAL);
        assert_eq!(state.base(), "https://smallerworld.club");
        assert!(state.printers_loading());
    }

    #[test]
    fn test_post_input_accepts_raw_id() {
        let mut state = WizardState::new(default_base(true), false);
        input(&mut state, Action::MoveDown);
        input(&mut state, Action::Select);
        type_text(&mut state, " post-123 ");
        input(&mut state, Action::Select);
        assert_eq!(state.step(), Step::PrinterSelect);
        assert_eq!(state.target_id(), "post-123");
        assert_eq!(state.base(), "http://localhost:3000");
    }

    #[test]
    fn test_post_input_rejects_path_like_ids() {
        for raw in ["../../etc/cron.d/x", "a/b", "a\\b", ".."] {
            let mut state = new_state();
            input(&mut state, Action::MoveDown);
            input(&mut state, Action::Select);
            type_text(&mut state, raw);
            assert!(input(&mut state, Action::Select).is_empty());
            assert_eq!(state.step(), Step::PostInput);
            assert_eq!(state.target_id(), "");
            assert_eq!(
                state.input_error(),
                Some("Post ID cannot contain path separators")
            );
        }
    }

    #[test]
    fn test_printers_loaded_keeps_highlighted_choice() {
        let mut state = new_state();
        input(&mut state, Action::Select);
        type_text(&mut state, HEX);
        input(&mut state, Action::Select);

        // Only [SaveOnly, Cancel] so far; highlight Cancel.
        input(&mut state, Action::MoveDown);
        update(
            &mut state,
            Msg::PrintersLoaded(vec!["office".into(), "label".into()]),
        );
        assert_eq!(state.cursor(), 3);
        assert_eq!(state.printer_choices()[3], PrinterChoice::Cancel);
    }

    #[test]
    fn test_cancel_choice_quits_without_running() {
        let mut state = new_state();
        input(&mut state, Action::Select);
        type_text(&mut state, HEX);
        input(&mut state, Action::Select);
        update(&mut state, Msg::PrintersLoaded(Vec::new()));
        input(&mut state, Action::MoveDown);
        assert_eq!(input(&mut state, Action::Select), vec![Effect::Cancel]);
        assert!(state.should_quit());
        assert_eq!(state.step(), Step::PrinterSelect);
    }

    #[test]
    fn test_printer_choice_is_recorded() {
        let state = running_space(1, &["office"]);
        assert_eq!(state.step(), Step::Running);
        assert_eq!(state.printer(), Some("office"));

        let state = running_space(0, &["office"]);
        assert_eq!(state.printer(), None);
    }

    #[test]
    fn test_launch_failure_is_fatal() {
        let mut state = running_space(0, &[]);
        let effects = update(&mut state, Msg::RendererLaunched(Err("no chrome".into())));
        assert_eq!(effects, vec![Effect::Cancel]);
        assert_eq!(state.step(), Step::Error);
        assert_eq!(state.error(), Some("no chrome"));

        // Terminal: only quit does anything.
        assert!(input(&mut state, Action::Select).is_empty());
        assert!(update(&mut state, Msg::PollTick).is_empty());
        assert_eq!(input(&mut state, Action::Quit), vec![Effect::Cancel]);
        assert!(state.should_quit());
    }

    #[test]
    fn test_single_post_render_and_print() {
        let mut state = new_state();
        input(&mut state, Action::MoveDown);
        input(&mut state, Action::Select);
        type_text(&mut state, "p42");
        input(&mut state, Action::Select);
        update(&mut state, Msg::PrintersLoaded(vec!["office".into()]));
        input(&mut state, Action::MoveDown);
        input(&mut state, Action::Select);

        let effects = update(&mut state, Msg::RendererLaunched(Ok(())));
        assert_eq!(
            effects,
            vec![Effect::RenderPost {
                base: "https://smallerworld.club".into(),
                post_id: "p42".into(),
            }]
        );

        let effects = update(&mut state, Msg::Rendered(Ok(doc("p42"))));
        assert_eq!(
            effects,
            vec![Effect::PrintDocument {
                printer: "office".into(),
                document: doc("p42"),
            }]
        );

        let effects = update(
            &mut state,
            Msg::Printed {
                printer: "office".into(),
                result: Ok(()),
            },
        );
        assert_eq!(effects, vec![Effect::Cancel]);
        assert_eq!(state.step(), Step::Done);
        assert!(state.logs().iter().any(|l| l == "[print] Sent to office"));
    }

    #[test]
    fn test_single_post_save_only_finishes_after_render() {
        let mut state = new_state();
        input(&mut state, Action::MoveDown);
        input(&mut state, Action::Select);
        type_text(&mut state, "p42");
        input(&mut state, Action::Select);
        input(&mut state, Action::Select);
        update(&mut state, Msg::RendererLaunched(Ok(())));

        assert_eq!(
            update(&mut state, Msg::Rendered(Ok(doc("p42")))),
            vec![Effect::Cancel]
        );
        assert_eq!(state.step(), Step::Done);
        assert!(state.logs().iter().any(|l| l == "/tmp/p42.pdf"));
    }

    #[test]
    fn test_single_post_render_failure_is_fatal() {
        let mut state = new_state();
        input(&mut state, Action::MoveDown);
        input(&mut state, Action::Select);
        type_text(&mut state, "p42");
        input(&mut state, Action::Select);
        input(&mut state, Action::Select);
        update(&mut state, Msg::RendererLaunched(Ok(())));
        update(&mut state, Msg::Rendered(Err("timeout".into())));
        assert_eq!(state.step(), Step::Error);
        assert_eq!(state.status(), "Render failed");
    }

    #[test]
    fn test_space_launch_triggers_initial_sync() {
        let mut state = running_space(0, &[]);
        let effects = update(&mut state, Msg::RendererLaunched(Ok(())));
        assert_eq!(
            effects,
            vec![Effect::SyncSpace {
                base: "https://smallerworld.club".into(),
                space_id: CANONICAL.into(),
            }]
        );
    }

    #[test]
    fn test_initial_sync_seeds_without_queueing() {
        let state = watching(&[], 0);
        assert!(state.seen().is_seen("p1"));
        assert!(state.seen().is_seen("p2"));
        assert!(state.queue().is_empty());
        assert!(state.logs().iter().any(|l| l == "Tracking 2 existing posts."));
        assert_eq!(state.status(), WATCHING);
    }

    #[test]
    fn test_initial_sync_failure_is_fatal() {
        let mut state = running_space(0, &[]);
        update(&mut state, Msg::RendererLaunched(Ok(())));
        update(&mut state, Msg::SpaceSynced(Err("fetch posts: 500".into())));
        assert_eq!(state.step(), Step::Error);
    }

    #[test]
    fn test_poll_tick_fetches() {
        let mut state = watching(&[], 0);
        assert_eq!(
            update(&mut state, Msg::PollTick),
            vec![Effect::FetchPosts {
                base: "https://smallerworld.club".into(),
                space_id: CANONICAL.into(),
            }]
        );
    }

    #[test]
    fn test_poll_error_retries_without_touching_state() {
        let mut state = watching(&[], 0);
        let watermark = state.seen().watermark();
        let effects = update(&mut state, Msg::Polled(Err("connection refused".into())));
        assert_eq!(effects, vec![Effect::SchedulePoll]);
        assert_eq!(state.seen().watermark(), watermark);
        assert_eq!(state.seen().len(), 2);
        assert_eq!(state.step(), Step::Running);
        // Not logged without debug.
        assert!(!state.logs().iter().any(|l| l.contains("polling error")));
    }

    #[test]
    fn test_poll_error_logged_in_debug() {
        let mut state = watching(&[], 0);
        state.debug = true;
        update(&mut state, Msg::Polled(Err("connection refused".into())));
        assert!(state
            .logs()
            .iter()
            .any(|l| l == "[debug] polling error: connection refused"));
    }

    #[test]
    fn test_quiet_poll_reschedules() {
        let mut state = watching(&[], 0);
        let effects = update(
            &mut state,
            Msg::Polled(Ok(vec![post("p2", "2024-01-02T00:00:00Z")])),
        );
        assert_eq!(effects, vec![Effect::SchedulePoll]);
    }

    #[test]
    fn test_new_post_is_processed_with_printer() {
        let mut state = watching(&["office"], 1);
        let effects = update(
            &mut state,
            Msg::Polled(Ok(vec![
                post("p3", "2024-01-03T00:00:00Z"),
                post("p2", "2024-01-02T00:00:00Z"),
                post("p1", "2024-01-01T00:00:00Z"),
            ])),
        );
        assert_eq!(
            effects,
            vec![Effect::ProcessPost {
                base: "https://smallerworld.club".into(),
                post: post("p3", "2024-01-03T00:00:00Z"),
                printer: Some("office".into()),
            }]
        );
        assert!(state
            .logs()
            .iter()
            .any(|l| l == "New post from Ada: hello from p3 [p3]"));
        assert_eq!(state.status(), "Rendering 1 new post(s)");
    }

    #[test]
    fn test_queue_drains_in_order_despite_failures() {
        let mut state = watching(&[], 0);
        let effects = update(
            &mut state,
            Msg::Polled(Ok(vec![
                post("C", "2024-01-05T00:00:00Z"),
                post("B", "2024-01-04T00:00:00Z"),
                post("A", "2024-01-03T00:00:00Z"),
            ])),
        );
        let mut dispatched = processing_order(&effects);
        assert_eq!(dispatched, vec!["A"]);

        let effects = update(
            &mut state,
            Msg::Processed {
                post: post("A", "2024-01-03T00:00:00Z"),
                outcome: JobOutcome::Saved { document: doc("A") },
            },
        );
        dispatched.extend(processing_order(&effects));

        let effects = update(
            &mut state,
            Msg::Processed {
                post: post("B", "2024-01-04T00:00:00Z"),
                outcome: JobOutcome::RenderFailed {
                    error: "selector missing".into(),
                },
            },
        );
        dispatched.extend(processing_order(&effects));
        assert_eq!(state.status(), "Rendering 1 remaining");

        let effects = update(
            &mut state,
            Msg::Processed {
                post: post("C", "2024-01-05T00:00:00Z"),
                outcome: JobOutcome::Saved { document: doc("C") },
            },
        );
        assert_eq!(effects, vec![Effect::SchedulePoll]);

        assert_eq!(dispatched, vec!["A", "B", "C"]);
        assert!(state
            .logs()
            .iter()
            .any(|l| l == "[error] render B: selector missing"));
        assert!(state.logs().iter().any(|l| l == "/tmp/A.pdf"));
        assert!(state.logs().iter().any(|l| l == "/tmp/C.pdf"));
        assert_eq!(state.status(), WATCHING);
        assert_eq!(state.step(), Step::Running);
    }

    #[test]
    fn test_print_failure_is_logged_and_queue_advances() {
        let mut state = watching(&["office"], 1);
        update(
            &mut state,
            Msg::Polled(Ok(vec![
                post("B", "2024-01-04T00:00:00Z"),
                post("A", "2024-01-03T00:00:00Z"),
            ])),
        );
        let effects = update(
            &mut state,
            Msg::Processed {
                post: post("A", "2024-01-03T00:00:00Z"),
                outcome: JobOutcome::PrintFailed {
                    document: doc("A"),
                    printer: "office".into(),
                    error: "lp error: exit status: 1".into(),
                },
            },
        );
        assert_eq!(processing_order(&effects), vec!["B"]);
        assert!(state
            .logs()
            .iter()
            .any(|l| l == "/tmp/A.pdf [print error: lp error: exit status: 1]"));
    }

    #[test]
    fn test_posts_found_while_busy_wait_their_turn() {
        let mut state = watching(&[], 0);
        update(
            &mut state,
            Msg::Polled(Ok(vec![post("A", "2024-01-03T00:00:00Z")])),
        );
        // A second poll result lands while A is in flight.
        let effects = update(
            &mut state,
            Msg::Polled(Ok(vec![
                post("B", "2024-01-04T00:00:00Z"),
                post("A", "2024-01-03T00:00:00Z"),
            ])),
        );
        assert!(effects.is_empty());
        assert_eq!(state.queue().len(), 2);

        let effects = update(
            &mut state,
            Msg::Processed {
                post: post("A", "2024-01-03T00:00:00Z"),
                outcome: JobOutcome::Saved { document: doc("A") },
            },
        );
        assert_eq!(processing_order(&effects), vec!["B"]);
    }

    #[test]
    fn test_reappearing_post_is_not_reprocessed() {
        let mut state = watching(&[], 0);
        let fetched = vec![
            post("p3", "2024-01-03T00:00:00Z"),
            post("p2", "2024-01-02T00:00:00Z"),
        ];
        update(&mut state, Msg::Polled(Ok(fetched.clone())));
        update(
            &mut state,
            Msg::Processed {
                post: post("p3", "2024-01-03T00:00:00Z"),
                outcome: JobOutcome::Saved {
                    document: doc("p3"),
                },
            },
        );
        let effects = update(&mut state, Msg::Polled(Ok(fetched)));
        assert_eq!(effects, vec![Effect::SchedulePoll]);
    }

    #[test]
    fn test_stale_completion_after_error_is_dropped() {
        let mut state = watching(&[], 0);
        state.step = Step::Error;
        assert!(update(
            &mut state,
            Msg::Polled(Ok(vec![post("p9", "2024-02-01T00:00:00Z")]))
        )
        .is_empty());
        assert!(!state.seen().is_seen("p9"));
    }

    fn assert_terminal_ignores_input(state: &mut WizardState) {
        let step = state.step();
        let cursor = state.cursor();
        let typed = state.input().to_string();

        for action in [
            Action::Select,
            Action::MoveUp,
            Action::MoveDown,
            Action::Insert('x'),
            Action::Backspace,
        ] {
            assert!(input(state, action).is_empty(), "{:?} in {:?}", action, step);
            assert_eq!(state.step(), step);
            assert_eq!(state.cursor(), cursor);
            assert_eq!(state.input(), typed);
            assert!(!state.should_quit());
        }

        assert_eq!(input(state, Action::Quit), vec![Effect::Cancel]);
        assert!(state.should_quit());
        assert_eq!(state.step(), step);
    }

    #[test]
    fn test_done_accepts_only_quit() {
        let mut state = new_state();
        input(&mut state, Action::MoveDown);
        input(&mut state, Action::Select);
        type_text(&mut state, "p42");
        input(&mut state, Action::Select);
        input(&mut state, Action::Select);
        update(&mut state, Msg::RendererLaunched(Ok(())));
        update(&mut state, Msg::Rendered(Ok(doc("p42"))));
        assert_eq!(state.step(), Step::Done);

        assert_terminal_ignores_input(&mut state);
    }

    #[test]
    fn test_error_accepts_only_quit() {
        let mut state = running_space(1, &["office"]);
        update(&mut state, Msg::RendererLaunched(Err("no chrome".into())));
        assert_eq!(state.step(), Step::Error);

        assert_terminal_ignores_input(&mut state);
        assert_eq!(state.error(), Some("no chrome"));
    }

    #[test]
    fn test_debug_lines_and_ticks() {
        let mut state = new_state();
        update(&mut state, Msg::Debug("[debug] hello".into()));
        assert_eq!(state.logs(), ["[debug] hello".to_string()]);

        let before = state.spinner_frame();
        update(&mut state, Msg::Tick);
        assert_ne!(state.spinner_frame(), before);
    }

    #[test]
    fn test_interrupt_quits_from_anywhere() {
        let mut state = watching(&[], 0);
        assert_eq!(update(&mut state, Msg::Interrupted), vec![Effect::Cancel]);
        assert!(state.should_quit());
    }
}
