use crate::domain::{ListEntry, Mode, ModeChoice, PrinterChoice};
use crate::watch::{JobQueue, SeenPosts};

pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
pub const MAX_LOG_LINES: usize = 20;
const LOG_CAPACITY: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ModeSelect,
    SpaceInput,
    PostInput,
    PrinterSelect,
    Running,
    Done,
    Error,
}

impl Step {
    pub fn accepts_text(self) -> bool {
        matches!(self, Step::SpaceInput | Step::PostInput)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Step::Done | Step::Error)
    }
}

/// Everything the wizard knows. Owned by the controller loop and mutated only
/// through [`update`](crate::wizard::update).
#[derive(Debug, Clone)]
pub struct WizardState {
    pub(crate) step: Step,
    pub(crate) mode: Mode,
    pub(crate) debug: bool,
    pub(crate) default_base: String,
    pub(crate) base: String,
    pub(crate) target_id: String,
    pub(crate) printer: Option<String>,

    pub(crate) cursor: usize,
    pub(crate) printers: Vec<String>,
    pub(crate) printers_loading: bool,
    pub(crate) input: String,
    pub(crate) input_error: Option<String>,

    pub(crate) status: String,
    pub(crate) logs: Vec<String>,
    pub(crate) error: Option<String>,
    pub(crate) spinner: usize,
    pub(crate) should_quit: bool,

    pub(crate) seen: SeenPosts,
    pub(crate) queue: JobQueue,
}

impl WizardState {
    pub fn new(default_base: String, debug: bool) -> Self {
        Self {
            step: Step::ModeSelect,
            mode: Mode::Space,
            debug,
            base: default_base.clone(),
            default_base,
            target_id: String::new(),
            printer: None,
            cursor: 0,
            printers: Vec::new(),
            printers_loading: false,
            input: String::new(),
            input_error: None,
            status: String::new(),
            logs: Vec::new(),
            error: None,
            spinner: 0,
            should_quit: false,
            seen: SeenPosts::new(),
            queue: JobQueue::new(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn printer(&self) -> Option<&str> {
        self.printer.as_deref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn seen(&self) -> &SeenPosts {
        &self.seen
    }

    pub fn queue(&self) -> &JobQueue {
        &self.queue
    }

    pub fn printers_loading(&self) -> bool {
        self.printers_loading
    }

    pub fn printer_choices(&self) -> Vec<PrinterChoice> {
        PrinterChoice::list(&self.printers)
    }

    /// Title of the list shown in list steps.
    pub fn list_title(&self) -> &'static str {
        match self.step {
            Step::PrinterSelect => "Select a printer (default: save only)",
            _ => "What do you want to do?",
        }
    }

    /// (title, description) rows for the current list step.
    pub fn list_rows(&self) -> Vec<(String, String)> {
        fn row(entry: &impl ListEntry) -> (String, String) {
            (entry.title().to_string(), entry.description().to_string())
        }
        match self.step {
            Step::ModeSelect => ModeChoice::all().iter().map(row).collect(),
            Step::PrinterSelect => self.printer_choices().iter().map(row).collect(),
            _ => Vec::new(),
        }
    }

    pub fn input_label(&self) -> &'static str {
        match self.step {
            Step::PostInput => "Enter post ID (UUID)",
            _ => "Enter space URL / friendly ID / ID",
        }
    }

    pub fn input_prompt(&self) -> &'static str {
        match self.step {
            Step::PostInput => "Post: ",
            _ => "Space: ",
        }
    }

    pub fn input_placeholder(&self) -> &'static str {
        match self.step {
            Step::PostInput => "123e4567-e89b-12d3-a456-426614174000",
            _ => "https://smallerworld.club/spaces/cozy-hut-abcdef0123456789abcdef0123456789",
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()]
    }

    pub fn recent_logs(&self) -> &[String] {
        let start = self.logs.len().saturating_sub(MAX_LOG_LINES);
        &self.logs[start..]
    }

    pub(crate) fn add_log(&mut self, line: impl Into<String>) {
        self.logs.push(line.into());
        if self.logs.len() > LOG_CAPACITY {
            let excess = self.logs.len() - LOG_CAPACITY;
            self.logs.drain(..excess);
        }
    }
}
