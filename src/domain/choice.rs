/// Shared display contract for wizard list rows.
pub trait ListEntry {
    fn title(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Space,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChoice {
    pub mode: Mode,
}

impl ModeChoice {
    pub fn all() -> Vec<ModeChoice> {
        vec![
            ModeChoice { mode: Mode::Space },
            ModeChoice { mode: Mode::Post },
        ]
    }
}

impl ListEntry for ModeChoice {
    fn title(&self) -> &str {
        match self.mode {
            Mode::Space => "Watch a space (print new posts as they arrive)",
            Mode::Post => "Print a single post (by ID)",
        }
    }
}

/// A row of the printer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterChoice {
    SaveOnly,
    Printer(String),
    Cancel,
}

impl PrinterChoice {
    /// Save-only first, discovered printers, cancel last.
    pub fn list(printers: &[String]) -> Vec<PrinterChoice> {
        let mut choices = Vec::with_capacity(printers.len() + 2);
        choices.push(PrinterChoice::SaveOnly);
        choices.extend(printers.iter().cloned().map(PrinterChoice::Printer));
        choices.push(PrinterChoice::Cancel);
        choices
    }

    pub fn printer_name(&self) -> Option<&str> {
        match self {
            PrinterChoice::Printer(name) => Some(name),
            _ => None,
        }
    }
}

impl ListEntry for PrinterChoice {
    fn title(&self) -> &str {
        match self {
            PrinterChoice::SaveOnly => "Save to Downloads only",
            PrinterChoice::Printer(name) => name,
            PrinterChoice::Cancel => "Cancel",
        }
    }

    fn description(&self) -> &str {
        match self {
            PrinterChoice::SaveOnly => "Do not send to a printer; save PDF in Downloads",
            PrinterChoice::Printer(_) => "Send PDF to this printer",
            PrinterChoice::Cancel => "Quit without printing anything",
        }
    }
}
