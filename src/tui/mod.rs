pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::wizard::{Controller, DebugBus, Msg, Runtime, WizardState};

use self::event::EventHandler;

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

/// How the wizard ended, for reporting after the terminal is restored.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: String,
    pub error: Option<String>,
}

/// Run the wizard until the user quits. `cancel` is shared with the caller
/// so an external interrupt stops background work too.
pub async fn run(
    ctx: Arc<AppContext>,
    config: &Config,
    tx: UnboundedSender<Msg>,
    rx: UnboundedReceiver<Msg>,
    cancel: CancellationToken,
) -> Result<Outcome> {
    let (bus, listener) = DebugBus::new(ctx.debug);
    if let Some(listener) = listener {
        listener.listen(tx.clone(), cancel.clone());
    }

    let state = WizardState::new(ctx.default_base.clone(), ctx.debug);
    let runtime = Runtime::new(ctx, tx.clone(), cancel, bus);
    let mut controller = Controller::new(state, runtime, config.keybindings.clone());

    let mut terminal = setup_terminal()?;
    EventHandler::new(TICK_RATE).spawn(tx);
    let result = run_app(&mut terminal, &mut controller, rx, config).await;
    restore_terminal(&mut terminal)?;
    result?;

    let state = controller.state();
    Ok(Outcome {
        status: state.status().to_string(),
        error: state.error().map(String::from),
    })
}

/// Channel every message source feeds into.
pub fn channel() -> (UnboundedSender<Msg>, UnboundedReceiver<Msg>) {
    mpsc::unbounded_channel()
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    controller: &mut Controller,
    mut rx: UnboundedReceiver<Msg>,
    config: &Config,
) -> Result<()> {
    loop {
        terminal.draw(|frame| layout::render(frame, controller.state(), &config.colors))?;

        let Some(msg) = rx.recv().await else {
            break;
        };
        controller.handle(msg);

        // Apply whatever else is already queued before redrawing.
        while !controller.state().should_quit() {
            match rx.try_recv() {
                Ok(msg) => controller.handle(msg),
                Err(_) => break,
            }
        }

        if controller.state().should_quit() {
            break;
        }
    }

    Ok(())
}
