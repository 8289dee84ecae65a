use std::future::Future;
use std::sync::{Arc, OnceLock};

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, PostprintError, Result};
use crate::config::KeybindingConfig;
use crate::domain::Post;
use crate::render::{Launcher, Renderer};
use crate::tui::event::Action;
use crate::wizard::bus::DebugBus;
use crate::wizard::msg::JobOutcome;
use crate::wizard::state::WizardState;
use crate::wizard::{update, Effect, Msg};

type RendererSlot = Arc<OnceLock<Arc<dyn Renderer>>>;

/// Runs effects as background tasks. Each task reports back with exactly one
/// message, unless the shared cancellation token fires first.
pub struct Runtime {
    ctx: Arc<AppContext>,
    tx: UnboundedSender<Msg>,
    cancel: CancellationToken,
    bus: DebugBus,
    renderer: RendererSlot,
}

impl Runtime {
    pub fn new(
        ctx: Arc<AppContext>,
        tx: UnboundedSender<Msg>,
        cancel: CancellationToken,
        bus: DebugBus,
    ) -> Self {
        Self {
            ctx,
            tx,
            cancel,
            bus,
            renderer: Arc::new(OnceLock::new()),
        }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn dispatch(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect) {
        tracing::debug!("dispatching {:?}", effect);
        let ctx = self.ctx.clone();
        let bus = self.bus.clone();

        match effect {
            Effect::Cancel => self.cancel.cancel(),
            Effect::LoadPrinters => self.spawn(async move {
                match ctx.spooler.list_printers().await {
                    Ok(printers) => {
                        bus.publish(format!("found {} printer(s)", printers.len()));
                        Msg::PrintersLoaded(printers)
                    }
                    Err(e) => {
                        tracing::warn!("printer discovery failed: {}", e);
                        bus.publish(format!("printer discovery failed: {}", e));
                        Msg::PrintersLoaded(Vec::new())
                    }
                }
            }),
            Effect::LaunchRenderer => {
                let slot = self.renderer.clone();
                self.spawn(async move {
                    let result = launch_renderer(ctx.launcher.as_ref(), &slot, &bus).await;
                    Msg::RendererLaunched(result.map_err(|e| e.to_string()))
                })
            }
            Effect::RenderPost { base, post_id } => {
                let slot = self.renderer.clone();
                self.spawn(async move {
                    let result = match shared_renderer(&slot) {
                        Ok(renderer) => renderer.render(&base, &post_id).await,
                        Err(e) => Err(e),
                    };
                    Msg::Rendered(result.map_err(|e| e.to_string()))
                })
            }
            Effect::PrintDocument { printer, document } => self.spawn(async move {
                let result = ctx.spooler.submit(&printer, &document).await;
                Msg::Printed {
                    printer,
                    result: result.map_err(|e| e.to_string()),
                }
            }),
            Effect::SyncSpace { base, space_id } => self.spawn(async move {
                bus.publish(format!("initial sync of {}", space_id));
                let result = ctx.fetcher.fetch_posts(&base, &space_id).await;
                Msg::SpaceSynced(result.map_err(|e| e.to_string()))
            }),
            Effect::SchedulePoll => self.spawn(async move {
                tokio::time::sleep(ctx.poll_interval).await;
                Msg::PollTick
            }),
            Effect::FetchPosts { base, space_id } => self.spawn(async move {
                let result = ctx.fetcher.fetch_posts(&base, &space_id).await;
                Msg::Polled(result.map_err(|e| e.to_string()))
            }),
            Effect::ProcessPost {
                base,
                post,
                printer,
            } => {
                let slot = self.renderer.clone();
                self.spawn(async move {
                    let outcome = process_post(&ctx, &slot, &bus, &base, &post, printer).await;
                    Msg::Processed { post, outcome }
                })
            }
        }
    }

    fn spawn<F>(&self, work: F)
    where
        F: Future<Output = Msg> + Send + 'static,
    {
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                msg = work => {
                    // The loop may already be gone on shutdown.
                    let _ = tx.send(msg);
                }
            }
        });
    }
}

async fn launch_renderer(launcher: &dyn Launcher, slot: &RendererSlot, bus: &DebugBus) -> Result<()> {
    bus.publish("locating browser");
    let executable = tokio::time::timeout(launcher.install_timeout(), launcher.install())
        .await
        .map_err(|_| {
            PostprintError::Timeout(format!(
                "browser install after {:?}",
                launcher.install_timeout()
            ))
        })??;

    bus.publish(format!("launching {}", executable.display()));
    let renderer = tokio::time::timeout(launcher.launch_timeout(), launcher.launch(&executable))
        .await
        .map_err(|_| {
            PostprintError::Timeout(format!(
                "browser launch after {:?}",
                launcher.launch_timeout()
            ))
        })??;

    if slot.set(renderer).is_err() {
        tracing::warn!("browser already running, keeping the first one");
    }
    bus.publish("browser launched");
    Ok(())
}

fn shared_renderer(slot: &RendererSlot) -> Result<Arc<dyn Renderer>> {
    slot.get()
        .cloned()
        .ok_or_else(|| PostprintError::Render("browser not started".into()))
}

async fn process_post(
    ctx: &AppContext,
    slot: &RendererSlot,
    bus: &DebugBus,
    base: &str,
    post: &Post,
    printer: Option<String>,
) -> JobOutcome {
    bus.publish(format!("rendering {}", post.id));
    let rendered = match shared_renderer(slot) {
        Ok(renderer) => renderer.render(base, &post.id).await,
        Err(e) => Err(e),
    };
    let document = match rendered {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("render {} failed: {}", post.id, e);
            return JobOutcome::RenderFailed {
                error: e.to_string(),
            };
        }
    };

    let Some(printer) = printer else {
        return JobOutcome::Saved { document };
    };

    bus.publish(format!("printing {} on {}", post.id, printer));
    match ctx.spooler.submit(&printer, &document).await {
        Ok(()) => JobOutcome::Printed { document, printer },
        Err(e) => {
            tracing::warn!("print {} failed: {}", post.id, e);
            JobOutcome::PrintFailed {
                document,
                printer,
                error: e.to_string(),
            }
        }
    }
}

/// Owns the wizard state and feeds every message through [`update`].
pub struct Controller {
    state: WizardState,
    runtime: Runtime,
    keybindings: KeybindingConfig,
}

impl Controller {
    pub fn new(state: WizardState, runtime: Runtime, keybindings: KeybindingConfig) -> Self {
        Self {
            state,
            runtime,
            keybindings,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn handle(&mut self, msg: Msg) {
        let msg = match msg {
            Msg::Key(key) => {
                let text_entry = self.state.step().accepts_text();
                match self.keybindings.get_action(&key, text_entry) {
                    Action::None => return,
                    action => Msg::Input(action),
                }
            }
            other => other,
        };

        let effects = update(&mut self.state, msg);
        self.runtime.dispatch(effects);
    }
}
