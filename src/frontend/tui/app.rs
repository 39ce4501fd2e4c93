use crate::core::mode::PresentationMode;
use crate::core::AppCore;
use crate::data::ui_state::HitRegions;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
    Terminal,
};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::colors::{ACCENT, GOLD, MUTED, PARCHMENT};
use super::{explore, feed, grid, mobile};

/// How long the input reader blocks before checking the stop flag
const INPUT_POLL: Duration = Duration::from_millis(50);

/// TUI Frontend using ratatui
///
/// Input is read on a blocking task and forwarded over a channel, so the
/// main loop never blocks on the terminal.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    events: mpsc::UnboundedReceiver<FrontendEvent>,
    stop: Arc<AtomicBool>,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Enables raw mode and mouse capture, enters the alternate screen and
    /// starts the input reader. Must be called inside a tokio runtime.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        spawn_input_reader(tx, stop.clone());

        Ok(Self {
            terminal,
            events: rx,
            stop,
            restored: false,
        })
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        match event {
            Event::Key(key_event) => {
                // Presses only
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::key(key_event.code, key_event.modifiers))
            }
            Event::Mouse(mouse_event) => Some(FrontendEvent::mouse(
                mouse_event.kind,
                mouse_event.column,
                mouse_event.row,
                mouse_event.modifiers,
            )),
            Event::Resize(w, h) => Some(FrontendEvent::resize(w, h)),
            _ => None,
        }
    }
}

fn spawn_input_reader(tx: mpsc::UnboundedSender<FrontendEvent>, stop: Arc<AtomicBool>) {
    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if let Some(frontend_event) = TuiFrontend::convert_event(ev) {
                            if tx.send(frontend_event).is_err() {
                                break;
                            }
                        }
                    }
                    Err(e) => tracing::warn!("Failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::error!("Terminal event polling failed: {}", e);
                    let _ = tx.send(FrontendEvent::Quit);
                    break;
                }
            }
        }
        tracing::debug!("Input reader stopped");
    });
}

/// Mode tabs on the left, the toast or key hints on the right
pub fn render_status_line(core: &AppCore, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let mut spans = Vec::new();
    for mode in PresentationMode::ALL {
        let style = if mode == core.mode() {
            Style::default()
                .fg(PARCHMENT)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };
        spans.push(Span::styled(format!(" {} ", mode.title()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans).render(area, buf);

    let (text, style) = match core.ui.status_text() {
        Some(status) => (status.to_string(), Style::default().fg(GOLD)),
        None => (
            "Tab mode  y copy email  Ctrl+C quit".to_string(),
            Style::default().fg(MUTED),
        ),
    };
    let width = text.chars().count() as u16;
    let tabs_width = PresentationMode::ALL
        .iter()
        .map(|m| m.title().chars().count() as u16 + 3)
        .sum::<u16>();
    if tabs_width + width < area.width {
        buf.set_string(area.x + area.width - width, area.y, &text, style);
    }
}

/// Draw the active view plus the status line; returns the view's regions
pub fn render_frame(core: &AppCore, now: Instant, area: Rect, buf: &mut Buffer) -> HitRegions {
    let [body, status] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

    let regions = match core.mode() {
        PresentationMode::Feed => feed::render(core, now, body, buf),
        PresentationMode::Grid => grid::render(core, now, body, buf),
        PresentationMode::Explore => explore::render(core, now, body, buf),
        PresentationMode::Mobile => mobile::render(core, now, body, buf),
    };
    render_status_line(core, status, buf);
    regions
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => events.push(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    events.push(FrontendEvent::Quit);
                    break;
                }
            }
        }
        Ok(events)
    }

    fn render(&mut self, core: &mut AppCore) -> Result<()> {
        let now = Instant::now();
        let mut regions = HitRegions::default();
        {
            let core: &AppCore = core;
            self.terminal.draw(|f| {
                let area = f.area();
                regions = render_frame(core, now, area, f.buffer_mut());
            })?;
        }
        core.ui.regions = regions;
        core.needs_render = false;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.stop.store(true, Ordering::Relaxed);
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}
