//! Demo Application
//!
//! A small host loop that shows both halves of the crate working together:
//! - Event loop (keyboard, resize) over crossterm's async event stream
//! - Fixed-rate animation ticks driving `NotificationManager::update`
//! - A fresh `Canvas` per frame with the toast stack as the top layer
//!
//! # Keys
//!
//! `i`/`s`/`w`/`e` push one toast of each kind, `m` pushes three at once,
//! `p` starts a background task that reports progress through toasts, `d`
//! dismisses everything, `q`/`Esc`/`Ctrl-C` quit.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::{Print, Stylize};
use futures::StreamExt;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;

use crate::compositor::{center_layer, Canvas, Layer};
use crate::config::ToastConfig;
use crate::notifications::{fps, NotificationManager};
use crate::theme::{ToastTheme, DIM_GRAY, HEADER_MAGENTA};

/// Toasts always paint above application content
const NOTIFICATION_Z: i32 = 100;

/// Progress updates sent by the background task
const PROGRESS_STEPS: u32 = 4;

/// Gap between progress updates
const PROGRESS_INTERVAL: Duration = Duration::from_millis(750);

const KEY_HELP: &[(&str, &str)] = &[
    ("i", "info notification"),
    ("s", "success notification"),
    ("w", "warning notification"),
    ("e", "error notification"),
    ("m", "three at once"),
    ("p", "background progress task"),
    ("d", "dismiss all"),
    ("q", "quit"),
];

/// Demo application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Shared with background tasks that report through toasts
    notifications: Arc<NotificationManager>,
    theme: ToastTheme,
    tick_rate: u32,
    /// Terminal size (columns, rows)
    size: (u16, u16),
    /// Set while the progress task is alive
    progress_running: Arc<AtomicBool>,
    /// Runtime background tasks are spawned on, if the app was built inside one
    runtime: Option<Handle>,
}

impl App {
    pub fn new(config: ToastConfig, size: (u16, u16)) -> Self {
        let tick_rate = config.tick_rate;
        let notifications = NotificationManager::with_config(
            config,
            usize::from(size.0),
            usize::from(size.1),
        );

        Self {
            running: true,
            notifications: Arc::new(notifications),
            theme: ToastTheme::default(),
            tick_rate,
            size,
            progress_running: Arc::new(AtomicBool::new(false)),
            runtime: Handle::try_current().ok(),
        }
    }

    /// Handle to the notification stack
    pub fn notifications(&self) -> &Arc<NotificationManager> {
        &self.notifications
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main event loop
    pub async fn run<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        if self.runtime.is_none() {
            self.runtime = Some(Handle::current());
        }
        let mut event_stream = EventStream::new();

        let mut ticker = tokio::time::interval(Duration::from_secs_f64(fps(self.tick_rate)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.notifications.push_info(
            "Welcome!",
            "Press keys to trigger different notifications",
        );
        self.render(out)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(Event::Resize(w, h))) => self.handle_resize(w, h),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                    None => self.running = false,
                },

                // Animation tick
                _ = ticker.tick() => {
                    self.tick();
                }
            }

            self.render(out)?;
        }

        Ok(())
    }

    /// Advance animations by one tick
    pub fn tick(&self) -> bool {
        self.notifications.update()
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let n = Arc::clone(&self.notifications);
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('i') => {
                n.push_info("Info", "This is an informational message");
            }
            KeyCode::Char('s') => {
                n.push_success("Success!", "The operation completed successfully");
            }
            KeyCode::Char('w') => {
                n.push_warning("Warning", "Something might need your attention");
            }
            KeyCode::Char('e') => {
                n.push_error("Error", "Something went wrong! Please check the logs.");
            }
            KeyCode::Char('m') => {
                n.push_info("First", "This is the first notification");
                n.push_success("Second", "This is the second one");
                n.push_warning("Third", "And here's a third!");
            }
            KeyCode::Char('d') => n.dismiss_all(),
            KeyCode::Char('p') => self.start_progress(),
            _ => {}
        }
    }

    /// Handle terminal resize
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.notifications
            .update_screen_size(usize::from(width), usize::from(height));
        tracing::debug!(width, height, "terminal resized");
    }

    /// Spawn a task that reports progress from outside the UI loop
    ///
    /// Without a tokio runtime there is nothing to spawn on; a warning toast
    /// says so instead.
    fn start_progress(&self) {
        let Some(runtime) = &self.runtime else {
            tracing::warn!("progress task requested without a tokio runtime");
            self.notifications
                .push_warning("Unavailable", "Background tasks need an async runtime");
            return;
        };

        if self.progress_running.swap(true, Ordering::SeqCst) {
            self.notifications
                .push_warning("Busy", "A background task is already running");
            return;
        }

        let notifications = Arc::clone(&self.notifications);
        let running = Arc::clone(&self.progress_running);
        runtime.spawn(async move {
            let mut interval = tokio::time::interval(PROGRESS_INTERVAL);
            for step in 1..=PROGRESS_STEPS {
                interval.tick().await;
                let percent = step * 100 / PROGRESS_STEPS;
                notifications.push_info("Indexing", format!("{percent}% of the workspace scanned"));
            }
            notifications.push_success("Indexing complete", "Background task finished");
            running.store(false, Ordering::SeqCst);
        });
    }

    /// Composite the full frame
    pub fn frame(&self) -> String {
        let width = usize::from(self.size.0);
        let height = usize::from(self.size.1);

        let mut canvas = Canvas::new(width, height);
        canvas.add_layer(Layer::new(self.header(width), 0));
        canvas.add_layer(center_layer(self.help(), 1, width, height));
        canvas.add_layer(
            Layer::new(self.status(), 1).with_offset(1, i32::from(self.size.1) - 1),
        );

        let (toasts, x, y) = self.notifications.render_with_position_themed(&self.theme);
        if !toasts.is_empty() {
            canvas.add_layer(Layer::new(toasts, NOTIFICATION_Z).with_offset(x, y));
        }

        canvas.render()
    }

    /// Write the frame to the terminal
    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let frame = self.frame();
        for (row, line) in frame.split('\n').enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(out, MoveTo(0, row), Print(line))?;
        }
        out.flush()
    }

    /// Three-row header: title, rule, blank
    fn header(&self, width: usize) -> String {
        let title = " arlo · layers & notifications".with(HEADER_MAGENTA).bold();
        let rule = "─".repeat(width).with(DIM_GRAY);
        format!("{title}\n{rule}\n")
    }

    fn help(&self) -> String {
        KEY_HELP
            .iter()
            .map(|&(key, action)| format!("{}  {}", key.with(HEADER_MAGENTA).bold(), action))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn status(&self) -> String {
        let count = self.notifications.count();
        format!("{count} active").with(DIM_GRAY).to_string()
    }
}
