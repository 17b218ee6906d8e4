//! Toast Notifications
//!
//! Notifications slide in from the right edge on a damped spring, stay for
//! a configurable duration, then disappear. The manager renders the whole
//! stack as one text block plus an absolute position, which the host drops
//! into a [`Canvas`](crate::compositor::Canvas) as an ordinary layer.
//!
//! # Lifecycle
//!
//! ```text
//! SlideIn ──spring settles──▶ Visible ──duration elapsed──▶ Done ──▶ removed
//!                                 │                           ▲
//!                                 └──(exit animation)──▶ SlideOut
//! ```
//!
//! # Threading
//!
//! All methods take `&self`; the stack lives behind a mutex so a background
//! task can `push` while the UI loop calls `update` and `render`. Share it
//! with `Arc<NotificationManager>`.

mod clock;
mod render;
mod spring;

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub use clock::{Clock, ManualClock, SystemClock};
pub use render::word_wrap;
pub use spring::{fps, Spring};

use crate::config::ToastConfig;
use crate::theme::ToastTheme;

/// Extra cells beyond the box width a toast starts (and exits) off-screen
const OFFSCREEN_MARGIN: usize = 10;

/// Rest threshold for both position and velocity
const SETTLE_EPSILON: f64 = 0.5;

/// Row the stack is anchored to, just below a three-row header
const ANCHOR_ROW: i32 = 4;

/// Visual style of a notification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Phase of a notification's lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    /// Springing in from the right
    SlideIn,
    /// At rest, counting down its display duration
    Visible,
    /// Springing back out (only with exit animation enabled)
    SlideOut,
    /// Finished; removed on the next update
    Done,
}

/// A single toast and its animation state
#[derive(Clone, Debug)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub state: AnimationState,
    pub created_at: Instant,
    visible_since: Option<Instant>,
    display_duration: Duration,
    /// Horizontal offset from the resting position (positive = right)
    position: f64,
    velocity: f64,
    spring: Spring,
    /// Ticks spent in the current slide
    slide_ticks: u32,
    width: usize,
}

impl Notification {
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn visible_since(&self) -> Option<Instant> {
        self.visible_since
    }

    pub fn display_duration(&self) -> Duration {
        self.display_duration
    }

    /// Content width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Where a toast sits when fully off-screen
    fn offscreen(&self) -> f64 {
        (self.width + OFFSCREEN_MARGIN) as f64
    }

    /// Step the spring toward `target`; true once at rest there
    fn step(&mut self, target: f64, limit: u32) -> bool {
        (self.position, self.velocity) = self.spring.update(self.position, self.velocity, target);
        self.slide_ticks += 1;

        let settled = (self.position - target).abs() < SETTLE_EPSILON
            && self.velocity.abs() < SETTLE_EPSILON;
        if settled || self.slide_ticks >= limit {
            self.position = target;
            self.velocity = 0.0;
            self.slide_ticks = 0;
            return true;
        }
        false
    }
}

/// Mutable state guarded by the manager's lock
#[derive(Debug)]
struct Stack {
    notifications: Vec<Notification>,
    config: ToastConfig,
    screen_width: usize,
    screen_height: usize,
    id_counter: u64,
}

impl Stack {
    /// Non-finished toasts that fit in the stack, oldest first
    fn shown(&self) -> impl Iterator<Item = &Notification> {
        self.notifications
            .iter()
            .filter(|n| n.state != AnimationState::Done)
            .take(self.config.max_visible)
    }
}

/// Owns the notification stack and drives its animation
#[derive(Debug)]
pub struct NotificationManager {
    stack: Mutex<Stack>,
    clock: Arc<dyn Clock>,
}

impl NotificationManager {
    /// Create a manager with default configuration
    pub fn new(screen_width: usize, screen_height: usize) -> Self {
        Self::with_config(ToastConfig::default(), screen_width, screen_height)
    }

    pub fn with_config(config: ToastConfig, screen_width: usize, screen_height: usize) -> Self {
        Self {
            stack: Mutex::new(Stack {
                notifications: Vec::new(),
                config,
                screen_width,
                screen_height,
                id_counter: 0,
            }),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn config(&self) -> ToastConfig {
        self.stack.lock().config.clone()
    }

    pub fn set_max_visible(&self, max_visible: usize) {
        self.stack.lock().config.max_visible = max_visible;
    }

    /// Content width for toasts pushed from now on
    pub fn set_default_width(&self, width: usize) {
        self.stack.lock().config.default_width = width;
    }

    /// Display duration for toasts pushed from now on
    pub fn set_default_duration(&self, duration: Duration) {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.stack.lock().config.default_duration_ms = millis;
    }

    /// Spring constants for toasts pushed from now on
    pub fn set_spring_config(&self, frequency: f64, damping: f64) {
        let mut stack = self.stack.lock();
        stack.config.spring_frequency = frequency;
        stack.config.spring_damping = damping;
    }

    pub fn set_exit_animation(&self, enabled: bool) {
        self.stack.lock().config.exit_animation = enabled;
    }

    /// Must be called on terminal resize so the stack stays anchored
    pub fn update_screen_size(&self, width: usize, height: usize) {
        let mut stack = self.stack.lock();
        stack.screen_width = width;
        stack.screen_height = height;
    }

    pub fn screen_size(&self) -> (usize, usize) {
        let stack = self.stack.lock();
        (stack.screen_width, stack.screen_height)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Queue a notification and return its id
    pub fn push(
        &self,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> String {
        let now = self.clock.now();
        let mut stack = self.stack.lock();

        stack.id_counter += 1;
        let id = format!("toast-{:06}", stack.id_counter);

        let config = &stack.config;
        let spring = Spring::new(
            fps(config.tick_rate),
            config.spring_frequency,
            config.spring_damping,
        );
        let width = config.default_width;

        let notification = Notification {
            id: id.clone(),
            title: title.into(),
            message: message.into(),
            kind,
            state: AnimationState::SlideIn,
            created_at: now,
            visible_since: None,
            display_duration: config.default_duration(),
            position: (width + OFFSCREEN_MARGIN) as f64,
            velocity: 0.0,
            spring,
            slide_ticks: 0,
            width,
        };

        tracing::debug!(id = %id, ?kind, "notification pushed");
        stack.notifications.push(notification);
        id
    }

    pub fn push_info(&self, title: impl Into<String>, message: impl Into<String>) -> String {
        self.push(title, message, NotificationKind::Info)
    }

    pub fn push_success(&self, title: impl Into<String>, message: impl Into<String>) -> String {
        self.push(title, message, NotificationKind::Success)
    }

    pub fn push_warning(&self, title: impl Into<String>, message: impl Into<String>) -> String {
        self.push(title, message, NotificationKind::Warning)
    }

    pub fn push_error(&self, title: impl Into<String>, message: impl Into<String>) -> String {
        self.push(title, message, NotificationKind::Error)
    }

    /// Remove a notification immediately (no exit animation)
    pub fn dismiss(&self, id: &str) {
        let mut stack = self.stack.lock();
        for n in stack
            .notifications
            .iter_mut()
            .filter(|n| n.id == id && n.state != AnimationState::Done)
        {
            n.state = AnimationState::Done;
            tracing::debug!(id = %n.id, "notification dismissed");
        }
    }

    /// Remove every notification immediately (no exit animation)
    pub fn dismiss_all(&self) {
        let mut stack = self.stack.lock();
        for n in stack
            .notifications
            .iter_mut()
            .filter(|n| n.state != AnimationState::Done)
        {
            n.state = AnimationState::Done;
        }
        tracing::debug!("all notifications dismissed");
    }

    /// Advance every notification by one tick
    ///
    /// Call at the configured tick rate. Finished notifications are removed
    /// in the same call. Returns `true` while anything is still animating or
    /// waiting out its display duration.
    pub fn update(&self) -> bool {
        let now = self.clock.now();
        let mut stack = self.stack.lock();
        let exit_animation = stack.config.exit_animation;
        let limit = stack.config.settle_limit_ticks();

        let mut active = false;
        let mut finished = Vec::new();

        for (idx, n) in stack.notifications.iter_mut().enumerate() {
            match n.state {
                AnimationState::SlideIn => {
                    if n.step(0.0, limit) {
                        n.state = AnimationState::Visible;
                        n.visible_since = Some(now);
                        tracing::debug!(id = %n.id, "notification visible");
                    }
                    active = true;
                }
                AnimationState::Visible => {
                    let since = n.visible_since.unwrap_or(n.created_at);
                    if now.saturating_duration_since(since) >= n.display_duration {
                        if exit_animation {
                            n.state = AnimationState::SlideOut;
                        } else {
                            n.state = AnimationState::Done;
                            finished.push(idx);
                        }
                    }
                    active = true;
                }
                AnimationState::SlideOut => {
                    let target = n.offscreen();
                    if !exit_animation || n.step(target, limit) {
                        n.state = AnimationState::Done;
                        finished.push(idx);
                    } else {
                        active = true;
                    }
                }
                AnimationState::Done => finished.push(idx),
            }
        }

        // Reverse order keeps the remaining indices valid
        for idx in finished.into_iter().rev() {
            let removed = stack.notifications.remove(idx);
            tracing::debug!(id = %removed.id, "notification removed");
        }

        active
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Notifications in the list, including ones awaiting removal
    pub fn count(&self) -> usize {
        self.stack.lock().notifications.len()
    }

    pub fn has_active_notifications(&self) -> bool {
        !self.stack.lock().notifications.is_empty()
    }

    /// Copy of the current stack, oldest first
    pub fn snapshot(&self) -> Vec<Notification> {
        self.stack.lock().notifications.clone()
    }

    /// Rendered toast width: content plus border and padding
    pub fn notification_width(&self) -> usize {
        self.stack.lock().config.default_width + render::CHROME_WIDTH
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the stack with the default theme
    pub fn render(&self) -> String {
        self.render_with_theme(&ToastTheme::default())
    }

    /// Render up to `max_visible` toasts, stacked and right-aligned
    pub fn render_with_theme(&self, theme: &ToastTheme) -> String {
        let stack = self.stack.lock();
        Self::render_stack(&stack, theme)
    }

    /// Rendered stack plus its top-left screen position
    pub fn render_with_position(&self) -> (String, i32, i32) {
        self.render_with_position_themed(&ToastTheme::default())
    }

    /// Like [`render_with_position`](Self::render_with_position) with an explicit theme
    ///
    /// The stack hugs the right edge with a one-cell margin, shifted right by
    /// the first toast's slide offset. Returns `("", 0, 0)` when empty.
    pub fn render_with_position_themed(&self, theme: &ToastTheme) -> (String, i32, i32) {
        let stack = self.stack.lock();
        let content = Self::render_stack(&stack, theme);
        let Some(first) = stack.shown().next() else {
            return (String::new(), 0, 0);
        };

        let width = stack.config.default_width + render::CHROME_WIDTH;
        // Truncates toward zero, matching the cell grid
        let offset = first.position as i64;
        let x = stack.screen_width as i64 - width as i64 - 1 + offset;
        let x = i32::try_from(x).unwrap_or(if x < 0 { i32::MIN } else { i32::MAX });

        (content, x, ANCHOR_ROW)
    }

    fn render_stack(stack: &Stack, theme: &ToastTheme) -> String {
        let boxes: Vec<String> = stack
            .shown()
            .map(|n| render::render_box(n, theme))
            .collect();
        if boxes.is_empty() {
            return String::new();
        }

        tracing::trace!(count = boxes.len(), "rendering notification stack");
        render::stack_right(&boxes)
    }
}
