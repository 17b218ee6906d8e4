//! Arlo TUI - Layered terminal surface for arlo
//!
//! This crate provides the two pieces of the arlo terminal UI that do real
//! rendering work: a compositor that stacks pre-styled text layers into one
//! frame, and a toast notification stack that slides in on a spring.
//!
//! # Architecture
//!
//! - **Compositor**: z-ordered, clipped layering of ANSI-styled text blocks
//! - **Notifications**: toast lifecycle, spring animation and box rendering
//! - **Theme**: toast palette passed explicitly to render calls
//! - **Config**: defaults, TOML and environment overrides
//! - **App**: demo host loop wiring both together
//!
//! # Frame Flow
//!
//! ```text
//! push_*() ──▶ NotificationManager ──update() per tick──▶ render_with_position()
//!                                                              │
//!                                         Layer (z = 100) ◀────┘
//!                                              │
//! app content ──▶ Layer (z = 0) ──▶ Canvas::render() ──▶ terminal
//! ```

pub mod app;
pub mod compositor;
pub mod config;
pub mod notifications;
pub mod theme;

pub use app::App;
pub use compositor::{Canvas, Compose, Layer};
pub use config::{ConfigError, ToastConfig};
pub use notifications::{AnimationState, NotificationKind, NotificationManager};
