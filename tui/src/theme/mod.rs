//! Theme and Colors
//!
//! Toast palette, keyed by notification kind. Colors are 256-color ANSI
//! indices so the output looks the same on any xterm-compatible terminal.
//!
//! The theme is a plain value handed to the render call. Nothing here is
//! global: two managers can render with different themes side by side.

use crossterm::style::Color;

use crate::notifications::NotificationKind;

// ============================================================================
// Toast Palette
// ============================================================================

/// Info accent - blue
pub const INFO_BLUE: Color = Color::AnsiValue(39);

/// Success accent - green
pub const SUCCESS_GREEN: Color = Color::AnsiValue(42);

/// Warning accent - orange
pub const WARNING_ORANGE: Color = Color::AnsiValue(214);

/// Error accent - red
pub const ERROR_RED: Color = Color::AnsiValue(196);

/// Body text - light gray
pub const TOAST_TEXT: Color = Color::AnsiValue(252);

// ============================================================================
// Demo Chrome
// ============================================================================

/// Header accent
pub const HEADER_MAGENTA: Color = Color::Magenta;

/// System/dim text
pub const DIM_GRAY: Color = Color::AnsiValue(242);

/// Colors used to draw toast boxes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToastTheme {
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Message text color
    pub text: Color,
}

impl ToastTheme {
    /// Border and title color for a notification kind
    pub fn accent(&self, kind: NotificationKind) -> Color {
        match kind {
            NotificationKind::Info => self.info,
            NotificationKind::Success => self.success,
            NotificationKind::Warning => self.warning,
            NotificationKind::Error => self.error,
        }
    }
}

impl Default for ToastTheme {
    fn default() -> Self {
        Self {
            info: INFO_BLUE,
            success: SUCCESS_GREEN,
            warning: WARNING_ORANGE,
            error: ERROR_RED,
            text: TOAST_TEXT,
        }
    }
}
