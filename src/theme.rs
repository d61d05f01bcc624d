//! Theme module for pm-assistant
//!
//! Centralized color palette. The render surface uses the
//! same palette on screen and in the PDF capture.

use ratatui::style::Color;

// ============================================================================
// Background Colors
// ============================================================================

/// Application background - deep slate (#0b1020)
pub const BG_PRIMARY: Color = Color::Rgb(11, 16, 32);

/// Card background (#121a2e)
pub const BG_CARD: Color = Color::Rgb(18, 26, 46);

/// Focused input background (#1b2540)
pub const BG_FOCUS: Color = Color::Rgb(27, 37, 64);

/// Subtle border color (#2a3553)
pub const BORDER_SUBTLE: Color = Color::Rgb(42, 53, 83);

// ============================================================================
// Accent Colors
// ============================================================================

/// Primary violet accent, headings and focus (#8b5cf6)
pub const ACCENT_PRIMARY: Color = Color::Rgb(139, 92, 246);

/// Secondary cyan accent, subheadings (#22d3ee)
pub const ACCENT_SECONDARY: Color = Color::Rgb(34, 211, 238);

/// Gantt bar fill (#6366f1)
pub const GANTT_BAR: Color = Color::Rgb(99, 102, 241);

/// Label drawn inside Gantt bars (#f8fafc)
pub const GANTT_LABEL: Color = Color::Rgb(248, 250, 252);

// ============================================================================
// Status Colors
// ============================================================================

/// Success message color (#4ade80)
pub const GREEN_SUCCESS: Color = Color::Rgb(74, 222, 128);

/// Warning / busy color (#fbbf24)
pub const AMBER_WARNING: Color = Color::Rgb(251, 191, 36);

/// Error color (#f87171)
pub const RED_ERROR: Color = Color::Rgb(248, 113, 113);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color (#e2e8f0)
pub const TEXT_PRIMARY: Color = Color::Rgb(226, 232, 240);

/// Secondary text color (#94a3b8)
pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

/// Muted text, hints and placeholders (#64748b)
pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);
