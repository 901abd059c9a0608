// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay configuration.

use core::str::FromStr;

/// Error returned when parsing a [`ScrollAction`] keyword fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown scroll action keyword")]
pub struct ParseScrollActionError;

/// What an open overlay does when content outside it scrolls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollAction {
    /// Keep the document's scroll position pinned while open.
    Lock,
    /// Re-lay out the overlay on the next frame.
    Refit,
    /// Cancel the overlay.
    Cancel,
}

impl ScrollAction {
    /// Read a reflected attribute value.
    ///
    /// Unknown keywords mean "no scroll handling" rather than an error.
    pub fn from_attribute(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl FromStr for ScrollAction {
    type Err = ParseScrollActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lock" => Ok(Self::Lock),
            "refit" => Ok(Self::Refit),
            "cancel" => Ok(Self::Cancel),
            _ => Err(ParseScrollActionError),
        }
    }
}

/// Behavior switches for one overlay. Everything is off by default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayConfig {
    /// Show the shared backdrop under this overlay and trap focus inside it.
    pub with_backdrop: bool,
    /// Do not move focus into the overlay when it opens.
    pub no_auto_focus: bool,
    /// Escape does not cancel the overlay.
    pub no_cancel_on_esc_key: bool,
    /// Clicks outside the overlay do not cancel it.
    pub no_cancel_on_outside_click: bool,
    /// Return focus to the element that had it before opening.
    pub restore_focus_on_close: bool,
    /// Outside clicks also reach the overlays below this one.
    pub allow_click_through: bool,
    /// Stay above overlays opened later.
    pub always_on_top: bool,
    /// Reaction to outside scrolling; `None` ignores it.
    pub scroll_action: Option<ScrollAction>,
    /// Opening and closing end only when the host reports the animation done.
    pub animated: bool,
}

impl OverlayConfig {
    /// The subset of flags the manager keeps per registration.
    pub fn stacking(&self) -> Stacking {
        Stacking {
            always_on_top: self.always_on_top,
            with_backdrop: self.with_backdrop,
            allow_click_through: self.allow_click_through,
        }
    }
}

/// Flags the [`OverlayManager`](crate::OverlayManager) consults while routing
/// and stacking.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stacking {
    /// See [`OverlayConfig::always_on_top`].
    pub always_on_top: bool,
    /// See [`OverlayConfig::with_backdrop`].
    pub with_backdrop: bool,
    /// See [`OverlayConfig::allow_click_through`].
    pub allow_click_through: bool,
}

/// Why an overlay closed, reported with [`OverlayEvent::Closed`](crate::OverlayEvent::Closed).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ClosingReason {
    /// The overlay closed through a cancel that was not prevented.
    pub canceled: bool,
}
