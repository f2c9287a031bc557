use std::time::Duration;

use super::axis::ScrollAxis;

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// When a press on an item's handle turns into a drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DragStartPolicy {
    /// The drag starts as soon as the handle is pressed.
    #[default]
    Immediate,

    /// The drag starts with the first pointer movement after the press.
    FirstMove,

    /// The handle must be held for this long first (long-press).
    ///
    /// Moving further than [`ReorderOptions::pending_move_slop`] before that cancels the press,
    /// leaving the gesture to the scroll area.
    Delayed(Duration),
}

/// Options for [`super::ReorderableList`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReorderOptions {
    /// Extent of every item along the scroll axis, in points. Must be positive.
    pub item_extent: f32,

    /// Axis the list lays out and scrolls along.
    pub axis: ScrollAxis,

    /// Position of the drag handle across the item, from `-1.0` (leading edge)
    /// over `0.0` (centre) to `1.0` (trailing edge).
    pub handle_alignment: f32,

    /// Thickness of the drag handle strip across the item, in points.
    pub handle_thickness: f32,

    /// Duration of the raise (pick-up) and drop animations.
    pub animation_duration: Duration,

    pub drag_start: DragStartPolicy,

    /// Pointer travel (in points) that cancels a [`DragStartPolicy::Delayed`] press.
    pub pending_move_slop: f32,

    /// Shadow offset of the floating item once fully lifted, in points.
    pub max_elevation: f32,

    /// If true, a committed move is applied to the item `Vec` (remove at `from`, insert at `to`).
    ///
    /// Set to `false` when the host wants to reorder its own storage from the
    /// [`super::ReorderResponse`] or the reorder callback. Item ids move either way,
    /// so the host must apply the same move.
    pub apply_reorder: bool,

    /// If true, record state-machine transitions in a small ring buffer
    /// (see [`super::ReorderableList::debug_log_text`]).
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            item_extent: 32.0,
            axis: ScrollAxis::Vertical,
            handle_alignment: 1.0,
            handle_thickness: 24.0,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            drag_start: DragStartPolicy::Immediate,
            pending_move_slop: 6.0,
            max_elevation: 6.0,
            apply_reorder: true,
            debug_event_log: false,
            debug_event_log_capacity: 200,
        }
    }
}

impl ReorderOptions {
    /// Check the options, as [`super::ReorderableList::new`] does.
    ///
    /// # Errors
    /// If `handle_alignment` is outside `-1.0..=1.0`, or an extent is not a positive finite number.
    pub fn validate(&self) -> Result<(), ReorderOptionsError> {
        if !(-1.0..=1.0).contains(&self.handle_alignment) {
            return Err(ReorderOptionsError::InvalidHandleAlignment(
                self.handle_alignment,
            ));
        }
        if !(self.item_extent.is_finite() && self.item_extent > 0.0) {
            return Err(ReorderOptionsError::InvalidItemExtent(self.item_extent));
        }
        if !(self.handle_thickness.is_finite() && self.handle_thickness > 0.0) {
            return Err(ReorderOptionsError::InvalidHandleThickness(
                self.handle_thickness,
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReorderOptionsError {
    InvalidHandleAlignment(f32),
    InvalidItemExtent(f32),
    InvalidHandleThickness(f32),
}

impl std::fmt::Display for ReorderOptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHandleAlignment(value) => {
                write!(f, "handle alignment must be within -1..=1, got {value}")
            }
            Self::InvalidItemExtent(value) => {
                write!(f, "item extent must be a positive finite number, got {value}")
            }
            Self::InvalidHandleThickness(value) => {
                write!(
                    f,
                    "handle thickness must be a positive finite number, got {value}"
                )
            }
        }
    }
}

impl std::error::Error for ReorderOptionsError {}
