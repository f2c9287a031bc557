use std::time::Duration;

use super::animation::{AnimationDriver, AnimationStatus, DropStart, FrameDriver, RaiseDropAnimator};
use super::geometry::{resolve_hover_index, DeltaBounds, DragGeometry};
use super::host::DragHost;
use super::index_map::display_to_item;
use super::options::{DragStartPolicy, ReorderOptions};

/// The state a [`DragSession`] is in. Exactly one holds at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    #[default]
    Idle,

    /// A handle was pressed; the gesture is not a drag yet.
    Pending,

    /// The floating item follows the pointer.
    Dragging,

    /// Released; the floating item animates into its slot.
    Dropping,
}

/// A finished drag that moved an item from slot `from` to slot `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReorderCommit {
    pub from: usize,
    pub to: usize,
}

#[derive(Clone, Copy, Debug)]
struct Press {
    index: usize,
    geometry: DragGeometry,

    /// Leading edge of the floating item before any delta, in viewport space.
    anchor_leading: f32,

    /// Main-axis travel seen while pending.
    travel: f32,
}

/// Drag-to-reorder state machine for one list: `Idle → Pending → Dragging → Dropping → Idle`.
///
/// Pointer input and animation ticks both end up in one delta-accumulation path,
/// so clamping and hover resolution behave the same for real and animated motion.
/// Events that arrive in a phase that does not expect them are ignored.
#[derive(Debug)]
pub struct DragSession<D> {
    driver: D,
    animator: RaiseDropAnimator,
    policy: DragStartPolicy,
    pending_move_slop: f32,
    max_elevation: f32,

    phase: DragPhase,
    press: Option<Press>,
    drag_index: Option<usize>,
    hover_index: Option<usize>,
    total_delta: f32,
    bounded_delta: f32,
    pointer_local_start: f32,
    item_local_start: f32,
    clip_amount: f32,
    bounds: DeltaBounds,
}

impl<D: AnimationDriver> DragSession<D> {
    pub fn new(driver: D, options: &ReorderOptions) -> Self {
        Self {
            driver,
            animator: RaiseDropAnimator::default(),
            policy: options.drag_start,
            pending_move_slop: options.pending_move_slop,
            max_elevation: options.max_elevation,
            phase: DragPhase::Idle,
            press: None,
            drag_index: None,
            hover_index: None,
            total_delta: 0.0,
            bounded_delta: 0.0,
            pointer_local_start: 0.0,
            item_local_start: 0.0,
            clip_amount: 0.0,
            bounds: DeltaBounds::default(),
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn has_pending_drag(&self) -> bool {
        self.phase == DragPhase::Pending
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    pub fn is_dropping(&self) -> bool {
        self.phase == DragPhase::Dropping
    }

    /// Dragging or dropping: a floating item is shown.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging | DragPhase::Dropping)
    }

    pub fn drag_index(&self) -> Option<usize> {
        self.drag_index
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    /// The item whose handle is pressed (pending or dragging).
    pub fn pressed_index(&self) -> Option<usize> {
        self.press.map(|p| p.index)
    }

    pub fn total_delta(&self) -> f32 {
        self.total_delta
    }

    pub fn bounded_delta(&self) -> f32 {
        self.bounded_delta
    }

    pub fn bounds(&self) -> DeltaBounds {
        self.bounds
    }

    pub fn pointer_local_start(&self) -> f32 {
        self.pointer_local_start
    }

    pub fn item_local_start(&self) -> f32 {
        self.item_local_start
    }

    pub fn last_applied_anim_delta(&self) -> f32 {
        self.animator.last_applied()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Leading edge of the floating item in viewport space, including the edge-clamp translation.
    pub fn floating_leading(&self) -> Option<f32> {
        if !self.is_active() {
            return None;
        }
        let press = self.press?;
        let leading = press.anchor_leading + self.bounded_delta;
        Some(
            leading
                + self.animator.edge_translation(
                    &self.driver,
                    leading,
                    press.geometry.item_extent,
                    press.geometry.viewport_extent,
                ),
        )
    }

    /// Current lift of the floating item, `0` when resting.
    pub fn elevation(&self) -> f32 {
        if self.is_active() {
            self.animator.elevation(&self.driver)
        } else {
            0.0
        }
    }

    /// The item shown on display `row` while a drag is in progress.
    pub fn display_to_item(&self, row: usize) -> usize {
        match (self.drag_index, self.hover_index) {
            (Some(drag), Some(hover)) => display_to_item(row, drag, hover),
            _ => row,
        }
    }

    /// `Idle → Pending` on a press inside the handle of item `index`.
    ///
    /// With [`DragStartPolicy::Immediate`] the drag starts right away.
    /// Returns `false` if the press was ignored (not idle, or no such item).
    pub fn press_handle(
        &mut self,
        host: &mut dyn DragHost,
        index: usize,
        geometry: DragGeometry,
    ) -> bool {
        if self.phase != DragPhase::Idle {
            log::trace!("ignoring handle press on {index}: session is {:?}", self.phase);
            return false;
        }
        if index >= geometry.item_count {
            log::trace!(
                "ignoring handle press on {index}: list has {} items",
                geometry.item_count
            );
            return false;
        }

        let anchor_leading = geometry.clipped_slot_leading(index);
        self.pointer_local_start = geometry.pointer_local;
        self.item_local_start = geometry.pointer_local - anchor_leading;
        self.clip_amount = geometry.clip_amount(index);
        // An item that does not fit the viewport cannot travel; it rests at its exact slot.
        self.bounds = if geometry.viewport_extent < geometry.item_extent {
            DeltaBounds::pinned(self.clip_amount)
        } else {
            DeltaBounds::new(
                self.pointer_local_start,
                self.item_local_start,
                geometry.item_extent,
                geometry.viewport_extent,
            )
        };
        self.press = Some(Press {
            index,
            geometry,
            anchor_leading,
            travel: 0.0,
        });
        self.phase = DragPhase::Pending;
        log::debug!("reorder: pending on item {index}");

        if self.policy == DragStartPolicy::Immediate {
            self.start_drag(host);
        }
        true
    }

    /// Pointer moved by `delta` along the scroll axis, `held_for` after the press.
    pub fn pointer_moved(&mut self, host: &mut dyn DragHost, delta: f32, held_for: Duration) {
        match self.phase {
            DragPhase::Pending => {
                let travel = match self.press.as_mut() {
                    Some(press) => {
                        press.travel += delta;
                        press.travel
                    }
                    None => return,
                };
                match self.policy {
                    DragStartPolicy::Immediate | DragStartPolicy::FirstMove => {
                        self.start_drag(host);
                    }
                    DragStartPolicy::Delayed(delay) => {
                        if held_for >= delay {
                            self.start_drag(host);
                        } else if travel.abs() > self.pending_move_slop {
                            log::debug!("reorder: press moved before the drag delay, cancelled");
                            self.reset();
                        }
                    }
                }
            }
            DragPhase::Dragging => {
                self.apply_delta(delta);
                host.request_repaint();
            }
            DragPhase::Idle | DragPhase::Dropping => {
                log::trace!("ignoring pointer move while {:?}", self.phase);
            }
        }
    }

    /// Start a delay-gated drag once the handle has been held long enough without moving.
    pub fn poll_pending(&mut self, host: &mut dyn DragHost, held_for: Duration) {
        if self.phase != DragPhase::Pending {
            return;
        }
        if let DragStartPolicy::Delayed(delay) = self.policy {
            if held_for >= delay {
                self.start_drag(host);
            }
        }
    }

    /// `Dragging → Dropping` on pointer release. A pending press is simply cancelled.
    ///
    /// Returns the commit if the drop settled immediately.
    pub fn release(&mut self, host: &mut dyn DragHost) -> Option<ReorderCommit> {
        match self.phase {
            DragPhase::Pending => {
                log::debug!("reorder: press released before the drag started");
                self.reset();
                None
            }
            DragPhase::Dragging => {
                let (Some(drag), Some(hover), Some(press)) =
                    (self.drag_index, self.hover_index, self.press)
                else {
                    return self.settle(host);
                };

                self.total_delta = self.bounded_delta;
                let target = self.clip_amount + (hover as f32 - drag as f32) * press.geometry.item_extent;
                let remaining = target - self.bounded_delta;
                self.phase = DragPhase::Dropping;
                log::debug!("reorder: dropping item {drag} into slot {hover}");

                match self.animator.begin_drop(&mut self.driver, remaining) {
                    DropStart::Animated => {
                        host.request_repaint();
                        None
                    }
                    DropStart::Immediate(delta) => {
                        self.apply_delta(delta);
                        self.settle(host)
                    }
                }
            }
            DragPhase::Idle | DragPhase::Dropping => {
                log::trace!("ignoring release while {:?}", self.phase);
                None
            }
        }
    }

    /// The driver reported new progress.
    ///
    /// Returns the commit if this tick settled the drop.
    pub fn on_animation_tick(&mut self, host: &mut dyn DragHost) -> Option<ReorderCommit> {
        if !self.is_active() {
            log::trace!("ignoring animation tick while {:?}", self.phase);
            return None;
        }

        let increment = self.animator.take_increment(&self.driver);
        if increment != 0.0 {
            self.apply_delta(increment);
        }
        host.request_repaint();

        self.on_animation_status(host, self.driver.status())
    }

    /// The driver reported a status change.
    pub fn on_animation_status(
        &mut self,
        host: &mut dyn DragHost,
        status: AnimationStatus,
    ) -> Option<ReorderCommit> {
        match status {
            AnimationStatus::Completed => {
                self.animator.reset_increments();
                None
            }
            AnimationStatus::Dismissed
                if self.phase == DragPhase::Dropping && !self.driver.is_animating() =>
            {
                self.settle(host)
            }
            AnimationStatus::Dismissed | AnimationStatus::Forward | AnimationStatus::Reverse => None,
        }
    }

    /// Accumulate a raw delta (pointer or animation) and update everything derived from it.
    fn apply_delta(&mut self, raw: f32) {
        let (Some(drag), Some(press)) = (self.drag_index, self.press) else {
            return;
        };
        if raw.is_finite() {
            self.total_delta += raw;
        }
        self.bounded_delta = self.bounds.clamp(self.total_delta);
        self.hover_index = Some(resolve_hover_index(
            drag,
            self.bounded_delta - self.clip_amount,
            press.geometry.item_extent,
            press.geometry.item_count,
        ));
    }

    fn start_drag(&mut self, host: &mut dyn DragHost) {
        let Some(press) = self.press else {
            return;
        };

        self.phase = DragPhase::Dragging;
        self.drag_index = Some(press.index);
        self.hover_index = Some(press.index);
        self.total_delta = 0.0;
        self.bounded_delta = self.bounds.clamp(0.0);
        log::debug!("reorder: dragging item {}", press.index);

        host.insert_overlay(press.index);
        host.set_scroll_enabled(false);
        self.animator
            .begin_raise(&mut self.driver, self.clip_amount, self.max_elevation);

        if press.travel != 0.0 {
            self.apply_delta(press.travel);
        }
        host.request_repaint();
    }

    fn settle(&mut self, host: &mut dyn DragHost) -> Option<ReorderCommit> {
        host.remove_overlay();
        host.set_scroll_enabled(true);
        host.request_repaint();

        let commit = match (self.drag_index, self.hover_index) {
            (Some(from), Some(to)) if from != to => Some(ReorderCommit { from, to }),
            _ => None,
        };
        match commit {
            Some(c) => log::debug!("reorder: settled, moved {} -> {}", c.from, c.to),
            None => log::debug!("reorder: settled without a move"),
        }

        self.reset();
        commit
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.press = None;
        self.drag_index = None;
        self.hover_index = None;
        self.total_delta = 0.0;
        self.bounded_delta = 0.0;
        self.pointer_local_start = 0.0;
        self.item_local_start = 0.0;
        self.clip_amount = 0.0;
        self.bounds = DeltaBounds::default();
        self.animator = RaiseDropAnimator::default();
    }
}

impl<D: FrameDriver> DragSession<D> {
    /// Advance the driver by `dt` seconds and process the resulting tick.
    pub fn advance(&mut self, host: &mut dyn DragHost, dt: f32) -> Option<ReorderCommit> {
        if !self.driver.is_animating() {
            return None;
        }
        self.driver.advance(dt);
        self.on_animation_tick(host)
    }
}
