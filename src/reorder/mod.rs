use std::collections::VecDeque;
use std::hash::Hash;
use std::time::Duration;

use egui::{
    Align, Color32, CursorIcon, Id, Layout, Order, Pos2, Rect, Sense, Stroke, StrokeKind, Ui,
    UiBuilder, Vec2,
};

mod animation;
mod axis;
mod debug;
mod geometry;
mod host;
mod identity;
mod index_map;
mod options;
mod session;

#[cfg(test)]
mod widget_tests;

pub use animation::{
    AnimationDriver, AnimationStatus, DropStart, FrameDriver, LinearAnimationDriver,
    RaiseDropAnimator, Tween,
};
pub use axis::ScrollAxis;
pub use geometry::{resolve_hover_index, DeltaBounds, DragGeometry};
pub use host::DragHost;
pub use identity::IdentityKeys;
pub use index_map::{apply_move, display_to_item, item_to_display};
pub use options::{DragStartPolicy, ReorderOptions, ReorderOptionsError, DEFAULT_ANIMATION_DURATION};
pub use session::{DragPhase, DragSession, ReorderCommit};

use host::FrameHost;

/// Passed to the item callback of [`ReorderableList::show`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemContext {
    /// Index of the item in the `Vec`.
    pub index: usize,

    /// Row the item is displayed on (differs from `index` while dragging).
    pub row: usize,

    /// Stable id of the item, unaffected by reordering.
    pub key: Id,

    /// True when painting the floating copy above the list.
    pub is_floating: bool,
}

/// What happened during one [`ReorderableList::show`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReorderResponse {
    /// A drag settled this frame and moved an item.
    pub moved: Option<ReorderCommit>,

    pub phase: DragPhase,

    /// Slot currently under the floating item.
    pub hover_index: Option<usize>,
}

/// Layout of the last shown pass, in screen space.
#[derive(Clone, Copy, Debug)]
struct ListFrame {
    /// Screen position of the content origin (row 0 leading edge).
    content_min: Pos2,

    /// Screen position of the visible region's leading corner.
    viewport_min: Pos2,

    viewport_extent: f32,
    scroll_offset: f32,
    cross_extent: f32,
    clip_rect: Rect,
}

type ReorderCallback = Box<dyn FnMut(usize, usize)>;

/// A scrollable list of fixed-extent items that can be reordered by dragging their handle.
///
/// Keep one value per list across frames (like any other piece of app state);
/// each instance owns its own drag session and animation driver.
///
/// ```no_run
/// # use egui_reorder::{ReorderableList, ReorderOptions};
/// # fn ui(ui: &mut egui::Ui, list: &mut ReorderableList, items: &mut Vec<String>) {
/// list.show(ui, items, |ui, item, _cx| {
///     ui.label(item.as_str());
/// });
/// # }
/// ```
pub struct ReorderableList<D = LinearAnimationDriver> {
    id: Id,
    options: ReorderOptions,
    session: DragSession<D>,
    keys: IdentityKeys,
    scroll_enabled: bool,
    on_item_reorder: Option<ReorderCallback>,
    last_frame: Option<ListFrame>,

    /// `InputState::time` of the last pass that consumed input.
    last_input_time: Option<f64>,

    debug_log: VecDeque<String>,
    debug_frame: u64,
}

impl<D: std::fmt::Debug> std::fmt::Debug for ReorderableList<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorderableList")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("session", &self.session)
            .field("keys", &self.keys)
            .field("scroll_enabled", &self.scroll_enabled)
            .finish_non_exhaustive()
    }
}

impl ReorderableList<LinearAnimationDriver> {
    /// # Errors
    /// If the options are invalid, see [`ReorderOptions::validate`].
    pub fn new(id_salt: impl Hash, options: ReorderOptions) -> Result<Self, ReorderOptionsError> {
        let driver = LinearAnimationDriver::new(options.animation_duration);
        Self::with_driver(id_salt, options, driver)
    }
}

impl<D: AnimationDriver> ReorderableList<D> {
    /// Use a custom animation driver for the raise and drop animations.
    ///
    /// # Errors
    /// If the options are invalid, see [`ReorderOptions::validate`].
    pub fn with_driver(
        id_salt: impl Hash,
        options: ReorderOptions,
        driver: D,
    ) -> Result<Self, ReorderOptionsError> {
        options.validate()?;
        let id = Id::new(id_salt);
        Ok(Self {
            id,
            session: DragSession::new(driver, &options),
            keys: IdentityKeys::new(id),
            options,
            scroll_enabled: true,
            on_item_reorder: None,
            last_frame: None,
            last_input_time: None,
            debug_log: VecDeque::new(),
            debug_frame: 0,
        })
    }

    /// Called once per committed move with `(from, to)`; never for a drop back into the same slot.
    #[must_use]
    pub fn on_item_reorder(mut self, callback: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_item_reorder = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn options(&self) -> &ReorderOptions {
        &self.options
    }

    pub fn session(&self) -> &DragSession<D> {
        &self.session
    }

    pub fn phase(&self) -> DragPhase {
        self.session.phase()
    }

    /// True while an item floats above the list.
    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    /// The stable id of logical item `index`.
    pub fn item_key(&self, index: usize) -> Option<Id> {
        self.keys.get(index)
    }

    /// Screen rectangle of display row `row` as laid out by the last [`Self::show`].
    pub fn row_rect_on_screen(&self, row: usize) -> Option<Rect> {
        let frame = self.last_frame.as_ref()?;
        Some(self.row_rect(frame, row))
    }

    /// Screen rectangle of the drag handle on display row `row`, as of the last [`Self::show`].
    pub fn handle_rect_on_screen(&self, row: usize) -> Option<Rect> {
        self.row_rect_on_screen(row).map(|rect| self.handle_rect(rect))
    }

    fn row_rect(&self, frame: &ListFrame, row: usize) -> Rect {
        let axis = self.options.axis;
        let extent = self.options.item_extent;
        Rect::from_min_size(
            frame.content_min + axis.along(row as f32 * extent),
            axis.vec2(extent, frame.cross_extent),
        )
    }

    fn handle_rect(&self, row_rect: Rect) -> Rect {
        let axis = self.options.axis;
        let cross = axis.cross_extent(row_rect);
        let thickness = self.options.handle_thickness.min(cross);
        let offset = (self.options.handle_alignment + 1.0) * 0.5 * (cross - thickness);
        Rect::from_min_size(
            row_rect.min + axis.vec2(0.0, offset),
            axis.vec2(self.options.item_extent, thickness),
        )
    }

    fn apply_commit<T>(&mut self, items: &mut [T], commit: ReorderCommit) {
        let ReorderCommit { from, to } = commit;
        if self.options.apply_reorder {
            apply_move(items, from, to);
        }
        self.keys.commit_move(from, to);
        if let Some(callback) = &mut self.on_item_reorder {
            callback(from, to);
        }
        log::debug!("reorder list {:?}: moved {from} -> {to}", self.id);
        self.debug_log_event(format!("commit from={from} to={to}"));
    }
}

impl<D: FrameDriver> ReorderableList<D> {
    /// Show the list, letting the user reorder `items`.
    ///
    /// `add_item` paints one item into a `Ui` of the configured item extent; it is called
    /// once per visible row and once more for the floating copy while dragging.
    pub fn show<T>(
        &mut self,
        ui: &mut Ui,
        items: &mut Vec<T>,
        mut add_item: impl FnMut(&mut Ui, &mut T, ItemContext),
    ) -> ReorderResponse {
        self.keys.sync_len(items.len());
        let phase_before = self.session.phase();
        let mut host = FrameHost::new(self.session.drag_index(), self.scroll_enabled);
        let mut moved = None;

        // A discarded pass is re-run with the same input; consume it once.
        let (time, dt) = ui.input(|i| (i.time, i.stable_dt));
        let fresh_input = self.last_input_time != Some(time);
        self.last_input_time = Some(time);

        if fresh_input {
            self.debug_frame = self.debug_frame.wrapping_add(1);
            if let Some(commit) = self.session.advance(&mut host, dt) {
                self.apply_commit(items, commit);
                moved = Some(commit);
            }
        }

        let fresh_press = fresh_input && ui.input(|i| i.pointer.primary_pressed());

        let axis = self.options.axis;
        let extent = self.options.item_extent;
        let item_count = items.len();

        let output = egui::ScrollArea::new(axis.scroll_flags())
            .id_salt(self.id.with("scroll"))
            .auto_shrink([false, false])
            .enable_scrolling(self.scroll_enabled)
            .show_viewport(ui, |ui, viewport| {
                let cross_extent = axis.cross(ui.available_size()).max(1.0);
                let (content_rect, _) = ui.allocate_exact_size(
                    axis.vec2(extent * item_count as f32, cross_extent),
                    Sense::hover(),
                );
                let frame = ListFrame {
                    content_min: content_rect.min,
                    viewport_min: content_rect.min + viewport.min.to_vec2(),
                    viewport_extent: axis.main_extent(viewport),
                    scroll_offset: axis.main_pos(viewport.min),
                    cross_extent,
                    clip_rect: ui.clip_rect(),
                };
                let pressed = self.show_rows(ui, &frame, items, &mut add_item, fresh_press);
                (frame, pressed)
            });
        let (frame, pressed) = output.inner;
        self.last_frame = Some(frame);

        let pressed = pressed.map(|(index, pointer)| {
            let geometry = DragGeometry {
                item_count,
                item_extent: extent,
                viewport_extent: frame.viewport_extent,
                scroll_offset: frame.scroll_offset,
                pointer_local: axis.main(pointer - frame.viewport_min),
            };
            (index, geometry)
        });
        if fresh_input {
            if let Some(commit) = self.handle_input(ui, &mut host, pressed) {
                self.apply_commit(items, commit);
                moved = Some(commit);
            }
        }

        if let Some(index) = host.overlay {
            self.show_floating(ui, &frame, items, index, &mut add_item);
        }

        self.scroll_enabled = host.scroll_enabled;
        if self.session.is_dragging() {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        }
        if host.repaint || self.session.is_active() || self.session.has_pending_drag() {
            ui.ctx().request_repaint();
        }

        let phase = self.session.phase();
        if phase != phase_before {
            self.debug_log_event(format!(
                "phase {phase_before:?} -> {phase:?} drag={:?} hover={:?}",
                self.session.drag_index(),
                self.session.hover_index()
            ));
        }

        ReorderResponse {
            moved,
            phase,
            hover_index: self.session.hover_index(),
        }
    }

    /// Feed this frame's handle press, pointer motion and release into the session.
    fn handle_input(
        &mut self,
        ui: &Ui,
        host: &mut FrameHost,
        pressed: Option<(usize, DragGeometry)>,
    ) -> Option<ReorderCommit> {
        if let Some((index, geometry)) = pressed {
            if self.session.press_handle(host, index, geometry) {
                return None;
            }
        }
        if !(self.session.has_pending_drag() || self.session.is_dragging()) {
            return None;
        }

        let axis = self.options.axis;
        let (delta, held_for, released) = ui.input(|i| {
            let held_for = i
                .pointer
                .press_start_time()
                .map(|start| Duration::from_secs_f64((i.time - start).max(0.0)))
                .unwrap_or_default();
            let released = i.pointer.any_released() || !i.pointer.primary_down();
            (axis.main(i.pointer.delta()), held_for, released)
        });

        if delta != 0.0 {
            self.session.pointer_moved(host, delta, held_for);
        }
        self.session.poll_pending(host, held_for);
        if released {
            return self.session.release(host);
        }
        None
    }

    /// Paint the visible rows; returns the item whose handle was pressed this frame.
    ///
    /// A press only counts if egui routed it to the handle, so layers above the list
    /// (windows, popups, menus) keep their clicks.
    fn show_rows<T>(
        &self,
        ui: &mut Ui,
        frame: &ListFrame,
        items: &mut [T],
        add_item: &mut impl FnMut(&mut Ui, &mut T, ItemContext),
        fresh_press: bool,
    ) -> Option<(usize, Pos2)> {
        let extent = self.options.item_extent;
        let first = (frame.scroll_offset / extent).floor().max(0.0) as usize;
        let last = ((frame.scroll_offset + frame.viewport_extent) / extent).ceil().max(0.0) as usize;
        let rows = first..last.min(items.len());

        let dragging = self.session.is_active();
        let gap_row = self.session.hover_index().filter(|_| dragging);
        let mut pressed = None;

        for row in rows {
            let rect = self.row_rect(frame, row);
            if gap_row == Some(row) {
                paint_gap(ui, rect);
                continue;
            }

            let index = self.session.display_to_item(row);
            let (Some(item), Some(key)) = (items.get_mut(index), self.keys.get(index)) else {
                continue;
            };

            let mut child = ui.new_child(
                UiBuilder::new()
                    .id_salt(key)
                    .max_rect(rect)
                    .layout(Layout::left_to_right(Align::Center)),
            );
            child.set_clip_rect(rect.intersect(frame.clip_rect));
            add_item(
                &mut child,
                item,
                ItemContext {
                    index,
                    row,
                    key,
                    is_floating: false,
                },
            );

            let handle = self.handle_rect(rect);
            let response = ui.interact(handle, key.with("reorder_handle"), Sense::drag());
            let held = self.session.pressed_index() == Some(index);
            paint_handle(ui, handle, self.options.axis, held || response.hovered());
            if !dragging && response.hovered() {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }

            if fresh_press && !dragging && response.is_pointer_button_down_on() {
                if let Some(pos) = response
                    .interact_pointer_pos()
                    .filter(|pos| frame.clip_rect.contains(*pos))
                {
                    pressed = Some((index, pos));
                }
            }
        }

        pressed
    }

    fn show_floating<T>(
        &self,
        ui: &Ui,
        frame: &ListFrame,
        items: &mut [T],
        index: usize,
        add_item: &mut impl FnMut(&mut Ui, &mut T, ItemContext),
    ) {
        let axis = self.options.axis;
        let (Some(leading), Some(key)) = (self.session.floating_leading(), self.keys.get(index))
        else {
            return;
        };
        let Some(item) = items.get_mut(index) else {
            return;
        };

        let size = axis.vec2(self.options.item_extent, frame.cross_extent);
        let main = axis.main_pos(frame.viewport_min) + leading;
        let pos = Pos2::ZERO + axis.vec2(main, axis.cross(frame.content_min.to_vec2()));
        let elevation = self.session.elevation();
        let row = self.session.hover_index().unwrap_or(index);

        egui::Area::new(self.id.with("reorder_floating"))
            .order(Order::Tooltip)
            .fixed_pos(pos)
            .interactable(false)
            .show(ui.ctx(), |ui| {
                let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
                let visuals = ui.visuals();
                if elevation > 0.0 {
                    ui.painter().rect_filled(
                        rect.translate(Vec2::splat(elevation * 0.5)).expand(elevation * 0.5),
                        4.0,
                        Color32::from_black_alpha(40),
                    );
                }
                ui.painter().rect_filled(rect, 4.0, visuals.window_fill);
                ui.painter()
                    .rect_stroke(rect, 4.0, visuals.window_stroke, StrokeKind::Inside);

                let mut child = ui.new_child(
                    UiBuilder::new()
                        .id_salt(key.with("floating"))
                        .max_rect(rect)
                        .layout(Layout::left_to_right(Align::Center)),
                );
                add_item(
                    &mut child,
                    item,
                    ItemContext {
                        index,
                        row,
                        key,
                        is_floating: true,
                    },
                );
                paint_handle(ui, self.handle_rect(rect), axis, true);
            });
    }
}

fn paint_gap(ui: &Ui, rect: Rect) {
    let visuals = ui.visuals();
    ui.painter()
        .rect_filled(rect.shrink(1.0), 4.0, visuals.faint_bg_color);
    ui.painter().rect_stroke(
        rect.shrink(1.0),
        4.0,
        visuals.widgets.noninteractive.bg_stroke,
        StrokeKind::Inside,
    );
}

/// Three grip lines across the handle.
fn paint_handle(ui: &Ui, handle: Rect, axis: ScrollAxis, highlighted: bool) {
    let color = if highlighted {
        ui.visuals().widgets.hovered.fg_stroke.color
    } else {
        ui.visuals().widgets.inactive.fg_stroke.color
    };
    let stroke = Stroke::new(1.5, color);
    let half_cross = axis.cross_extent(handle) * 0.25;
    let center = handle.center();
    for step in [-4.0, 0.0, 4.0] {
        let mid = center + axis.along(step);
        ui.painter().line_segment(
            [mid - axis.vec2(0.0, half_cross), mid + axis.vec2(0.0, half_cross)],
            stroke,
        );
    }
}
