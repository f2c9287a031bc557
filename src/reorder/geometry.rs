/// Main-axis geometry of a list, captured when a handle is pressed.
///
/// All positions are along the scroll axis and in viewport space
/// (`0.0` is the leading edge of the visible region).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGeometry {
    pub item_count: usize,
    pub item_extent: f32,

    /// Visible extent of the viewport along the scroll axis.
    pub viewport_extent: f32,

    /// Scroll offset of the list content at press time.
    pub scroll_offset: f32,

    /// Pointer position inside the viewport at press time.
    pub pointer_local: f32,
}

impl DragGeometry {
    /// Leading edge of slot `index` in viewport space.
    pub fn slot_leading(&self, index: usize) -> f32 {
        index as f32 * self.item_extent - self.scroll_offset
    }

    /// Leading edge of slot `index`, clamped so the slot fits inside the viewport.
    ///
    /// A slot partially scrolled out of view is pulled back in; the difference to
    /// [`Self::slot_leading`] is the clip amount.
    pub fn clipped_slot_leading(&self, index: usize) -> f32 {
        let max = (self.viewport_extent - self.item_extent).max(0.0);
        self.slot_leading(index).clamp(0.0, max)
    }

    pub fn clip_amount(&self, index: usize) -> f32 {
        self.slot_leading(index) - self.clipped_slot_leading(index)
    }
}

/// Range the bounded delta is clamped to, so the floating item stays in the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaBounds {
    pub min: f32,
    pub max: f32,
}

impl DeltaBounds {
    /// `pointer_local_start` is the pointer position inside the viewport,
    /// `item_local_start` the pointer offset inside the floating item.
    ///
    /// The floating item's leading edge may travel half an item past the viewport start,
    /// and its centre may not pass the viewport end.
    pub fn new(
        pointer_local_start: f32,
        item_local_start: f32,
        item_extent: f32,
        viewport_extent: f32,
    ) -> Self {
        let mut min = -pointer_local_start + item_local_start - item_extent * 0.5;
        if !min.is_finite() {
            min = 0.0;
        }
        let max = min + viewport_extent.max(0.0);
        Self { min, max }
    }

    /// A zero-width range: the delta cannot move away from `at`.
    pub fn pinned(at: f32) -> Self {
        let at = if at.is_finite() { at } else { 0.0 };
        Self { min: at, max: at }
    }

    #[inline]
    pub fn clamp(self, delta: f32) -> f32 {
        if delta.is_nan() {
            return 0.0_f32.clamp(self.min, self.max);
        }
        delta.clamp(self.min, self.max)
    }

    #[inline]
    pub fn contains(self, delta: f32) -> bool {
        self.min <= delta && delta <= self.max
    }
}

impl Default for DeltaBounds {
    fn default() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

/// Map an offset from the dragged slot's rest position to the slot the floating item overlaps.
///
/// The half-extent bias means the hover slot only flips once the floating item's centre has
/// crossed into the neighbouring slot. The result is always a valid index (or `0` for an empty list).
pub fn resolve_hover_index(
    drag_index: usize,
    offset: f32,
    item_extent: f32,
    item_count: usize,
) -> usize {
    let Some(last) = item_count.checked_sub(1) else {
        return 0;
    };
    let drag_index = drag_index.min(last);
    if item_extent.is_nan() || item_extent <= 0.0 || !offset.is_finite() {
        return drag_index;
    }

    let half = item_extent * 0.5 * offset.signum();
    let steps = ((offset + half) / item_extent).trunc();
    let raw = drag_index as f64 + f64::from(steps);
    raw.clamp(0.0, last as f64) as usize
}
