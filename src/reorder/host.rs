/// What a [`super::DragSession`] needs from the list that hosts it.
///
/// The session decides *when* the floating item appears, disappears and moves;
/// the host owns the overlay and the viewport and decides *how*.
pub trait DragHost {
    /// Show the floating copy of item `index` above the list.
    fn insert_overlay(&mut self, index: usize);

    /// Remove the floating copy.
    fn remove_overlay(&mut self);

    /// Session geometry changed; the overlay and the list need to be painted again.
    fn request_repaint(&mut self);

    /// Enable or disable the viewport's own scroll input.
    ///
    /// Scrolling is disabled for the whole drag so the pointer is the only source of motion.
    fn set_scroll_enabled(&mut self, enabled: bool);
}

/// Host state for one `egui` pass: recorded here, acted upon when the list paints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FrameHost {
    pub(crate) overlay: Option<usize>,
    pub(crate) scroll_enabled: bool,
    pub(crate) repaint: bool,
}

impl FrameHost {
    pub(crate) fn new(overlay: Option<usize>, scroll_enabled: bool) -> Self {
        Self {
            overlay,
            scroll_enabled,
            repaint: false,
        }
    }
}

impl DragHost for FrameHost {
    fn insert_overlay(&mut self, index: usize) {
        self.overlay = Some(index);
        self.repaint = true;
    }

    fn remove_overlay(&mut self) {
        self.overlay = None;
        self.repaint = true;
    }

    fn request_repaint(&mut self) {
        self.repaint = true;
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }
}
