use itertools::Itertools as _;

use super::ReorderableList;

impl<D> ReorderableList<D> {
    pub(super) fn debug_log_event(&mut self, message: impl Into<String>) {
        if !self.options.debug_event_log {
            return;
        }
        let cap = self.options.debug_event_log_capacity.clamp(1, 10_000);
        while self.debug_log.len() >= cap {
            self.debug_log.pop_front();
        }
        self.debug_log
            .push_back(format!("[frame {}] {}", self.debug_frame, message.into()));
    }

    /// The recorded transitions, one per line. Empty unless
    /// [`super::ReorderOptions::debug_event_log`] is set.
    pub fn debug_log_text(&self) -> String {
        self.debug_log.iter().join("\n")
    }

    pub fn debug_log_clear(&mut self) {
        self.debug_log.clear();
    }
}
