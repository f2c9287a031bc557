use egui::{Pos2, Rect, Vec2};

/// The axis along which a [`super::ReorderableList`] lays out and scrolls its items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ScrollAxis {
    #[default]
    Vertical,
    Horizontal,
}

impl ScrollAxis {
    /// Project a 2-D vector onto the scroll axis.
    #[inline]
    pub fn main(self, v: Vec2) -> f32 {
        match self {
            Self::Vertical => v.y,
            Self::Horizontal => v.x,
        }
    }

    /// Project a 2-D vector onto the axis perpendicular to the scroll axis.
    #[inline]
    pub fn cross(self, v: Vec2) -> f32 {
        match self {
            Self::Vertical => v.x,
            Self::Horizontal => v.y,
        }
    }

    #[inline]
    pub fn main_pos(self, p: Pos2) -> f32 {
        self.main(p.to_vec2())
    }

    /// Inverse of [`Self::main`]/[`Self::cross`]: build a vector from its axis components.
    #[inline]
    pub fn vec2(self, main: f32, cross: f32) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(cross, main),
            Self::Horizontal => Vec2::new(main, cross),
        }
    }

    /// A vector of length `main` along the scroll axis.
    #[inline]
    pub fn along(self, main: f32) -> Vec2 {
        self.vec2(main, 0.0)
    }

    #[inline]
    pub fn main_extent(self, rect: Rect) -> f32 {
        self.main(rect.size())
    }

    #[inline]
    pub fn cross_extent(self, rect: Rect) -> f32 {
        self.cross(rect.size())
    }

    /// Scroll-area enable flags (`[horizontal, vertical]`) for this axis.
    #[inline]
    pub(crate) fn scroll_flags(self) -> [bool; 2] {
        match self {
            Self::Vertical => [false, true],
            Self::Horizontal => [true, false],
        }
    }
}
