//! Drag-to-reorder for lists of fixed-extent items in `egui`.
//!
//! See [`ReorderableList`].

#![forbid(unsafe_code)]

pub mod reorder;

pub use reorder::{
    AnimationDriver, AnimationStatus, DragGeometry, DragHost, DragPhase, DragSession,
    DragStartPolicy, FrameDriver, IdentityKeys, ItemContext, LinearAnimationDriver,
    ReorderCommit, ReorderOptions, ReorderOptionsError, ReorderResponse, ReorderableList,
    ScrollAxis,
};
