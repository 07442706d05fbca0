//! Display boundary for particle-analyser.
//!
//! The particle manager never draws anything itself. It builds a
//! [`DisplayRequest`] from the visible particles and hands it to a [`Viewer`]:
//! - [`DisplayRequest`] / [`DisplayItem`] / [`DisplayGeometry`] describe what to show
//! - [`ColorMapRegistry`] and [`split_color`] provide gradient and split coloring
//! - [`LogViewer`] and [`RecordingViewer`] are ready-made viewers

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod color_maps;
pub mod error;
pub mod palette;
pub mod request;
pub mod viewer;

pub use color_maps::{ColorMap, ColorMapRegistry};
pub use error::{ViewerError, ViewerResult};
pub use palette::{hsv_to_rgb, split_color};
pub use request::{DisplayGeometry, DisplayItem, DisplayKind, DisplayRequest};
pub use viewer::{LogViewer, RecordingViewer, Viewer};
