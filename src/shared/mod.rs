//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen, Geometrie-Hilfen und die Render-Szene, die zwischen
//! `core`, `app` und einem Renderer geteilt werden.

pub mod curve_geometry;
pub mod options;
mod render_scene;

pub use options::{TrackOptions, TrackParams};
pub use render_scene::{
    CtrlPointInstance, LineVertex, RenderScene, RiderTransform, SelectionHighlight,
};
