//! Core-Domänentypen: Kurvensegmente, Strecke, Rider, Kontrollpunkt-Editor, Kamera.

pub mod camera;
pub mod control_point_editor;
/// Kubische Bézier-Segmente
///
/// Ein Segment cached Polylinie, Polynom-Koeffizienten und Bogenlänge,
/// die Strecke verkettet mehrere Segmente zu einer geschlossenen Schleife.
pub mod cubic_curve;
pub mod ray;
pub mod rider;
pub mod track;

pub use camera::{project, unproject, Camera3D, CameraMode, Viewport};
pub use control_point_editor::{CtrlPointSelection, CtrlPointSlot, PickHit, PickInput};
pub use cubic_curve::{CubicCurve, Curve};
pub use ray::Ray;
pub use rider::{Rider, RIDER_REFERENCE_AXIS};
pub use track::Track;
