//! Bézier Track Editor Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;
pub mod xml;

pub use app::{AppCommand, AppController, AppIntent, AppState};
pub use core::{
    Camera3D, CameraMode, CtrlPointSelection, CtrlPointSlot, CubicCurve, Curve, PickInput, Ray,
    Rider, Track, Viewport,
};
pub use shared::{RenderScene, TrackOptions, TrackParams};
pub use xml::{load_track_settings, parse_track_settings, TrackSettings};
