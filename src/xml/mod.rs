//! XML Import/Export für Strecken-Settings.
//!
//! Eine Settings-Datei beschreibt Fenster, Rider-Modell, Startkamera,
//! Licht und das Anfangs-Layout der Strecke als Folge von Kurven.

pub mod parser;
pub mod settings;
pub mod writer;

pub use parser::{load_track_settings, parse_track_settings};
pub use settings::{CameraSettings, LightSettings, TrackSettings, WindowSettings};
pub use writer::{save_track_settings, write_track_settings};
