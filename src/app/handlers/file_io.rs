//! Handler für Datei-Operationen (Settings laden und speichern).

use crate::app::use_cases;
use crate::app::AppState;

/// Lädt Settings aus dem übergebenen Pfad und baut die Strecke neu auf.
pub fn load(state: &mut AppState, path: String) -> anyhow::Result<()> {
    use_cases::file_io::load_settings(state, path)
}

/// Speichert das aktuelle Layout.
///
/// `None` speichert unter dem zuletzt geladenen Pfad.
/// `Some(p)` speichert explizit unter dem neuen Pfad `p`.
pub fn save(state: &mut AppState, path: Option<String>) -> anyhow::Result<()> {
    use_cases::file_io::save_settings(state, path)
}
