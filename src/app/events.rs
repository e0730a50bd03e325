//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.

use glam::Vec2;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Settings-Datei laden und Strecke neu aufbauen
    SettingsLoadRequested { path: String },
    /// Aktuelles Layout speichern (`None` = zuletzt geladene Datei)
    SettingsSaveRequested { path: Option<String> },
    /// Fester Simulationsschritt ist abgelaufen
    TickElapsed { dt: f32 },
    /// Cursor wurde bewegt (Pixel, Ursprung oben links)
    CursorMoved { pos: Vec2 },
    /// Primäre Maustaste gedrückt
    PrimaryPressed,
    /// Primäre Maustaste losgelassen
    PrimaryReleased,
    /// Sekundäre Maustaste gedrückt (Orbit beginnt)
    SecondaryPressed,
    /// Sekundäre Maustaste losgelassen
    SecondaryReleased,
    /// Cursor hat den Viewport verlassen
    CursorLeftViewport,
    /// Kameramodus weiterschalten (God → 1st → 3rd → God)
    CameraModeCycleRequested,
    /// Auflösung erhöhen
    ResolutionIncreaseRequested,
    /// Auflösung verringern
    ResolutionDecreaseRequested,
    /// Längstes Segment teilen
    SegmentSplitRequested,
    /// Rider hinzufügen
    RiderAddRequested,
    /// Zuletzt hinzugefügten Rider entfernen
    RiderRemoveRequested,
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
}

/// Mutierende Commands, die der Controller ausführt.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Settings laden
    LoadSettings { path: String },
    /// Layout als Settings speichern
    SaveSettings { path: Option<String> },
    /// Verfolgerkamera für den aktuellen Modus nachführen
    UpdateFollowCamera,
    /// Rider um `dt` Sekunden bewegen
    AdvanceSimulation { dt: f32 },
    /// Cursorposition im State merken
    SetCursor { pos: Vec2 },
    /// Gegriffenen Kontrollpunkt zur Cursorposition ziehen
    DragCtrlPoint { cursor: Vec2 },
    /// Kamera um Maus-Delta kreisen lassen
    OrbitCamera { delta: Vec2 },
    /// Kontrollpunkt unter dem Cursor greifen
    PickCtrlPoint { cursor: Vec2 },
    /// Gegriffenen Kontrollpunkt loslassen
    ClearCtrlPointSelection,
    /// Zustand der sekundären Maustaste setzen
    SetSecondaryHeld { held: bool },
    /// Kameramodus weiterschalten
    CycleCameraMode,
    /// Auflösung erhöhen
    IncreaseResolution,
    /// Auflösung verringern
    DecreaseResolution,
    /// Längstes Segment teilen
    SplitLongestSegment,
    /// Rider hinzufügen
    AddRider,
    /// Rider entfernen
    RemoveRider,
    /// Viewport-Größe setzen
    SetViewportSize { size: [f32; 2] },
}
