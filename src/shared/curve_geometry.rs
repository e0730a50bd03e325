//! Reine Geometrie-Funktionen für kubische Segmente und ihre Nahtstellen.
//!
//! Layer-neutral: wird von `core`, `app` und Tests genutzt, ohne
//! Zirkel-Abhängigkeiten zu erzeugen.

use glam::Vec3;

/// Vektoren kürzer als dieser Wert werden nicht normalisiert.
pub const NORMALIZE_EPSILON: f32 = 1e-6;

/// Normalisiert `v`; nahezu Nullvektoren werden unverändert zurückgegeben.
pub fn normalize_or_unchanged(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > NORMALIZE_EPSILON {
        v / length
    } else {
        v
    }
}

/// Spiegelt `handle` am `anchor`: `anchor + (anchor − handle)`.
///
/// Liefert das Handle auf der anderen Seite einer Naht, sodass die Tangente
/// dort in Richtung und Betrag stetig ist (C1).
pub fn reflect_handle(anchor: Vec3, handle: Vec3) -> Vec3 {
    anchor + (anchor - handle)
}

/// Abweichung eines Handle-Paars von der C1-Spiegelregel an `anchor`.
pub fn continuity_deviation(handle_before: Vec3, anchor: Vec3, handle_after: Vec3) -> f32 {
    handle_after.distance(reflect_handle(anchor, handle_before))
}

/// Approximierte Länge einer Polyline.
pub fn polyline_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
