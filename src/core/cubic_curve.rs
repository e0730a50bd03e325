//! Kubisches Bézier-Segment mit gecachter Polylinie, Koeffizienten und Bogenlänge.

use crate::shared::curve_geometry::{normalize_or_unchanged, polyline_length};
use crate::shared::options::DEFAULT_RESOLUTION;
use glam::Vec3;

/// Fähigkeiten einer parametrischen Kurve, wie sie Track und Renderer brauchen.
pub trait Curve {
    /// Punkt auf der Kurve für `t ∈ [0, 1]`.
    fn point_at(&self, t: f32) -> Vec3;
    /// Normalisierte Tangente für `t ∈ [0, 1]`.
    fn tangent_at(&self, t: f32) -> Vec3;
    /// Tessellierte Polylinie (ohne den Endpunkt bei `t = 1`).
    fn polyline(&self) -> &[Vec3];
    /// Geschätzte Bogenlänge.
    fn arc_length(&self) -> f32;
}

/// Ein kubisches Segment: Start, Start-Handle, End-Handle, Ende.
///
/// Polylinie, Polynom-Koeffizienten und Bogenlänge werden bei jeder Änderung
/// der Kontrollpunkte oder der Auflösung sofort neu berechnet und sind damit
/// nie veraltet.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicCurve {
    ctrl_points: [Vec3; 4],
    resolution: usize,
    polyline: Vec<Vec3>,
    // Horner-Form: ((a·t + b)·t + c)·t + d
    a: Vec3,
    b: Vec3,
    c: Vec3,
    d: Vec3,
    // Ableitung: (da·t + db)·t + c
    da: Vec3,
    db: Vec3,
    arc_length: f32,
}

impl CubicCurve {
    /// Erstellt ein Segment mit Standard-Auflösung.
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self::with_resolution([p0, p1, p2, p3], DEFAULT_RESOLUTION)
    }

    /// Erstellt ein Segment aus vier Kontrollpunkten mit gegebener Auflösung.
    pub fn with_resolution(ctrl_points: [Vec3; 4], resolution: usize) -> Self {
        debug_assert!(resolution >= 1, "Auflösung muss mindestens 1 sein");
        let mut curve = Self {
            ctrl_points,
            resolution,
            polyline: Vec::with_capacity(resolution),
            a: Vec3::ZERO,
            b: Vec3::ZERO,
            c: Vec3::ZERO,
            d: Vec3::ZERO,
            da: Vec3::ZERO,
            db: Vec3::ZERO,
            arc_length: 0.0,
        };
        curve.compute();
        curve
    }

    /// Alle vier Kontrollpunkte.
    pub fn ctrl_points(&self) -> &[Vec3; 4] {
        &self.ctrl_points
    }

    /// Kontrollpunkt `i` (0 = Start-Anker, 1/2 = Handles, 3 = End-Anker).
    pub fn ctrl_point(&self, i: usize) -> Vec3 {
        self.ctrl_points[i]
    }

    /// Start-Anker (Kontrollpunkt 0).
    pub fn start(&self) -> Vec3 {
        self.ctrl_points[0]
    }

    /// End-Anker (Kontrollpunkt 3).
    pub fn end(&self) -> Vec3 {
        self.ctrl_points[3]
    }

    /// Anzahl der Polylinien-Punkte.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Ersetzt alle Kontrollpunkte und berechnet das Segment neu.
    pub fn set_ctrl_points(&mut self, ctrl_points: [Vec3; 4]) {
        self.ctrl_points = ctrl_points;
        self.compute();
    }

    /// Ersetzt einen Kontrollpunkt und berechnet das Segment neu.
    pub fn set_ctrl_point(&mut self, i: usize, point: Vec3) {
        self.ctrl_points[i] = point;
        self.compute();
    }

    /// Ändert mehrere Kontrollpunkte in einem Schritt (eine Neuberechnung).
    pub fn edit_ctrl_points(&mut self, edit: impl FnOnce(&mut [Vec3; 4])) {
        edit(&mut self.ctrl_points);
        self.compute();
    }

    /// Setzt die Auflösung und tesselliert neu.
    pub fn set_resolution(&mut self, resolution: usize) {
        debug_assert!(resolution >= 1, "Auflösung muss mindestens 1 sein");
        if resolution == self.resolution {
            return;
        }
        self.resolution = resolution.max(1);
        self.compute();
    }

    /// Leitet Koeffizienten, Polylinie und Bogenlänge aus den Kontrollpunkten ab.
    fn compute(&mut self) {
        let [p0, p1, p2, p3] = self.ctrl_points;

        self.d = p0;
        self.c = 3.0 * (p1 - p0);
        self.b = 3.0 * (p2 - p1) - self.c;
        self.a = p3 - p0 - self.b - self.c;

        self.da = 3.0 * self.a;
        self.db = 2.0 * self.b;

        self.tessellate();
        self.arc_length = self.estimate_arc_length();
    }

    /// Tessellierung per Vorwärtsdifferenzen: O(1) pro Stützstelle.
    ///
    /// Liefert dieselben Stützstellen wie `point_at(i / resolution)` für
    /// `i ∈ [0, resolution)`.
    fn tessellate(&mut self) {
        let h1 = 1.0 / self.resolution as f32;
        let h2 = h1 * h1;
        let h3 = h2 * h1;

        let fd3 = 6.0 * self.a * h3;
        let mut fd2 = fd3 + 2.0 * self.b * h2;
        let mut fd1 = self.a * h3 + self.b * h2 + self.c * h1;
        let mut fd0 = self.d;

        self.polyline.clear();
        self.polyline.reserve(self.resolution);
        self.polyline.push(fd0);

        for _ in 1..self.resolution {
            fd0 += fd1;
            fd1 += fd2;
            fd2 += fd3;
            self.polyline.push(fd0);
        }
    }

    /// Schätzung nach Gravesen: Mittel aus Kontrollpolygon- und Sehnenlänge.
    ///
    /// Keine exakte Integration. Das Kontrollpolygon überschätzt, die Sehne
    /// unterschätzt die wahre Länge; der Mittelwert liegt dazwischen.
    fn estimate_arc_length(&self) -> f32 {
        let polygon = polyline_length(&self.ctrl_points);
        let chord = self.ctrl_points[0].distance(self.ctrl_points[3]);
        0.5 * (polygon + chord)
    }

    /// De-Casteljau-Zwischenpunkte für `t`.
    ///
    /// Index 0..3 = erste Runde, 3..5 = zweite Runde, 5 = Kurvenpunkt.
    pub fn de_casteljau(&self, t: f32) -> [Vec3; 6] {
        debug_assert!((0.0..=1.0).contains(&t), "t außerhalb [0, 1]: {t}");
        let [p0, p1, p2, p3] = self.ctrl_points;

        let r10 = p0.lerp(p1, t);
        let r11 = p1.lerp(p2, t);
        let r12 = p2.lerp(p3, t);

        let r20 = r10.lerp(r11, t);
        let r21 = r11.lerp(r12, t);

        let r30 = r20.lerp(r21, t);

        [r10, r11, r12, r20, r21, r30]
    }

    /// Teilt das Segment bei `t` in zwei Segmente für `[0, t]` und `[t, 1]`.
    pub fn split(&self, t: f32) -> ([Vec3; 4], [Vec3; 4]) {
        let [r10, _, r12, r20, r21, r30] = self.de_casteljau(t);
        let left = [self.ctrl_points[0], r10, r20, r30];
        let right = [r30, r21, r12, self.ctrl_points[3]];
        (left, right)
    }

    /// Unnormalisierte erste Ableitung bei `t`.
    pub fn derivative_at(&self, t: f32) -> Vec3 {
        debug_assert!((0.0..=1.0).contains(&t), "t außerhalb [0, 1]: {t}");
        (self.da * t + self.db) * t + self.c
    }
}

impl Curve for CubicCurve {
    fn point_at(&self, t: f32) -> Vec3 {
        debug_assert!((0.0..=1.0).contains(&t), "t außerhalb [0, 1]: {t}");
        ((self.a * t + self.b) * t + self.c) * t + self.d
    }

    fn tangent_at(&self, t: f32) -> Vec3 {
        normalize_or_unchanged(self.derivative_at(t))
    }

    fn polyline(&self) -> &[Vec3] {
        &self.polyline
    }

    fn arc_length(&self) -> f32 {
        self.arc_length
    }
}
