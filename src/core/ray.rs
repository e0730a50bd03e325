//! Strahl für Picking-Tests im Weltraum.

use glam::Vec3;

/// Halbgerade `origin + t · direction` mit `t ≥ 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Startpunkt (Kameraposition)
    pub origin: Vec3,
    /// Richtung, normalisiert
    pub direction: Vec3,
}

impl Ray {
    /// Erstellt einen Strahl; die Richtung wird normalisiert.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Punkt beim Strahlparameter `t`.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Schnitt mit einer Kugel.
    ///
    /// Gibt den kleinsten nicht-negativen Strahlparameter zurück; `None` wenn
    /// der Strahl die Kugel verfehlt oder sie vollständig hinter dem Ursprung liegt.
    /// Liegt der Ursprung in der Kugel, zählt der Austrittspunkt.
    pub fn test_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let offset = self.origin - center;
        let b = offset.dot(self.direction);
        let c = offset.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}
