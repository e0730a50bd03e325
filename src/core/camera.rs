//! 3D-Kamera mit Orbit, Verfolgerfeder und Projektionshilfen für das Picking.

use super::control_point_editor::PickInput;
use super::ray::Ray;
use crate::shared::curve_geometry::normalize_or_unchanged;
use crate::shared::options::{
    CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_NEAR, CAMERA_ORBIT_DIVISOR, CAMERA_ORBIT_RADIUS,
    CAMERA_ORBIT_START_YAW_DEG, CAMERA_SPRING_DAMPING, CAMERA_SPRING_MASS,
    CAMERA_SPRING_STIFFNESS,
};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Bildschirmrechteck in Pixeln (Ursprung oben links, y nach unten).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Viewport ab Ursprung mit Größe `[Breite, Höhe]`.
    pub fn from_size(size: [f32; 2]) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size[0],
            height: size[1],
        }
    }

    /// Seitenverhältnis Breite / Höhe.
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Pixelposition → normalisierte Gerätekoordinaten (x rechts, y oben).
    pub fn cursor_to_ndc(&self, cursor: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * (cursor.x - self.x) / self.width.max(1.0) - 1.0,
            1.0 - 2.0 * (cursor.y - self.y) / self.height.max(1.0),
        )
    }

    /// Normalisierte Gerätekoordinaten → Pixelposition.
    pub fn ndc_to_cursor(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.x + (ndc.x + 1.0) * 0.5 * self.width,
            self.y + (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// Perspektivische Kamera.
///
/// Orbit-Winkel und Federgeschwindigkeit sind Felder der Kamera, damit das
/// Verhalten nicht von versteckter Aufrufhistorie abhängt.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Position in Weltkoordinaten
    pub position: Vec3,
    /// Zielpunkt, auf den die Kamera schaut
    pub look: Vec3,
    /// Welt-Hochachse
    pub up: Vec3,
    /// Vertikales Sichtfeld in Grad
    pub fov_y_deg: f32,
    /// Radius der Orbit-Bewegung
    pub orbit_radius: f32,
    forward: Vec3,
    right: Vec3,
    down: Vec3,
    orbit_yaw_deg: f32,
    velocity: Vec3,
}

impl Camera3D {
    /// Erstellt eine Kamera auf dem Orbit, Blick auf den Ursprung.
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 10.0, -CAMERA_ORBIT_RADIUS),
            look: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_deg: CAMERA_FOV_Y_DEG,
            orbit_radius: CAMERA_ORBIT_RADIUS,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            down: Vec3::NEG_Y,
            orbit_yaw_deg: CAMERA_ORBIT_START_YAW_DEG,
            velocity: Vec3::ZERO,
        };
        camera.compute_basis();
        camera
    }

    /// Setzt Position und Blickziel und aktualisiert die Basis.
    pub fn set_view(&mut self, position: Vec3, look: Vec3) {
        self.position = position;
        self.look = look;
        self.compute_basis();
    }

    /// Leitet Vorwärts-, Rechts- und Abwärtsvektor aus Position/Ziel ab.
    pub fn compute_basis(&mut self) {
        self.forward = normalize_or_unchanged(self.look - self.position);
        let right = self.forward.cross(self.up);
        // Blick parallel zur Hochachse: feste Rechtsachse statt Nullvektor
        self.right = if right.length_squared() > 1e-12 {
            right.normalize()
        } else {
            Vec3::X
        };
        self.down = self.forward.cross(self.right);
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn down(&self) -> Vec3 {
        self.down
    }

    /// Aktueller Orbit-Gierwinkel in Grad, `[0, 360)`.
    pub fn orbit_yaw_deg(&self) -> f32 {
        self.orbit_yaw_deg
    }

    /// Kreist die Kamera per Maus-Delta um die Hochachse.
    ///
    /// Nur das horizontale Delta wirkt; die Höhe bleibt erhalten.
    pub fn orbit_by_mouse(&mut self, delta_x: f32, _delta_y: f32) {
        self.orbit_yaw_deg = (self.orbit_yaw_deg + delta_x / CAMERA_ORBIT_DIVISOR).rem_euclid(360.0);
        let yaw = self.orbit_yaw_deg.to_radians();
        self.position.x = self.orbit_radius * yaw.sin();
        self.position.z = self.orbit_radius * yaw.cos();
        self.compute_basis();
    }

    /// Zieht die Kamera über eine gedämpfte Feder Richtung `target`.
    pub fn follow_target(&mut self, target: Vec3, look: Vec3) {
        let stretch = (target - self.position) * CAMERA_SPRING_STIFFNESS;
        let force = stretch - self.velocity * CAMERA_SPRING_DAMPING;
        let acceleration = force / CAMERA_SPRING_MASS;

        self.velocity += acceleration;
        self.position += self.velocity;
        self.look = look;
        self.compute_basis();
    }

    /// Setzt die Federgeschwindigkeit zurück (z.B. beim Moduswechsel).
    pub fn reset_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    /// View-Matrix (rechtshändig), Hochachse aus der Basis.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look, -self.down)
    }

    /// Projektionsmatrix mit OpenGL-Tiefenbereich.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), aspect, CAMERA_NEAR, CAMERA_FAR)
    }

    /// Bündelt alles, was der Kontrollpunkt-Editor für einen Pick braucht.
    pub fn pick_input(&self, cursor: Vec2, viewport: Viewport) -> PickInput {
        PickInput {
            cursor,
            viewport,
            camera_position: self.position,
            right: self.right,
            down: self.down,
            forward: self.forward,
            fov_y: self.fov_y_deg.to_radians(),
            view: self.view_matrix(),
            projection: self.projection_matrix(viewport.aspect()),
        }
    }

    /// Strahl von der Kamera durch die Cursorposition.
    pub fn pick_ray(&self, cursor: Vec2, viewport: Viewport) -> Ray {
        self.pick_input(cursor, viewport).ray()
    }

    /// Fenstertiefe `[0, 1]` eines Weltpunkts in dieser Kamera.
    pub fn window_depth(&self, point: Vec3, viewport: Viewport) -> Option<f32> {
        let projection = self.projection_matrix(viewport.aspect());
        project(point, &self.view_matrix(), &projection, &viewport).map(|screen| screen.z)
    }

    /// Cursorposition auf Fenstertiefe `depth` → Weltpunkt.
    pub fn unproject(&self, cursor: Vec2, depth: f32, viewport: Viewport) -> Option<Vec3> {
        let projection = self.projection_matrix(viewport.aspect());
        unproject(cursor, depth, &self.view_matrix(), &projection, &viewport)
    }
}

/// Kameramodus der Szene, zyklisch umschaltbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Freier Orbit, Kontrollpunkte editierbar
    #[default]
    God,
    /// Blick aus dem ersten Rider
    FirstPerson,
    /// Federkamera hinter dem ersten Rider
    ThirdPerson,
}

impl CameraMode {
    /// Nächster Modus: God → FirstPerson → ThirdPerson → God.
    pub fn next(self) -> Self {
        match self {
            CameraMode::God => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::God,
        }
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::new()
    }
}

/// Weltpunkt → (Pixel-x, Pixel-y, Fenstertiefe `[0, 1]`).
///
/// `None` wenn der Punkt auf der Kameraebene liegt.
pub fn project(point: Vec3, view: &Mat4, projection: &Mat4, viewport: &Viewport) -> Option<Vec3> {
    let clip = *projection * *view * point.extend(1.0);
    if clip.w.abs() < f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let cursor = viewport.ndc_to_cursor(ndc.truncate());
    Some(Vec3::new(cursor.x, cursor.y, (ndc.z + 1.0) * 0.5))
}

/// Pixelposition + Fenstertiefe → Weltpunkt (Umkehrung von [`project`]).
///
/// `None` bei singulärer Matrix.
pub fn unproject(
    cursor: Vec2,
    depth: f32,
    view: &Mat4,
    projection: &Mat4,
    viewport: &Viewport,
) -> Option<Vec3> {
    let view_proj = *projection * *view;
    if view_proj.determinant().abs() < f32::EPSILON {
        return None;
    }
    let ndc = viewport.cursor_to_ndc(cursor);
    let world = view_proj.inverse() * Vec4::new(ndc.x, ndc.y, 2.0 * depth - 1.0, 1.0);
    if world.w.abs() < f32::EPSILON {
        return None;
    }
    Some(world.truncate() / world.w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn looking_down_negative_z() -> Camera3D {
        let mut camera = Camera3D::new();
        camera.set_view(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        camera
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = looking_down_negative_z();
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(camera.right().abs_diff_eq(Vec3::X, 1e-6));
        assert!(camera.down().abs_diff_eq(Vec3::NEG_Y, 1e-6));
    }

    #[test]
    fn test_top_down_view_keeps_valid_basis() {
        let mut camera = Camera3D::new();
        camera.set_view(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO);
        assert!(camera.forward().abs_diff_eq(Vec3::NEG_Y, 1e-6));
        assert!(camera.right().abs_diff_eq(Vec3::X, 1e-6));
        assert!(camera.down().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(camera.view_matrix().is_finite());

        let viewport = Viewport::from_size([800.0, 600.0]);
        let center = camera.pick_input(Vec2::new(400.0, 300.0), viewport).ray();
        let offset = camera.pick_input(Vec2::new(600.0, 300.0), viewport).ray();
        assert!(center.direction.abs_diff_eq(Vec3::NEG_Y, 1e-6));
        assert!(offset.direction.x > 0.1);

        let point = Vec3::new(2.0, 0.0, 1.5);
        let proj = camera.projection_matrix(viewport.aspect());
        let screen =
            project(point, &camera.view_matrix(), &proj, &viewport).expect("vor der Kamera");
        let ray = camera.pick_input(screen.truncate(), viewport).ray();
        assert!(ray.direction.abs_diff_eq((point - ray.origin).normalize(), 1e-4));
    }

    #[test]
    fn test_center_pick_ray_follows_forward() {
        let camera = looking_down_negative_z();
        let viewport = Viewport::from_size([800.0, 600.0]);
        let ray = camera.pick_input(Vec2::new(400.0, 300.0), viewport).ray();
        assert!(ray.origin.abs_diff_eq(camera.position, 1e-6));
        assert!(ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_pick_ray_passes_through_projected_point() {
        let camera = looking_down_negative_z();
        let viewport = Viewport::from_size([800.0, 600.0]);
        let view = camera.view_matrix();
        let proj = camera.projection_matrix(viewport.aspect());

        let point = Vec3::new(2.0, 1.5, -3.0);
        let screen = project(point, &view, &proj, &viewport).expect("vor der Kamera");
        let ray = camera.pick_input(screen.truncate(), viewport).ray();

        let to_point = (point - ray.origin).normalize();
        assert!(ray.direction.abs_diff_eq(to_point, 1e-4));
    }

    #[test]
    fn test_project_unproject_roundtrip() {
        let camera = looking_down_negative_z();
        let viewport = Viewport::from_size([1280.0, 720.0]);
        let view = camera.view_matrix();
        let proj = camera.projection_matrix(viewport.aspect());

        let point = Vec3::new(-1.0, 2.0, 1.0);
        let screen = project(point, &view, &proj, &viewport).expect("vor der Kamera");
        assert!(screen.z > 0.0 && screen.z < 1.0);

        let back = unproject(screen.truncate(), screen.z, &view, &proj, &viewport)
            .expect("invertierbar");
        assert!(back.abs_diff_eq(point, 1e-2), "{:?} != {:?}", back, point);
    }

    #[test]
    fn test_orbit_keeps_radius_and_wraps_yaw() {
        let mut camera = Camera3D::new();
        camera.orbit_by_mouse(3.0 * 200.0, 0.0);
        assert_relative_eq!(camera.orbit_yaw_deg(), 20.0, epsilon = 1e-3);

        let horizontal = Vec2::new(camera.position.x, camera.position.z).length();
        assert_relative_eq!(horizontal, CAMERA_ORBIT_RADIUS, epsilon = 1e-3);
        assert!(camera.forward().length() > 0.99);
    }

    #[test]
    fn test_follow_target_converges() {
        let mut camera = Camera3D::new();
        let target = Vec3::new(5.0, 2.0, 5.0);
        for _ in 0..2000 {
            camera.follow_target(target, Vec3::ZERO);
        }
        assert!(camera.position.abs_diff_eq(target, 1e-2));
    }

    #[test]
    fn test_follow_velocity_is_per_camera() {
        let mut moving = Camera3D::new();
        let mut fresh = Camera3D::new();
        for _ in 0..10 {
            moving.follow_target(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO);
        }
        fresh.follow_target(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO);

        let mut reference = Camera3D::new();
        reference.follow_target(Vec3::new(100.0, 0.0, 0.0), Vec3::ZERO);
        assert!(fresh.position.abs_diff_eq(reference.position, 1e-6));
        assert!(moving.position.x > fresh.position.x);
    }

    #[test]
    fn test_camera_mode_cycles() {
        let mode = CameraMode::default();
        assert_eq!(mode, CameraMode::God);
        assert_eq!(mode.next(), CameraMode::FirstPerson);
        assert_eq!(mode.next().next(), CameraMode::ThirdPerson);
        assert_eq!(mode.next().next().next(), CameraMode::God);
    }

    #[test]
    fn test_window_depth_and_unproject_agree() {
        let camera = looking_down_negative_z();
        let viewport = Viewport::from_size([640.0, 480.0]);
        let point = Vec3::new(0.0, 0.0, -5.0);
        let depth = camera.window_depth(point, viewport).expect("vor der Kamera");
        let back = camera
            .unproject(Vec2::new(320.0, 240.0), depth, viewport)
            .expect("invertierbar");
        assert!(back.abs_diff_eq(point, 1e-2));
    }
}
