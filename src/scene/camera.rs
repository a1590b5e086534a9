use bevy::prelude::*;

/// Camera that circles `target` at a fixed radius and height.
///
/// The eye position is a pure function of elapsed time, so the path does not
/// depend on frame rate.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub radius: f32,
    pub height: f32,
    /// Radians per second.
    pub angular_rate: f32,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: 300.,
            height: 100.,
            angular_rate: 0.5,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl OrbitCamera {
    pub fn eye_at(&self, elapsed: f32) -> Vec3 {
        let angle = elapsed * self.angular_rate;
        Vec3::new(
            angle.sin() * self.radius,
            self.height,
            angle.cos() * self.radius,
        )
    }

    pub fn view_at(&self, elapsed: f32) -> Transform {
        Transform::from_translation(self.eye_at(elapsed)).looking_at(self.target, self.up)
    }

    /// World-to-view matrix for the eye at `elapsed`.
    pub fn view_matrix(&self, elapsed: f32) -> Mat4 {
        Mat4::look_at_rh(self.eye_at(elapsed), self.target, self.up)
    }
}

pub fn orbit_camera(time: Res<Time>, mut cameras: Query<(&OrbitCamera, &mut Transform)>) {
    let elapsed = time.elapsed_seconds();
    for (orbit, mut transform) in &mut cameras {
        *transform = orbit.view_at(elapsed);
    }
}
