use bevy::{app::AppExit, prelude::*};

/// Free-fly eye driven by W/A/S/D.
///
/// Nothing reads this when rendering: the view always comes from the
/// [`OrbitCamera`](super::camera::OrbitCamera).
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct FreeFlyEye {
    pub eye: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    /// Distance moved per held key per frame.
    pub step: f32,
}

impl Default for FreeFlyEye {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0., 0., 3.),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            step: 0.5,
        }
    }
}

impl FreeFlyEye {
    pub fn right(&self) -> Vec3 {
        self.front.cross(self.up).normalize()
    }
}

pub fn free_fly_input(keys: Res<Input<KeyCode>>, mut free_fly: ResMut<FreeFlyEye>) {
    let FreeFlyEye { front, step, .. } = *free_fly;
    let right = free_fly.right();

    if keys.pressed(KeyCode::W) {
        free_fly.eye += step * front;
    }
    if keys.pressed(KeyCode::A) {
        free_fly.eye -= step * right;
    }
    if keys.pressed(KeyCode::S) {
        free_fly.eye -= step * front;
    }
    if keys.pressed(KeyCode::D) {
        free_fly.eye += step * right;
    }
}

pub fn exit_on_escape(keys: Res<Input<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.pressed(KeyCode::Escape) {
        info!("Escape pressed, exiting");
        exit.send(AppExit);
    }
}
