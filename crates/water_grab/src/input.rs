use bevy::prelude::*;

/// Screen position of a mouse click or touch that started this frame.
pub fn just_pressed_screen_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input
            .iter_just_pressed()
            .next()
            .map(|touch| touch.position())
    }
}

pub fn just_pressed_world_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
    camera: &Query<(&Camera, &GlobalTransform)>,
) -> Option<Vec2> {
    let position = just_pressed_screen_position(button_input, touch_input, windows)?;
    let (camera, camera_transform) = camera.get_single().ok()?;

    camera
        .viewport_to_world_2d(camera_transform, position)
        .ok()
}
