use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{
    Backends, PowerPreference, RenderCreation, WgpuSettings, WgpuSettingsPriority,
};
use bevy::window::{PresentMode, WindowMode, WindowResolution};

// Portrait phone ratio (9:16), matches the grid and HUD layout.
const WINDOW_WIDTH: f32 = 360.0;
const WINDOW_HEIGHT: f32 = 640.0;

const CLEAR_COLOR: Color = Color::srgb(0.05, 0.09, 0.16);

/// Bevy app with the window, render and pacing setup shared by native and
/// browser builds.
pub fn get_default_app(title: &str) -> App {
    let mut app = App::new();

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: title.to_owned(),
            present_mode: PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#water-grab".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Keep browser shortcuts such as F5 working.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let render_plugin = RenderPlugin {
        render_creation: RenderCreation::Automatic(WgpuSettings {
            backends: Some(Backends::BROWSER_WEBGPU | Backends::GL),
            power_preference: PowerPreference::LowPower,
            priority: WgpuSettingsPriority::Functionality,
            ..default()
        }),
        ..default()
    };

    app.add_plugins(DefaultPlugins.set(window_plugin).set(render_plugin))
        // Saves battery on phones.
        .add_plugins(bevy_framepace::FramepacePlugin)
        .insert_resource(ClearColor(CLEAR_COLOR));

    #[cfg(target_arch = "wasm32")]
    app.add_systems(PreUpdate, follow_browser_size);

    app
}

/// Keeps the canvas resolution in step with the browser viewport.
#[cfg(target_arch = "wasm32")]
fn follow_browser_size(mut windows: Query<&mut Window, With<bevy::window::PrimaryWindow>>) {
    // WebGPU rejects surfaces larger than this on most devices.
    const MAX_EXTENT: f32 = 2048.0;

    let Some(browser) = web_sys::window() else {
        return;
    };
    let (Ok(width), Ok(height)) = (browser.inner_width(), browser.inner_height()) else {
        return;
    };
    let (Some(width), Some(height)) = (width.as_f64(), height.as_f64()) else {
        return;
    };
    let width = (width as f32).min(MAX_EXTENT);
    let height = (height as f32).min(MAX_EXTENT);

    for mut window in &mut windows {
        if (window.resolution.width() - width).abs() > f32::EPSILON
            || (window.resolution.height() - height).abs() > f32::EPSILON
        {
            window.resolution.set(width, height);
        }
    }
}
