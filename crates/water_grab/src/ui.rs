use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::difficulty::Difficulty;
use crate::game::Control;
use crate::session::{FeedbackStyle, Session};

const BUTTON_NORMAL: Color = Color::srgb(0.15, 0.2, 0.3);
const BUTTON_SELECTED: Color = Color::srgb(0.1, 0.45, 0.75);
const BUTTON_FRAME: Color = Color::srgb(0.5, 0.5, 0.5);

const NEUTRAL_COLOR: Color = Color::WHITE;
const WIN_COLOR: Color = Color::srgb(0.2, 0.9, 0.3);
const LOSE_COLOR: Color = Color::srgb(1., 0.3, 0.25);

#[derive(Resource, Default)]
pub struct ScoreUI {
    score: u32,
    goal: u32,
    is_dirty: bool,
}

impl ScoreUI {
    pub fn update(&mut self, new_score: u32) {
        self.score = new_score;
        self.is_dirty = true;
    }

    pub fn set_goal(&mut self, new_goal: u32) {
        self.goal = new_goal;
        self.is_dirty = true;
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn goal(&self) -> u32 {
        self.goal
    }
}

#[derive(Resource, Default)]
pub struct TimeUI {
    seconds: u32,
    is_dirty: bool,
}

impl TimeUI {
    pub fn update(&mut self, new_seconds: u32) {
        self.seconds = new_seconds;
        self.is_dirty = true;
    }

    pub const fn seconds(&self) -> u32 {
        self.seconds
    }
}

/// Short message under the grid. Empty text hides it.
#[derive(Resource, Default)]
pub struct FeedbackUI {
    text: String,
    style: FeedbackStyle,
    is_dirty: bool,
}

impl FeedbackUI {
    pub fn update(&mut self, new_text: &str, new_style: FeedbackStyle) {
        new_text.clone_into(&mut self.text);
        self.style = new_style;
        self.is_dirty = true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.style = FeedbackStyle::Neutral;
        self.is_dirty = true;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> FeedbackStyle {
        self.style
    }
}

#[derive(Resource, Default)]
pub struct ControlsUI {
    start_visible: bool,
    reset_visible: bool,
    is_dirty: bool,
}

impl ControlsUI {
    pub fn set_visibility(&mut self, start_visible: bool, reset_visible: bool) {
        self.start_visible = start_visible;
        self.reset_visible = reset_visible;
        self.is_dirty = true;
    }

    pub const fn start_visible(&self) -> bool {
        self.start_visible
    }

    pub const fn reset_visible(&self) -> bool {
        self.reset_visible
    }
}

#[derive(Component)]
struct ScoreText;

#[derive(Component)]
struct TimeText;

#[derive(Component)]
struct FeedbackText;

#[derive(Component, Clone, Copy)]
struct ControlButton(Control);

/// HUD text and buttons. The sink resources themselves are registered by
/// [`crate::game::CorePlugin`].
pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup).add_systems(
            Update,
            (
                button_system,
                highlight_difficulty,
                update_score,
                update_time,
                update_feedback,
                update_controls,
            ),
        );
    }
}

fn setup(mut commands: Commands) {
    let button = |control: Control| {
        (
            Button,
            Node {
                min_width: Val::Px(84.0),
                height: Val::Px(40.0),
                margin: UiRect::all(Val::Px(4.0)),
                border: UiRect::all(Val::Px(2.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BorderColor(BUTTON_FRAME),
            BorderRadius::all(Val::Px(8.0)),
            BackgroundColor(BUTTON_NORMAL),
            ControlButton(control),
        )
    };
    let label = |text: &str| {
        (
            Text::new(text),
            TextFont {
                font_size: 20.0,
                ..default()
            },
        )
    };

    commands
        .spawn(Node {
            width: Val::Percent(100.),
            height: Val::Percent(100.),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            padding: UiRect::all(Val::Px(8.)),
            ..default()
        })
        .with_children(|parent| {
            parent
                .spawn(Node {
                    justify_content: JustifyContent::SpaceBetween,
                    ..default()
                })
                .with_children(|parent| {
                    parent.spawn((Text::new(""), ScoreText));
                    parent.spawn((Text::new(""), TimeText));
                });

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|parent| {
                    parent.spawn((
                        Node {
                            margin: UiRect::bottom(Val::Px(8.)),
                            ..default()
                        },
                        Text::new(""),
                        TextColor(NEUTRAL_COLOR),
                        TextLayout::new_with_justify(JustifyText::Center),
                        FeedbackText,
                    ));

                    parent.spawn(Node::default()).with_children(|parent| {
                        parent
                            .spawn((button(Control::Start), Visibility::Hidden))
                            .with_child(label("Start"));
                        parent
                            .spawn((button(Control::Reset), Visibility::Hidden))
                            .with_child(label("Reset"));
                    });

                    parent.spawn(Node::default()).with_children(|parent| {
                        for difficulty in Difficulty::iter() {
                            parent
                                .spawn(button(Control::Select(difficulty)))
                                .with_child(label(&difficulty.to_string()));
                        }
                    });
                });
        });
}

fn button_system(
    interaction_query: Query<(&Interaction, &ControlButton), (Changed<Interaction>, With<Button>)>,
    mut controls: EventWriter<Control>,
) {
    for (interaction, button) in &interaction_query {
        if *interaction == Interaction::Pressed {
            controls.send(button.0);
        }
    }
}

fn highlight_difficulty(
    session: Res<Session>,
    mut query: Query<(&ControlButton, &mut BackgroundColor)>,
) {
    if !session.is_changed() {
        return;
    }
    for (button, mut background) in &mut query {
        if let Control::Select(difficulty) = button.0 {
            *background = if difficulty == session.difficulty() {
                BackgroundColor(BUTTON_SELECTED)
            } else {
                BackgroundColor(BUTTON_NORMAL)
            };
        }
    }
}

fn update_score(mut score: ResMut<ScoreUI>, mut query: Query<&mut Text, With<ScoreText>>) {
    if score.is_dirty {
        for mut text in &mut query {
            *text = Text::new(format!("CANS {:02} / {:02}", score.score, score.goal));
        }
        score.is_dirty = false;
    }
}

fn update_time(mut time: ResMut<TimeUI>, mut query: Query<&mut Text, With<TimeText>>) {
    if time.is_dirty {
        for mut text in &mut query {
            *text = Text::new(format!("TIME {:02}", time.seconds));
        }
        time.is_dirty = false;
    }
}

fn update_feedback(
    mut feedback: ResMut<FeedbackUI>,
    mut query: Query<(&mut Text, &mut TextColor), With<FeedbackText>>,
) {
    if feedback.is_dirty {
        let color = match feedback.style {
            FeedbackStyle::Neutral => NEUTRAL_COLOR,
            FeedbackStyle::Win => WIN_COLOR,
            FeedbackStyle::Lose => LOSE_COLOR,
        };
        for (mut text, mut text_color) in &mut query {
            *text = Text::new(feedback.text.clone());
            *text_color = TextColor(color);
        }
        feedback.is_dirty = false;
    }
}

fn update_controls(
    mut controls: ResMut<ControlsUI>,
    mut query: Query<(&ControlButton, &mut Visibility)>,
) {
    if controls.is_dirty {
        let shown = |visible: bool| {
            if visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            }
        };
        for (button, mut visibility) in &mut query {
            match button.0 {
                Control::Start => *visibility = shown(controls.start_visible),
                Control::Reset => *visibility = shown(controls.reset_visible),
                Control::Select(_) => (),
            }
        }
        controls.is_dirty = false;
    }
}
