use bevy::prelude::*;

pub(super) fn title_color() -> Color {
    Color::srgb_u8(0x2d, 0xd4, 0xbf)
}
pub(super) fn subtitle_color() -> Color {
    Color::srgb_u8(0x94, 0xa3, 0xb8)
}
pub(super) fn hint_color() -> Color {
    Color::srgb_u8(0x47, 0x55, 0x69)
}
pub(super) fn body_color() -> Color {
    Color::srgb_u8(0xe2, 0xe8, 0xf0)
}
pub(super) fn affordable_color() -> Color {
    Color::srgb_u8(0x86, 0xef, 0xac)
}
pub(super) fn unaffordable_color() -> Color {
    Color::srgb_u8(0x64, 0x74, 0x8b)
}
pub(super) fn danger_color() -> Color {
    Color::srgb_u8(0xf8, 0x71, 0x71)
}
pub(super) fn card_bg() -> Color {
    Color::srgb_u8(0x0b, 0x12, 0x20)
}
pub(super) fn card_border() -> Color {
    Color::srgb_u8(0x1e, 0x29, 0x3b)
}
pub(super) fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
pub(super) fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
pub(super) fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}

pub(super) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Text node with the given size and colour.
pub(super) fn label(text: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Dimmed full-screen backdrop that centres a single card over the world.
pub(super) fn backdrop(marker: impl Component) -> impl Bundle {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.78)),
        ZIndex(300),
        marker,
    )
}

/// Bordered column card placed inside a [`backdrop`].
pub(super) fn card(border: Color) -> impl Bundle {
    (
        Node {
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            padding: UiRect::all(Val::Px(36.0)),
            row_gap: Val::Px(10.0),
            border: UiRect::all(Val::Px(2.0)),
            min_width: Val::Px(360.0),
            ..default()
        },
        BackgroundColor(card_bg()),
        BorderColor::all(border),
    )
}
