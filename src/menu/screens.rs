use super::*;

/// Spawn the title screen.
///
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │              VOID PROSPECTOR                │
/// │    Map the belt. Sell the data. Get home.   │
/// │                                             │
/// │   WASD fly · Shift boost · Mouse aim/scan   │
/// │                                             │
/// │           PRESS [SPACE] TO LAUNCH           │
/// │                  [ QUIT ]                   │
/// └─────────────────────────────────────────────┘
/// ```
pub(super) fn setup_main_menu(mut commands: Commands, player: Res<PlayerState>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgb_u8(0x0f, 0x17, 0x2a)),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn(label("VOID PROSPECTOR", 56.0, title_color()));
            spacer(root, 10.0);
            root.spawn(label(
                "Map the belt. Sell the data. Get home.",
                18.0,
                subtitle_color(),
            ));
            spacer(root, 40.0);
            root.spawn(label(
                "WASD / arrows fly  ·  Shift boost  ·  mouse aims, hold left button to scan\n\
                 E docks near the station  ·  wheel zooms",
                14.0,
                body_color(),
            ));
            spacer(root, 24.0);
            if player.total_discoveries > 0 {
                root.spawn(label(
                    format!(
                        "Sector {}  ·  {} CR  ·  {} discoveries",
                        player.sector_level, player.credits, player.total_discoveries
                    ),
                    14.0,
                    subtitle_color(),
                ));
                spacer(root, 16.0);
            }
            root.spawn(label("PRESS [SPACE] TO LAUNCH", 22.0, affordable_color()));
            spacer(root, 24.0);
            root.spawn((
                Button,
                Node {
                    width: Val::Px(180.0),
                    height: Val::Px(44.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(quit_bg()),
                BorderColor::all(quit_border()),
                MenuQuitButton,
            ))
            .with_children(|btn| {
                btn.spawn(label("QUIT", 18.0, quit_text()));
            });
        });
}

/// Tint the Quit label on hover and exit on press.
pub(super) fn quit_button_system(
    query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, children) in query.iter() {
        let color = match interaction {
            Interaction::Pressed => {
                exit.write(AppExit::Success);
                continue;
            }
            Interaction::Hovered => Color::WHITE,
            Interaction::None => quit_text(),
        };
        for child in children.iter() {
            if let Ok(mut text) = btn_text.get_mut(child) {
                *text = TextColor(color);
            }
        }
    }
}

/// Spawn the sector-cleared card showing the bonus the jump will pay.
pub(super) fn setup_sector_cleared(
    mut commands: Commands,
    player: Res<PlayerState>,
    config: Res<GameConfig>,
) {
    let bonus = economy::sector_bonus(&config);
    commands
        .spawn(backdrop(SectorClearedRoot))
        .with_children(|overlay| {
            overlay
                .spawn(card(title_color()))
                .with_children(|card| {
                    card.spawn(label("SECTOR MAPPED", 42.0, title_color()));
                    card.spawn(label(
                        format!(
                            "Sector {}: {} / {} objects scanned",
                            player.sector_level, player.sector_progress, config.objects_per_sector
                        ),
                        16.0,
                        body_color(),
                    ));
                    card.spawn(label(
                        format!("Survey bonus on jump: {bonus} CR"),
                        16.0,
                        affordable_color(),
                    ));
                    spacer(card, 8.0);
                    card.spawn(label(
                        format!("PRESS [SPACE] TO JUMP TO SECTOR {}", player.sector_level + 1),
                        14.0,
                        hint_color(),
                    ));
                });
        });
}

/// Spawn the stranded card: tow offer if affordable, reboot otherwise.
pub(super) fn setup_game_over(
    mut commands: Commands,
    player: Res<PlayerState>,
    config: Res<GameConfig>,
) {
    let tow = tow_line(&player, &config);
    commands
        .spawn(backdrop(GameOverRoot))
        .with_children(|overlay| {
            overlay
                .spawn(card(danger_color()))
                .with_children(|card| {
                    card.spawn(label("SIGNAL LOST", 46.0, danger_color()));
                    card.spawn(label(
                        "Energy cells depleted. The drone is drifting dead.",
                        16.0,
                        subtitle_color(),
                    ));
                    spacer(card, 8.0);
                    card.spawn(label(tow.0, 16.0, tow.1));
                    card.spawn(label(
                        "[R] REBOOT SYSTEM: wipe progress and start over",
                        16.0,
                        body_color(),
                    ));
                });
        });
}

/// Tow prompt text and colour for the current balance.
pub(super) fn tow_line(player: &PlayerState, config: &GameConfig) -> (String, Color) {
    if player.credits >= config.tow_cost {
        (
            format!("[T] REQUEST TOW: {} CR, cargo kept", config.tow_cost),
            affordable_color(),
        )
    } else {
        (
            format!(
                "TOW UNAVAILABLE: {} CR needed, {} CR on account",
                config.tow_cost, player.credits
            ),
            unaffordable_color(),
        )
    }
}
