use super::*;

/// Spawn the station card: summary line, six priced upgrade rows, key hints.
///
/// The rows are created empty and filled by [`refresh_station_system`] on its
/// first run, so spawning and re-pricing share one formatter.
pub(super) fn setup_station(mut commands: Commands) {
    commands
        .spawn(backdrop(StationRoot))
        .with_children(|overlay| {
            overlay
                .spawn(card(card_border()))
                .with_children(|card| {
                    card.spawn(label("ORBITAL STATION", 40.0, title_color()));
                    card.spawn((label("", 16.0, body_color()), StationSummaryText));
                    spacer(card, 8.0);
                    for index in 0..UpgradeKind::ALL.len() {
                        card.spawn((label("", 15.0, body_color()), StationUpgradeText(index)));
                    }
                    spacer(card, 8.0);
                    card.spawn(label(
                        "[ENTER] sell cargo  ·  [1-6] buy upgrade  ·  [SPACE] launch",
                        13.0,
                        hint_color(),
                    ));
                });
        });
}

/// Credits, cargo and energy summary.
pub(super) fn summary_line(player: &PlayerState, config: &GameConfig) -> String {
    format!(
        "{} CR  ·  cargo {}/{} worth {} CR  ·  energy {:.0}/{:.0}",
        player.credits,
        player.scanned_items.len(),
        player.max_cargo(config),
        player.cargo_value(),
        player.energy,
        player.max_energy,
    )
}

/// One upgrade row: key, name, current level and next price.
pub(super) fn upgrade_line(player: &PlayerState, index: usize, kind: UpgradeKind) -> String {
    format!(
        "[{}] {:<20} LV {:<3} {:>8} CR",
        index + 1,
        kind.label(),
        player.upgrades.level(kind),
        economy::next_cost(player, kind),
    )
}

pub(super) fn refresh_station_system(
    player: Res<PlayerState>,
    config: Res<GameConfig>,
    mut summary: Query<&mut Text, (With<StationSummaryText>, Without<StationUpgradeText>)>,
    mut rows: Query<(&mut Text, &mut TextColor, &StationUpgradeText), Without<StationSummaryText>>,
    added: Query<(), Added<StationUpgradeText>>,
) {
    if !player.is_changed() && added.is_empty() {
        return;
    }
    for mut text in summary.iter_mut() {
        *text = Text::new(summary_line(&player, &config));
    }
    for (mut text, mut color, row) in rows.iter_mut() {
        let Some(kind) = UpgradeKind::ALL.get(row.0).copied() else {
            continue;
        };
        *text = Text::new(upgrade_line(&player, row.0, kind));
        *color = TextColor(if economy::can_afford(&player, kind) {
            affordable_color()
        } else {
            unaffordable_color()
        });
    }
}
