//! Player controller: intent in, movement and fire requests out

use glam::Vec2;

use super::state::{Arena, GameState, Player};
use super::tick::TickInput;
use crate::consts::MUZZLE_OFFSET;

/// Apply one tick of movement and cooldown.
///
/// Axes move independently, so diagonals run at full speed on both axes.
/// A direction is ignored once the ship is already at the inset boundary on
/// that side. Returns the muzzle position when a shot is fired.
pub fn steer(
    player: &mut Player,
    input: &TickInput,
    arena: &Arena,
    edge_margin: f32,
    fire_cooldown: u32,
) -> Option<Vec2> {
    let speed = if input.focus {
        player.focus_speed
    } else {
        player.speed
    };

    if input.left && player.pos.x > edge_margin {
        player.pos.x -= speed;
    }
    if input.right && player.pos.x < arena.width - edge_margin {
        player.pos.x += speed;
    }
    if input.up && player.pos.y > edge_margin {
        player.pos.y -= speed;
    }
    if input.down && player.pos.y < arena.height - edge_margin {
        player.pos.y += speed;
    }

    let mut shot = None;
    if input.fire && player.cooldown == 0 {
        shot = Some(player.pos - Vec2::new(0.0, MUZZLE_OFFSET));
        player.cooldown = fire_cooldown;
    }
    player.cooldown = player.cooldown.saturating_sub(1);

    shot
}

/// Run the player controller against the session
pub fn run(state: &mut GameState, input: &TickInput) {
    let tuning = &state.mode.player;
    let shot = steer(
        &mut state.player,
        input,
        &state.arena,
        tuning.edge_margin,
        tuning.fire_cooldown,
    );
    if let Some(muzzle) = shot {
        state.spawn_player_bullet(muzzle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{GameMode, ModePreset};

    fn classic_player() -> (Player, Arena) {
        let mode = GameMode::from_preset(ModePreset::Classic);
        let arena = Arena::new(mode.arena_width, mode.arena_height);
        (Player::spawn(&mode, &arena), arena)
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let (mut player, arena) = classic_player();
        let start = player.pos;
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        steer(&mut player, &input, &arena, 30.0, 10);
        assert_eq!(player.pos, start + Vec2::new(-7.0, -7.0));
    }

    #[test]
    fn test_focus_slows_movement() {
        let mode = GameMode::from_preset(ModePreset::Boss);
        let arena = Arena::new(mode.arena_width, mode.arena_height);
        let mut player = Player::spawn(&mode, &arena);
        let start = player.pos;
        let input = TickInput {
            right: true,
            focus: true,
            ..Default::default()
        };
        steer(&mut player, &input, &arena, 20.0, 5);
        assert_eq!(player.pos, start + Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_movement_stops_at_inset_boundary() {
        let (mut player, arena) = classic_player();
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            steer(&mut player, &input, &arena, 30.0, 10);
        }
        // Last step may start just inside the margin and overshoot by less than one step
        assert!(player.pos.x <= 30.0);
        assert!(player.pos.x > 30.0 - 7.0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let (mut player, arena) = classic_player();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        let shots: Vec<bool> = (0..21)
            .map(|_| steer(&mut player, &input, &arena, 30.0, 10).is_some())
            .collect();
        let fired_at: Vec<usize> = shots
            .iter()
            .enumerate()
            .filter_map(|(i, &s)| s.then_some(i))
            .collect();
        assert_eq!(fired_at, vec![0, 10, 20]);
    }

    #[test]
    fn test_cooldown_runs_down_without_fire() {
        let (mut player, arena) = classic_player();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let idle = TickInput::default();
        assert!(steer(&mut player, &fire, &arena, 30.0, 10).is_some());
        for _ in 0..9 {
            steer(&mut player, &idle, &arena, 30.0, 10);
        }
        assert_eq!(player.cooldown, 0);
        let muzzle = steer(&mut player, &fire, &arena, 30.0, 10);
        assert_eq!(muzzle, Some(player.pos - Vec2::new(0.0, MUZZLE_OFFSET)));
    }
}
