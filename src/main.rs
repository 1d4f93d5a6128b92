//! Yarn Shooter headless runner
//!
//! Drives a session with a simple autopilot and prints the final snapshot as
//! JSON. Usage: `yarn-shooter [classic|boss|hard] [seed] [ticks]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use yarn_shooter::consts::TICKS_PER_SECOND;
    use yarn_shooter::sim::{GameState, tick};
    use yarn_shooter::{GameMode, ModePreset};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let preset = match args.first() {
        Some(name) => ModePreset::from_str(name).unwrap_or_else(|| {
            log::warn!("Unknown mode '{}', using {}", name, ModePreset::default().as_str());
            ModePreset::default()
        }),
        None => ModePreset::default(),
    };
    let seed = parse_or(args.get(1), 0x5EED_u64, "seed");
    let max_ticks = parse_or(args.get(2), 60 * u64::from(TICKS_PER_SECOND), "ticks");

    log::info!("Yarn Shooter (headless) starting: {} mode", preset.as_str());
    let mut state = GameState::new(GameMode::from_preset(preset), seed);

    let mut last = state.snapshot();
    for _ in 0..max_ticks {
        let input = autopilot::intent(&state);
        last = tick(&mut state, &input);
        for event in &last.events {
            log::debug!("frame {}: {:?}", last.frame, event);
        }
        if last.outcome.is_terminal() {
            break;
        }
    }

    log::info!(
        "Finished after {} frames: score {}, outcome {:?}",
        last.frame,
        last.score,
        last.outcome
    );
    match serde_json::to_string_pretty(&last) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_or(arg: Option<&String>, default: u64, what: &str) -> u64 {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} '{}', using {}", what, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Presentation layers embed the library directly on the web
}

/// Naive pilot: line up under a target, sidestep anything close overhead
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;
    use yarn_shooter::sim::{GameState, TickInput};

    /// Threats inside this box above the ship trigger a sidestep
    const DANGER_WIDTH: f32 = 40.0;
    const DANGER_HEIGHT: f32 = 90.0;

    pub fn intent(state: &GameState) -> TickInput {
        let ship = state.player.pos;

        let target_x = match &state.boss {
            Some(boss) => boss.pos.x,
            None => state
                .mobs
                .iter()
                .min_by(|a, b| {
                    ship.distance_squared(a.pos)
                        .total_cmp(&ship.distance_squared(b.pos))
                })
                .map(|m| m.pos.x)
                .unwrap_or(state.arena.width / 2.0),
        };

        let threats = state
            .enemy_bullets
            .iter()
            .map(|b| b.pos)
            .chain(state.mobs.iter().map(|m| m.pos));
        let danger = nearest_danger(ship, threats);

        let mut input = TickInput {
            fire: true,
            focus: state.boss.is_some(),
            ..Default::default()
        };
        match danger {
            // Step away from the closest threat
            Some(threat) => {
                input.focus = false;
                if threat.x >= ship.x {
                    input.left = true;
                } else {
                    input.right = true;
                }
                input.down = true;
            }
            None => {
                input.left = target_x < ship.x - 4.0;
                input.right = target_x > ship.x + 4.0;
                input.up = ship.y > state.arena.height * 0.75;
            }
        }
        input
    }

    fn nearest_danger(ship: Vec2, threats: impl Iterator<Item = Vec2>) -> Option<Vec2> {
        threats
            .filter(|t| (t.x - ship.x).abs() < DANGER_WIDTH && t.y < ship.y + 10.0 && ship.y - t.y < DANGER_HEIGHT)
            .min_by(|a, b| ship.distance_squared(*a).total_cmp(&ship.distance_squared(*b)))
    }
}
