use dungeon_core::game::pathfinding::find_path;
use dungeon_core::{
    Command, DEFAULT_LEVEL, Direction, EventRecorder, Game, GameState, ObserverEvent,
    PathfindingMode, Pos, SimConfig,
};

fn peaceful_config() -> SimConfig {
    SimConfig {
        initial_monsters: 0,
        initial_humans: 0,
        bonus_rewards: 0,
        traps: 0,
        spawn_interval_ticks: u32::MAX,
        ..SimConfig::default()
    }
}

/// Next step towards the closest remaining regular reward, or the exit once none are left.
fn next_step(game: &Game) -> Option<Direction> {
    let snapshot = game.snapshot();
    let from = snapshot.player.pos;
    let targets: Vec<Pos> = snapshot
        .rewards
        .iter()
        .filter(|reward| reward.ticks_remaining.is_none())
        .map(|reward| reward.pos)
        .collect();
    let goals = if targets.is_empty() { vec![snapshot.exit] } else { targets };
    let path = goals
        .into_iter()
        .filter_map(|goal| find_path(game.board(), from, goal, PathfindingMode::Strict))
        .min_by_key(Vec::len)?;
    Direction::between(from, *path.first()?)
}

#[test]
fn collecting_everything_and_leaving_wins_the_default_level() {
    for seed in [1, 2, 3, 40, 500] {
        let mut game = Game::from_map_str(peaceful_config(), DEFAULT_LEVEL, seed).unwrap();
        let recorder = EventRecorder::new();
        game.add_observer(recorder.clone());
        game.initialize();
        game.start();

        for _ in 0..1000 {
            if game.is_game_over() {
                break;
            }
            let step = next_step(&game).expect("every floor cell is reachable");
            game.apply_command(Command::Move(step));
        }

        assert_eq!(game.game_state(), GameState::Won, "seed {seed} did not win");
        assert_eq!(game.collected_rewards(), 5);
        assert_eq!(game.score(), 5 * 100 + 500);
        let endings = recorder
            .events()
            .into_iter()
            .filter(|event| matches!(event, ObserverEvent::GameEnd { .. }))
            .count();
        assert_eq!(endings, 1);
    }
}

#[test]
fn standing_still_among_enemies_eventually_loses() {
    let config =
        SimConfig { max_active_enemies: 8, spawn_interval_ticks: 2, ..SimConfig::default() };
    let mut game = Game::from_map_str(config, DEFAULT_LEVEL, 9).unwrap();
    game.initialize();
    game.start();
    for _ in 0..5000 {
        if game.is_game_over() {
            break;
        }
        game.tick();
    }
    assert_eq!(game.game_state(), GameState::Lost);
    assert_eq!(game.player().hp, 0);
}
