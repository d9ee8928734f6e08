//! Tests for the synchronous command driver.

use super::support::*;

#[test]
fn move_command_steps_then_ticks_once() {
    let mut game = corridor_game();
    game.start();
    let outcome = game.apply_command(Command::Move(Direction::Right));
    assert_eq!(
        outcome,
        CommandOutcome::Applied { player_pos: Pos::new(2, 1), state: GameState::Running }
    );
    assert_eq!(game.current_tick(), 1);

    let blocked = game.apply_command(Command::Move(Direction::Up));
    assert_eq!(
        blocked,
        CommandOutcome::Applied { player_pos: Pos::new(2, 1), state: GameState::Running }
    );
    assert_eq!(game.current_tick(), 2, "a rejected step still costs a tick");
}

#[test]
fn weapon_switch_notifies_without_ticking() {
    let mut game = corridor_game();
    game.start();
    let recorder = EventRecorder::new();
    game.add_observer(recorder.clone());

    game.apply_command(Command::SwitchWeapon(WeaponKind::Steel));
    assert_eq!(game.player().weapon.kind, WeaponKind::Steel);
    assert_eq!(game.player().weapon.base_damage, 30);
    assert_eq!(game.current_tick(), 0);
    assert_eq!(
        recorder.events(),
        vec![ObserverEvent::Update { tick: 0, state: GameState::Running }]
    );
}

#[test]
fn quit_leaves_state_alone() {
    let mut game = corridor_game();
    game.start();
    let hash = game.snapshot_hash();
    assert_eq!(game.apply_command(Command::Quit), CommandOutcome::Quit);
    assert_eq!(game.snapshot_hash(), hash);
}

#[test]
fn commands_after_the_end_are_ignored() {
    let mut game = corridor_game();
    game.set_player_position(Pos::new(4, 1));
    game.start();
    let outcome = game.apply_command(Command::Move(Direction::Right));
    assert_eq!(
        outcome,
        CommandOutcome::Applied { player_pos: Pos::new(5, 1), state: GameState::Won }
    );

    assert_eq!(game.apply_command(Command::Move(Direction::Left)), CommandOutcome::Ignored);
    assert_eq!(
        game.apply_command(Command::SwitchWeapon(WeaponKind::Steel)),
        CommandOutcome::Ignored
    );
    assert_eq!(game.player().weapon.kind, WeaponKind::Silver);
    assert_eq!(game.apply_command(Command::Quit), CommandOutcome::Quit);
}

#[test]
fn seeded_runs_replay_identically() {
    let script = [
        Command::Move(Direction::Right),
        Command::Move(Direction::Down),
        Command::SwitchWeapon(WeaponKind::Steel),
        Command::Move(Direction::Down),
        Command::Move(Direction::Right),
        Command::Move(Direction::Left),
        Command::Move(Direction::Up),
    ];
    let run = |seed: u64| {
        let mut game = Game::from_map_str(SimConfig::default(), DEFAULT_LEVEL, seed).unwrap();
        game.initialize();
        game.start();
        let mut hashes = Vec::new();
        for _ in 0..4 {
            for command in script {
                game.apply_command(command);
                hashes.push(game.snapshot_hash());
            }
        }
        hashes
    };
    assert_eq!(run(2024), run(2024));
}
