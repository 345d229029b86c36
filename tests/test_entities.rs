use space_invaders::entities::*;

#[test]
fn rect_edges() {
    let r = Rect::new(100, 50, 40, 30);
    assert_eq!(r.left(), 100);
    assert_eq!(r.right(), 140);
    assert_eq!(r.top(), 50);
    assert_eq!(r.bottom(), 80);
    assert_eq!(r.center_x(), 120);
}

#[test]
fn only_running_is_not_terminal() {
    assert!(!GameStatus::Running.is_terminal());
    assert!(GameStatus::PlayerWon.is_terminal());
    assert!(GameStatus::PlayerLost.is_terminal());
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player { rect: Rect::new(375, 500, 50, 50), alive: true },
        enemies: Vec::new(),
        barriers: Vec::new(),
        player_bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        direction: Direction::Right,
        since_enemy_shot_ms: 0,
        score: 0,
        status: GameStatus::Running,
        frame: 0,
        width: 800,
        height: 600,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99;
    cloned.score = 999;
    cloned.enemies.push(Enemy {
        rect: Rect::new(5, 5, 40, 40),
        alive: true,
        variant: 0,
        removal_ticks: 0,
    });

    assert_eq!(original.player.rect.x, 375);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
    assert_eq!(original.alive_enemies().count(), 0);
    assert_eq!(cloned.alive_enemies().count(), 1);
}
