//! Integration tests for the game controller and its command surface

use word_search::core::SimpleRng;
use word_search::engine::{Clock, Game, GameResponse, ManualClock};
use word_search::types::{Category, Difficulty, GameCommand};

fn game(seed: u32) -> (Game<SimpleRng, ManualClock>, ManualClock) {
    let clock = ManualClock::new(0);
    (Game::new(SimpleRng::new(seed), clock.clone()), clock)
}

fn command(json: &str) -> GameCommand {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_json_commands_drive_a_whole_game() {
    let (mut g, clock) = game(4242);

    let GameResponse::Board(board) =
        g.dispatch(command(r#"{"type":"newGame","category":"animals","difficulty":"easy","timeLimit":0}"#))
    else {
        panic!("expected board");
    };
    assert_eq!(board.size, 10);

    let placed = g.session().unwrap().placed_words().to_vec();
    for word in &placed {
        clock.advance(2_000);
        let (a, b) = (word.first().unwrap(), word.last().unwrap());
        let start = format!(r#"{{"type":"startSelection","row":{},"col":{}}}"#, b.row, b.col);
        let update = format!(r#"{{"type":"updateSelection","row":{},"col":{}}}"#, a.row, a.col);

        assert_eq!(g.dispatch(command(&start)), GameResponse::SelectionStarted { accepted: true });
        g.dispatch(command(&update));
        let GameResponse::SelectionEnded { found: Some(found) } = g.dispatch(command(r#"{"type":"endSelection"}"#))
        else {
            panic!("expected {} to be found", word.word);
        };
        assert_eq!(found.placed.word, word.word);
    }

    let GameResponse::State { state: Some(state) } = g.dispatch(command(r#"{"type":"getState"}"#)) else {
        panic!("expected state");
    };
    assert!(state.is_completed);
    assert_eq!(state.progress, 100.0);
    assert_eq!(state.current_time, 2.0 * placed.len() as f64);
}

#[test]
fn test_state_json_shape() {
    let (mut g, _) = game(1);
    g.initialize_game(Category::Countries, Difficulty::Medium, 120);
    let json = serde_json::to_value(g.dispatch(GameCommand::GetState)).unwrap();

    assert_eq!(json["type"], "state");
    let state = &json["state"];
    for key in [
        "grid", "words", "foundWords", "score", "category", "difficulty", "isCompleted", "isPaused",
        "timeLimit", "currentTime", "progress",
    ] {
        assert!(state.get(key).is_some(), "missing {key}");
    }
    assert_eq!(state["grid"].as_array().unwrap().len(), 12);
    assert_eq!(state["grid"][0][0]["row"], 0);
    assert_eq!(state["difficulty"], "medium");
}

#[test]
fn test_seed_reproduces_board() {
    let (mut a, _) = game(77);
    let (mut b, _) = game(77);
    let (mut c, _) = game(78);

    let board_a = a.initialize_game(Category::Science, Difficulty::Hard, 0);
    let board_b = b.initialize_game(Category::Science, Difficulty::Hard, 0);
    let board_c = c.initialize_game(Category::Science, Difficulty::Hard, 0);
    assert_eq!(board_a, board_b);
    assert_ne!(board_a.grid, board_c.grid);
}

#[test]
fn test_timeout_through_ticks() {
    let (mut g, clock) = game(3);
    g.initialize_game(Category::Sports, Difficulty::Easy, 60);

    let mut summary = None;
    while summary.is_none() && clock.now_ms() < 120_000 {
        clock.advance(100);
        summary = g.tick();
    }
    let summary = summary.unwrap();
    assert!(!summary.completed());
    assert_eq!(clock.now_ms(), 60_000);
    assert!(!g.start_selection(0, 0));
    assert!(g.tick().is_none());
}

#[test]
fn test_pause_then_resume_keeps_timer_honest() {
    let (mut g, clock) = game(3);
    g.initialize_game(Category::Sports, Difficulty::Easy, 60);

    clock.advance(50_000);
    assert!(g.toggle_pause());
    clock.advance(600_000);
    assert!(g.tick().is_none());
    assert!(!g.toggle_pause());

    clock.advance(9_900);
    assert!(g.tick().is_none());
    clock.advance(100);
    assert!(g.tick().is_some());
}

#[test]
fn test_reset_then_commands_are_noops() {
    let (mut g, _) = game(3);
    g.initialize_game(Category::Animals, Difficulty::Easy, 0);
    g.dispatch(GameCommand::Reset);

    assert_eq!(g.dispatch(GameCommand::GetState), GameResponse::State { state: None });
    assert_eq!(
        g.dispatch(GameCommand::StartSelection { row: 0, col: 0 }),
        GameResponse::SelectionStarted { accepted: false }
    );
    assert_eq!(g.dispatch(GameCommand::GetHint { index: 0 }), GameResponse::Hint { hint: None });
}
