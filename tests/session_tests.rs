//! Session behaviour through the facade: generation, selection, scoring,
//! pause and timeout.

use word_search::core::grid::{fill_empty, Grid};
use word_search::core::placer::place_at;
use word_search::core::{catalog, Outcome, PlacedWord, ScriptedRng, Session, SessionStatus, SimpleRng};
use word_search::types::{Category, Difficulty, Direction, Position};

const T0: u64 = 50_000;

fn gato_board(time_limit: u32) -> Session {
    let mut grid = Grid::new(10);
    let gato = place_at(&mut grid, "GATO", Position::new(2, 2), Direction::Horizontal, 0).unwrap();
    let leon = place_at(&mut grid, "LEON", Position::new(9, 9), Direction::DiagonalUp, 1).unwrap();
    fill_empty(&mut grid, &mut ScriptedRng::new(vec![10, 20, 3]));
    Session::from_parts(Category::Animals, Difficulty::Easy, grid, vec![gato, leon], time_limit, T0).unwrap()
}

fn drag(session: &mut Session, word: &PlacedWord, reversed: bool, now: u64) -> bool {
    let (mut from, mut to) = (word.first().unwrap(), word.last().unwrap());
    if reversed {
        std::mem::swap(&mut from, &mut to);
    }
    session.start_selection(from.row as i32, from.col as i32);
    session.update_selection(to.row as i32, to.col as i32);
    session.end_selection(now).is_some()
}

#[test]
fn test_animals_easy_untimed_board() {
    let mut rng = SimpleRng::new(2024);
    let session = Session::generate(Category::Animals, Difficulty::Easy, 0, &mut rng, T0);
    let state = session.state(T0);

    assert_eq!(state.grid.size(), 10);
    assert_eq!(state.words.len(), 8);
    for word in &state.words {
        assert!(catalog::words(Category::Animals).contains(&word.as_str()), "{word}");
    }
    assert_eq!(state.score, 0);
    assert_eq!(state.progress, 0.0);
    assert_eq!(state.time_limit, 0);
    assert!(state.playable());
}

#[test]
fn test_every_difficulty_fixes_size_and_count() {
    for (seed, difficulty) in Difficulty::ALL.into_iter().enumerate() {
        for category in Category::ALL {
            let mut rng = SimpleRng::new(seed as u32 + 100);
            let s = Session::generate(category, difficulty, 0, &mut rng, 0);
            assert_eq!(s.grid().size(), difficulty.grid_size());
            assert_eq!(s.words().len(), difficulty.word_count());
            assert!(s.grid().cells().all(|c| c.letter.is_some()));
        }
    }
}

#[test]
fn test_placements_agree_with_grid() {
    for seed in 1..20 {
        let mut rng = SimpleRng::new(seed);
        let s = Session::generate(Category::Countries, Difficulty::Hard, 0, &mut rng, 0);
        for (i, p) in s.placed_words().iter().enumerate() {
            assert_eq!(p.id, i);
            assert_eq!(s.words()[i], p.word);
            assert_eq!(s.grid().word_along(&p.positions), p.word);
            for pos in &p.positions {
                assert!(s.grid().at(*pos).unwrap().is_word_part);
            }
        }
        s.validate().unwrap();
    }
}

#[test]
fn test_gato_selection_matches() {
    let mut s = gato_board(0);
    assert!(s.start_selection(2, 2));
    let path = s.update_selection(2, 5).to_vec();
    assert_eq!(path.first(), Some(&Position::new(2, 2)));
    assert_eq!(path.last(), Some(&Position::new(2, 5)));

    let found = s.end_selection(T0 + 500).unwrap();
    assert_eq!(found.placed.word, "GATO");
    assert_eq!(s.found_words(), ["GATO"]);
}

#[test]
fn test_non_ray_update_keeps_prior_path() {
    let mut s = gato_board(0);
    s.start_selection(2, 2);
    let before = s.update_selection(2, 4).to_vec();
    assert_eq!(s.update_selection(4, 3), before.as_slice());
    assert_eq!(s.update_selection(0, 3), before.as_slice());
}

#[test]
fn test_forward_and_reverse_drags_are_equivalent() {
    let mut rng = SimpleRng::new(31337);
    let original = Session::generate(Category::Science, Difficulty::Medium, 0, &mut rng, 0);

    for word in original.placed_words() {
        let mut forward = original.clone();
        let mut backward = original.clone();
        assert!(drag(&mut forward, word, false, 1_000), "{}", word.word);
        assert!(drag(&mut backward, word, true, 1_000), "{}", word.word);
        assert_eq!(forward.score(), backward.score());
        assert_eq!(forward.found_words(), backward.found_words());
    }
}

#[test]
fn test_finding_everything_completes_once() {
    let mut rng = SimpleRng::new(8);
    let mut s = Session::generate(Category::Sports, Difficulty::Easy, 0, &mut rng, 0);
    let words = s.placed_words().to_vec();

    let mut base = 0;
    let mut summaries = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let (from, to) = (word.first().unwrap(), word.last().unwrap());
        s.start_selection(from.row as i32, from.col as i32);
        s.update_selection(to.row as i32, to.col as i32);
        let found = s.end_selection(1_000 * (i as u64 + 1)).unwrap();
        base += found.points;
        summaries.extend(found.summary);
    }

    assert_eq!(summaries.len(), 1);
    let summary = &summaries[0];
    assert_eq!(summary.outcome, Outcome::Completed);
    assert_eq!(summary.completion_bonus, (base as f64 * 0.2).round() as u32);
    assert_eq!(s.score(), base + summary.completion_bonus);
    assert_eq!(summary.found_words, s.found_words());
    assert_eq!(s.status(), SessionStatus::Completed);
    assert_eq!(s.state(99_000).progress, 100.0);

    // Re-dragging a found word does nothing
    assert!(!drag(&mut s, &words[0], false, 100_000));
    assert_eq!(s.score(), base + summary.completion_bonus);
}

#[test]
fn test_timeout_rejects_selection() {
    let mut s = gato_board(60);
    assert!(s.tick(T0 + 30_000).is_none());

    let summary = s.tick(T0 + 60_000).unwrap();
    assert_eq!(summary.outcome, Outcome::TimedOut);
    assert_eq!(s.status(), SessionStatus::TimedOut);
    assert!(!s.start_selection(2, 2));
    assert!(s.state(T0 + 61_000).is_timed_out);
    assert_eq!(s.state(T0 + 90_000).current_time, 60.0);
}

#[test]
fn test_state_is_pure() {
    let s = gato_board(120);
    assert_eq!(s.state(T0 + 7_777), s.state(T0 + 7_777));
}

#[test]
fn test_pause_round_trip_without_gap() {
    let mut s = gato_board(0);
    let before = s.elapsed_ms(T0 + 4_000);
    s.toggle_pause(T0 + 4_000);
    s.toggle_pause(T0 + 4_000);
    assert_eq!(s.elapsed_ms(T0 + 4_000), before);
}

#[test]
fn test_hint_for_reverse_diagonal() {
    let mut s = gato_board(0);
    let hint = s.hint(1).unwrap();
    assert_eq!(hint.word, "LEON");
    assert_eq!(hint.first_letter, Position::new(9, 9));
    assert_eq!(hint.last_letter, Position::new(6, 6));
    assert_eq!(hint.direction, Direction::DiagonalUp);
}
