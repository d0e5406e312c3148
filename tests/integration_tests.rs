// Integration tests for the hangman application
// These tests verify that all modules work together correctly

use hangman::cli::run_plain;
use hangman::session::hard::HardPhase;
use hangman::session::versus::{VersusPhase, VictoryReason};
use hangman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hangman_it_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn bank(words: &str) -> Arc<WordBank> {
    Arc::new(WordBank::parse(Language::English, words).unwrap())
}

fn play_plain(source: Box<dyn WordSource>, input: &str) -> String {
    let mut app = App::new(source, Language::English, ManualClock::new(0));
    let out = run_plain(&mut app, Cursor::new(input.to_string()), Vec::new()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_scenario_a_correct_guesses() {
    let mut session = SessionController::start_with_rng(
        Mode::Normal,
        bank("cat"),
        ManualClock::new(0),
        StdRng::seed_from_u64(1),
    );
    let expected = ["C _ _", "C A _", "C A T"];
    for (c, mask) in ['C', 'A', 'T'].into_iter().zip(expected) {
        assert_eq!(session.on_guess(c), GuessResult::CorrectNew);
        assert_eq!(session.render_model().players[0].display_mask, mask);
    }
    assert_eq!(session.render_model().players[0].outcome, Outcome::Won);
}

#[test]
fn test_scenario_b_six_wrong_guesses() {
    let mut session = SessionController::start_with_rng(
        Mode::Normal,
        bank("dog"),
        ManualClock::new(0),
        StdRng::seed_from_u64(1),
    );
    for c in ['Q', 'W', 'X', 'Z', 'V', 'K'] {
        assert_eq!(session.on_guess(c), GuessResult::WrongNew);
    }
    let player = &session.render_model().players[0];
    assert_eq!(player.outcome, Outcome::Lost);
    assert_eq!(player.wrong_guesses, 6);
    assert!(!session.accepts_guesses());
}

#[test]
fn test_scenario_c_hard_mode_bonus() {
    let clock = ManualClock::new(0);
    let SessionController::Hard(mut hard) = SessionController::start_with_rng(
        Mode::Hard,
        bank("cat"),
        clock.clone(),
        StdRng::seed_from_u64(2),
    ) else {
        panic!("Expected hard mode");
    };
    for c in ['Q', 'W', 'X', 'C', 'A', 'T'] {
        hard.on_guess(c);
    }
    assert_eq!(hard.round().wrong_guesses(), 1);
    assert_eq!(hard.round_time_limit_ms(), 60_000);
    assert!(matches!(hard.phase(), HardPhase::RoundWon { .. }));
}

#[test]
fn test_scenario_d_versus_consolation() {
    let SessionController::Versus(mut versus) = SessionController::start_with_rng(
        Mode::Versus,
        bank("cats"),
        ManualClock::new(0),
        StdRng::seed_from_u64(3),
    ) else {
        panic!("Expected versus mode");
    };
    while versus.player(PlayerId::Two).wrong_guesses() < 5 {
        versus.on_guess('Q');
    }
    assert_eq!(versus.current_turn(), PlayerId::One);
    for c in ['C', 'A', 'T', 'S'] {
        versus.on_guess(c);
    }
    assert_eq!(versus.player(PlayerId::Two).wrong_guesses(), 3);
    assert_eq!(versus.words_won(PlayerId::One), 1);
}

#[test]
fn test_scenario_e_length_fallback() {
    let bank = bank("cat\nhorse\nwolf");
    let mut rng = StdRng::seed_from_u64(4);
    let word = bank.random_word_of_length(99, &mut rng);
    assert!(bank.words().iter().any(|w| w == word));
}

#[test]
fn test_words_dir_file_to_game() {
    let dir = fixture_dir("words_dir");
    fs::write(dir.join("words_en.txt"), "Lamp\n\nlamp\nno way\n").unwrap();

    let source = DirectoryWordSource::new(vec![dir.clone()]);
    let loaded = WordBank::load(&source, Language::English).unwrap();
    assert_eq!(loaded.words(), ["LAMP"]);

    let out = play_plain(Box::new(source), "\nl\na\nm\np\nexit\n");
    assert!(out.contains("Word: L A M P"));
    assert!(out.contains("*** YOU WIN! ***"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_word_file_keeps_menu() {
    let dir = fixture_dir("missing");
    let source = DirectoryWordSource::new(vec![dir.clone()]);
    match SessionController::load(Mode::Normal, &source, Language::Romanian, ManualClock::new(0)) {
        Err(ModeUnavailable {
            mode: Mode::Normal,
            source: LoadError::FileNotFound { file, .. },
        }) => assert_eq!(file, "words_ro.txt"),
        Err(other) => panic!("Unexpected error: {other}"),
        Ok(_) => panic!("Expected the mode to be unavailable"),
    }

    let out = play_plain(Box::new(source), "\n");
    assert!(out.contains("! Normal mode is unavailable"));
    assert!(!out.contains("== NORMAL MODE =="));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_empty_word_file_is_rejected() {
    let dir = fixture_dir("empty");
    fs::write(dir.join("words_en.txt"), "123\n\n  \n").unwrap();
    let source = DirectoryWordSource::new(vec![dir.clone()]);
    assert!(matches!(
        WordBank::load(&source, Language::English),
        Err(LoadError::Empty(Language::English))
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_plain_session_lose_then_replay() {
    let dir = fixture_dir("replay");
    fs::write(dir.join("words_en.txt"), "dog\n").unwrap();
    let source = DirectoryWordSource::new(vec![dir.clone()]);

    let out = play_plain(Box::new(source), "\nqwxzvk\nq\nmenu\nexit\n");
    assert!(out.contains("*** GAME OVER! ***"));
    assert!(out.contains("The word was: DOG"));
    // The key after a loss starts a fresh round instead of guessing.
    assert_eq!(out.matches("Wrong: 0/6").count(), 2);
    assert!(out.contains("== HANGMAN =="));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_hard_mode_full_ladder() {
    let clock = ManualClock::new(0);
    let SessionController::Hard(mut hard) = SessionController::start_with_rng(
        Mode::Hard,
        bank("cat\nwolf\nhorse\nbridge\ncaptain\nelephant\nadventure\nbasketball"),
        clock.clone(),
        StdRng::seed_from_u64(5),
    ) else {
        panic!("Expected hard mode");
    };
    for length in 3..=10 {
        assert_eq!(hard.current_word_length(), length);
        let word = hard.round().target_word().to_string();
        assert_eq!(word.len(), length);
        for c in word.chars() {
            hard.on_guess(c);
        }
        clock.advance(1_500);
        hard.tick();
    }
    assert_eq!(hard.phase(), HardPhase::OverallWon);
    assert_eq!(hard.rounds_won(), 8);
    assert_eq!(hard.round_time_limit_ms(), 40_000 + 8 * 20_000);
    assert!(hard.on_reset_trigger());
    assert_eq!(hard.current_word_length(), 3);
    assert_eq!(hard.round_time_limit_ms(), 40_000);
}

#[test]
fn test_versus_timeout_through_app() {
    let clock = ManualClock::new(0);
    let mut app = App::new(Box::new(EmbeddedWordSource), Language::English, clock.clone());
    app.start_mode(Mode::Versus).unwrap();
    clock.advance(30_000);
    app.tick();

    let Some(SessionController::Versus(versus)) = app.controller() else {
        panic!("Expected versus mode");
    };
    let VersusPhase::GameOver { winner, reason, .. } = versus.phase() else {
        panic!("Expected the session to be over");
    };
    assert_eq!(reason, VictoryReason::OpponentOutOfTime);
    assert_eq!(versus.player(winner).time_left_ms(), Some(30_000));

    // Keys are ignored until the game-over screen has been up long enough.
    app.handle(InputEvent::Char('a'));
    assert!(!app.controller().unwrap().accepts_guesses());
    clock.advance(3_000);
    app.handle(InputEvent::Char('a'));
    assert!(app.controller().unwrap().accepts_guesses());
}

#[test]
fn test_romanian_embedded_bank_covers_all_lengths() {
    let bank = WordBank::load(&EmbeddedWordSource, Language::Romanian).unwrap();
    for length in 3..=10 {
        assert!(bank.words().iter().any(|w| w.len() == length), "no word of length {length}");
    }
}
