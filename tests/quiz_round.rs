use portfolio::events::Cue;
use portfolio::jokes::source::parse_jokes;
use portfolio::jokes::JokeSession;
use portfolio::quiz::arithmetic::Difficulty;
use portfolio::quiz::leaderboard::Leaderboard;
use portfolio::quiz::{Grade, QuizEvent, QuizScreen, QuizSession, QUESTIONS_PER_QUIZ};
use portfolio::sound::SoundCue;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Cursor;

#[test]
fn full_quiz_lands_on_leaderboard() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("leaderboard.json");

    let mut session = QuizSession::with_rng(Difficulty::Easy, StdRng::seed_from_u64(2024));
    let mut cues = Vec::new();

    // 7 right first time, 1 right second time, 1 wrong twice, 1 timeout: 75
    for question in 1..=QUESTIONS_PER_QUIZ {
        let answer = session.question().answer();
        match question {
            1..=7 => {
                session.submit_answer(&answer.to_string()).unwrap();
            }
            8 => {
                session.submit_answer(&(answer - 1).to_string()).unwrap();
                session.submit_answer(&answer.to_string()).unwrap();
            }
            9 => {
                session.submit_answer(&(answer + 2).to_string()).unwrap();
                session.submit_answer(&(answer + 3).to_string()).unwrap();
            }
            _ => {
                let handle = session.timer_handle().unwrap();
                while !session.is_completed() {
                    session.on_tick(handle);
                }
            }
        }
        cues.extend(session.drain_events().iter().filter_map(|e| e.sound_cue()));
    }

    assert_eq!(session.score(), 75);
    assert_eq!(session.grade(), Some(Grade::B));
    assert_eq!(cues.iter().filter(|c| **c == SoundCue::Correct).count(), 8);
    assert_eq!(cues.iter().filter(|c| **c == SoundCue::Wrong).count(), 3);
    assert_eq!(cues.iter().filter(|c| **c == SoundCue::Timeout).count(), 1);
    assert_eq!(cues.last(), Some(&SoundCue::Start));

    let mut board = Leaderboard::open(&path);
    assert_eq!(board.record("Alice", 70).unwrap(), Some(1));
    assert_eq!(board.record("Player", session.score()).unwrap(), Some(1));
    assert_eq!(Leaderboard::open(&path).entries()[0].name, "Player");
}

#[test]
fn results_screen_is_last_event() {
    let mut session = QuizSession::with_rng(Difficulty::Advanced, StdRng::seed_from_u64(5));
    for _ in 0..QUESTIONS_PER_QUIZ {
        session.on_timeout().unwrap();
    }
    let events = session.drain_events();
    assert_eq!(
        events.last(),
        Some(&QuizEvent::ScreenEntered(QuizScreen::Results))
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, QuizEvent::ScreenEntered(QuizScreen::Question(_))))
            .count(),
        QUESTIONS_PER_QUIZ as usize
    );
}

#[test]
fn parsed_source_feeds_joke_session() {
    let source = "- no punchline here\n- Why did the scarecrow win an award? He was outstanding in his field.\n";
    let jokes = parse_jokes(Cursor::new(source));
    assert_eq!(jokes.len(), 1);

    let mut session = JokeSession::with_rng(jokes, StdRng::seed_from_u64(1));
    let joke = session.tell_joke().unwrap().clone();
    assert_eq!(joke.setup, "Why did the scarecrow win an award?");
    assert_eq!(
        session.show_punchline(),
        Some("He was outstanding in his field.")
    );
    assert_eq!(session.show_punchline(), None);
}
