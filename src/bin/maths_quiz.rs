use std::io::Write;
use std::time::Duration;

use portfolio::config::Config;
use portfolio::quiz::arithmetic::Difficulty;
use portfolio::quiz::leaderboard::{Leaderboard, LeaderboardError};
use portfolio::quiz::{
    Grade, Outcome, QuizError, QuizEvent, QuizScreen, QuizSession, MAX_SCORE, QUESTIONS_PER_QUIZ,
};
use portfolio::sound::{self, SoundPlayer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, MissedTickBehavior};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

enum State {
    Welcome,
    Menu,
    Quiz(QuizSession),
    ReceiveName { score: u32, grade: Grade },
    Results,
    Leaderboard,
}

struct App {
    state: State,
    leaderboard: Leaderboard,
    sounds: Box<dyn SoundPlayer>,
    running: bool,
    /// Set when a new question appears so the ticker starts a full second.
    restart_clock: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> HandlerResult {
    pretty_env_logger::init();
    let config = Config::from_env();
    log::info!("Starting maths quiz...");

    let mut app = App {
        state: State::Welcome,
        leaderboard: Leaderboard::open(&config.leaderboard_path),
        sounds: sound::open_player(&config.sound_dir, config.sound_enabled),
        running: true,
        restart_clock: false,
    };
    app.show_welcome();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while app.running {
        if app.restart_clock {
            app.restart_clock = false;
            ticker.reset();
        }
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => app.on_input(&line)?,
                None => break,
            },
            _ = ticker.tick() => app.on_tick(),
        }
    }

    println!("Goodbye!");
    log::info!("maths quiz closed");
    Ok(())
}

const WELCOME_TEXT: &str = "Test your math skills with this fun arithmetic quiz!
  * 10 challenging questions
  * Multiple difficulty levels
  * Timer-based challenges
  * Leaderboard tracking
  * Instant feedback
Are you ready to become a math champion?";

impl App {
    fn on_input(&mut self, line: &str) -> HandlerResult {
        let input = line.trim();
        let state = std::mem::replace(&mut self.state, State::Welcome);
        match state {
            State::Welcome => self.receive_start(input),
            State::Menu => self.receive_menu_choice(input),
            State::Quiz(session) => self.receive_answer(session, input),
            State::ReceiveName { score, grade } => self.receive_name(score, grade, input),
            State::Results => self.receive_results_choice(input),
            State::Leaderboard => {
                self.show_menu();
                Ok(())
            }
        }
    }

    fn on_tick(&mut self) {
        if let State::Quiz(session) = &mut self.state {
            if let Some(handle) = session.timer_handle() {
                session.on_tick(handle);
            }
        }
        self.pump_quiz();
    }

    fn show_welcome(&mut self) {
        self.announce(QuizEvent::ScreenEntered(QuizScreen::Welcome));
        println!("\n=== WELCOME TO ARITHMETIC QUIZ ===\n{}", WELCOME_TEXT);
        prompt("Press Enter to start (q to quit)");
        self.state = State::Welcome;
    }

    fn receive_start(&mut self, input: &str) -> HandlerResult {
        if is_quit(input) {
            self.running = false;
        } else {
            self.show_menu();
        }
        Ok(())
    }

    fn show_menu(&mut self) {
        self.announce(QuizEvent::ScreenEntered(QuizScreen::Menu));
        println!("\n=== ARITHMETIC QUIZ ===\nSelect Difficulty Level");
        for (number, difficulty) in Difficulty::ALL.iter().enumerate() {
            println!("  {}. {}", number + 1, difficulty.label());
        }
        println!("  l. View Leaderboard\n  b. Back to Welcome\n  q. Quit");
        prompt("Your choice");
        self.state = State::Menu;
    }

    fn receive_menu_choice(&mut self, input: &str) -> HandlerResult {
        match input.to_ascii_lowercase().as_str() {
            "1" | "easy" => self.start_quiz(Difficulty::Easy),
            "2" | "moderate" => self.start_quiz(Difficulty::Moderate),
            "3" | "advanced" => self.start_quiz(Difficulty::Advanced),
            "l" | "4" => self.show_leaderboard(),
            "b" => self.show_welcome(),
            "q" => self.running = false,
            _ => {
                println!("Please choose one of the options.");
                prompt("Your choice");
                self.state = State::Menu;
            }
        }
        Ok(())
    }

    fn start_quiz(&mut self, difficulty: Difficulty) {
        self.state = State::Quiz(QuizSession::start(difficulty));
        self.pump_quiz();
    }

    fn receive_answer(&mut self, mut session: QuizSession, input: &str) -> HandlerResult {
        if is_quit(input) {
            log::info!("quiz abandoned at question {}", session.question_index());
            self.show_menu();
            return Ok(());
        }
        match session.submit_answer(input) {
            Ok(Outcome::Correct { .. } | Outcome::TryAgain | Outcome::Revealed { .. }) => {}
            Err(QuizError::InvalidInput(_)) => {
                println!("Please enter a number.");
                prompt("Answer");
            }
            Err(err @ QuizError::Finished) => log::warn!("{}", err),
        }
        self.state = State::Quiz(session);
        self.pump_quiz();
        Ok(())
    }

    /// Renders whatever the running quiz emitted and leaves the quiz once it
    /// is over.
    fn pump_quiz(&mut self) {
        let State::Quiz(session) = &mut self.state else {
            return;
        };
        for event in session.drain_events() {
            sound::play_event(self.sounds.as_ref(), &event);
            match event {
                QuizEvent::ScreenEntered(QuizScreen::Question(number)) => {
                    self.restart_clock = true;
                    println!(
                        "\nQuestion {}/{} {}\nTime Left: {}s\n\n    {}",
                        number,
                        QUESTIONS_PER_QUIZ,
                        progress_bar(number - 1),
                        session.time_remaining(),
                        session.question()
                    );
                    prompt("Answer");
                }
                QuizEvent::Tick { remaining } if remaining <= 3 || remaining == 5 => {
                    println!("Time Left: {}s", remaining);
                }
                QuizEvent::AnswerCorrect { points } => {
                    println!("Correct! (+{} points)", points)
                }
                QuizEvent::AnswerWrong {
                    correct_answer: None,
                } => {
                    println!("Incorrect. Try once more.");
                    prompt("Answer");
                }
                QuizEvent::AnswerWrong {
                    correct_answer: Some(answer),
                } => println!("Wrong again! Correct answer: {}.", answer),
                QuizEvent::Timeout { correct_answer } => println!(
                    "Time's up! The answer was {}. Moving to next question.",
                    correct_answer
                ),
                _ => {}
            }
        }

        if let Some(grade) = session.grade() {
            let score = session.score();
            self.show_results(score, grade);
        }
    }

    fn show_results(&mut self, score: u32, grade: Grade) {
        println!("\n=== QUIZ COMPLETED! ===");
        println!("Your Final Score: {}/{}", score, MAX_SCORE);
        println!("Your Grade: {}", grade);
        prompt("Enter your name for the leaderboard (leave empty to skip)");
        self.state = State::ReceiveName { score, grade };
    }

    fn receive_name(&mut self, score: u32, grade: Grade, name: &str) -> HandlerResult {
        match self.leaderboard.record(name, score) {
            Ok(Some(rank)) => println!("You placed #{} on the leaderboard!", rank),
            Ok(None) => println!("Not quite enough for the top {} this time.", Leaderboard::CAPACITY),
            Err(LeaderboardError::EmptyName) => log::debug!("no name given, score {} ({}) not recorded", score, grade),
            Err(err) => {
                log::warn!("leaderboard not updated: {}", err);
                println!("Could not save your score.");
            }
        }
        self.show_results_menu();
        Ok(())
    }

    fn show_results_menu(&mut self) {
        println!("  l. View Leaderboard\n  p. Play Again\n  q. Exit");
        prompt("Your choice");
        self.state = State::Results;
    }

    fn receive_results_choice(&mut self, input: &str) -> HandlerResult {
        match input.to_ascii_lowercase().as_str() {
            "l" => self.show_leaderboard(),
            "p" => self.show_welcome(),
            "q" => self.running = false,
            _ => self.show_results_menu(),
        }
        Ok(())
    }

    fn show_leaderboard(&mut self) {
        self.announce(QuizEvent::ScreenEntered(QuizScreen::Leaderboard));
        println!("\n=== LEADERBOARD ===");
        if self.leaderboard.entries().is_empty() {
            println!("No scores yet. Be the first!");
        }
        for (rank, entry) in self.leaderboard.entries().iter().enumerate() {
            println!("{}. {} - {} pts", rank + 1, entry.name, entry.score);
        }
        prompt("Press Enter to return to the menu");
        self.state = State::Leaderboard;
    }

    /// Screens the front-end owns itself still go through the event path so
    /// they get their sound.
    fn announce(&self, event: QuizEvent) {
        sound::play_event(self.sounds.as_ref(), &event);
    }
}

fn progress_bar(done: u32) -> String {
    let done = done.min(QUESTIONS_PER_QUIZ) as usize;
    let left = QUESTIONS_PER_QUIZ as usize - done;
    format!("[{}{}]", "#".repeat(done), "-".repeat(left))
}

fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit")
}

fn prompt(text: &str) {
    print!("{}: ", text);
    // Nothing useful to do if stdout is gone
    let _ = std::io::stdout().flush();
}
