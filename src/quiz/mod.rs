pub mod arithmetic;
pub mod countdown;
pub mod leaderboard;

use std::fmt;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::events::{Cue, Events};
use crate::sound::SoundCue;
use arithmetic::{Difficulty, Operator, Question};
use countdown::{Countdown, Tick, TimerHandle};

pub const QUESTIONS_PER_QUIZ: u32 = 10;
pub const SECONDS_PER_QUESTION: u32 = 10;
pub const FIRST_TRY_POINTS: u32 = 10;
pub const SECOND_TRY_POINTS: u32 = 5;
pub const MAX_SCORE: u32 = QUESTIONS_PER_QUIZ * FIRST_TRY_POINTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    F,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::APlus,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScreen {
    Welcome,
    Menu,
    /// 1-based question number.
    Question(u32),
    Results,
    Leaderboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    ScreenEntered(QuizScreen),
    Tick { remaining: u32 },
    AnswerCorrect { points: u32 },
    /// `correct_answer` is only revealed once the second attempt is spent.
    AnswerWrong { correct_answer: Option<i64> },
    Timeout { correct_answer: i64 },
}

impl Cue for QuizEvent {
    fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            QuizEvent::ScreenEntered(QuizScreen::Welcome)
            | QuizEvent::ScreenEntered(QuizScreen::Menu)
            | QuizEvent::ScreenEntered(QuizScreen::Results) => Some(SoundCue::Start),
            QuizEvent::ScreenEntered(_) | QuizEvent::Tick { .. } => None,
            QuizEvent::AnswerCorrect { .. } => Some(SoundCue::Correct),
            QuizEvent::AnswerWrong { .. } => Some(SoundCue::Wrong),
            QuizEvent::Timeout { .. } => Some(SoundCue::Timeout),
        }
    }
}

/// Where a running session is. Choosing a difficulty happens before a
/// session exists, so it has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    AwaitingFirstAnswer,
    AwaitingSecondAnswer,
    Completed(Grade),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct { points: u32 },
    TryAgain,
    Revealed { correct_answer: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("please enter a number (got {0:?})")]
    InvalidInput(String),
    #[error("the quiz is already finished")]
    Finished,
}

pub struct QuizSession<R = ThreadRng> {
    difficulty: Difficulty,
    score: u32,
    question_index: u32,
    first_attempt: bool,
    question: Question,
    countdown: Countdown,
    grade: Option<Grade>,
    events: Events<QuizEvent>,
    rng: R,
}

impl QuizSession<ThreadRng> {
    pub fn start(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, rand::thread_rng())
    }
}

impl<R: Rng> QuizSession<R> {
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        let mut session = Self {
            difficulty,
            score: 0,
            question_index: 1,
            first_attempt: true,
            question: Question {
                left: 0,
                right: 0,
                operator: Operator::Add,
            },
            countdown: Countdown::new(),
            grade: None,
            events: Events::new(),
            rng,
        };
        session.start_quiz(difficulty);
        session
    }

    /// Resets score and progress and shows the first question.
    pub fn start_quiz(&mut self, difficulty: Difficulty) {
        log::info!("starting {:?} quiz", difficulty);
        self.difficulty = difficulty;
        self.score = 0;
        self.question_index = 1;
        self.grade = None;
        self.generate_question();
    }

    /// Draws a fresh question for the current index and restarts the countdown.
    /// A completed quiz has no next question and returns `None`.
    pub fn generate_question(&mut self) -> Option<TimerHandle> {
        if self.is_completed() {
            log::debug!("no question to draw, quiz is finished");
            return None;
        }
        self.question = arithmetic::generate_question(self.difficulty, &mut self.rng);
        self.first_attempt = true;
        log::debug!("question {}: {}", self.question_index, self.question);
        self.events
            .send(QuizEvent::ScreenEntered(QuizScreen::Question(self.question_index)));
        Some(self.countdown.start(SECONDS_PER_QUESTION))
    }

    pub fn submit_answer(&mut self, input: &str) -> Result<Outcome, QuizError> {
        if self.is_completed() {
            return Err(QuizError::Finished);
        }
        let input = input.trim();
        let value: i64 = input
            .parse()
            .map_err(|_| QuizError::InvalidInput(input.to_string()))?;

        let correct_answer = self.question.answer();
        if value == correct_answer {
            let points = if self.first_attempt {
                FIRST_TRY_POINTS
            } else {
                SECOND_TRY_POINTS
            };
            self.score += points;
            log::debug!("correct, +{} (score {})", points, self.score);
            self.events.send(QuizEvent::AnswerCorrect { points });
            self.advance();
            return Ok(Outcome::Correct { points });
        }

        if self.first_attempt {
            log::debug!("wrong first attempt: {} != {}", value, correct_answer);
            self.first_attempt = false;
            self.events.send(QuizEvent::AnswerWrong {
                correct_answer: None,
            });
            return Ok(Outcome::TryAgain);
        }

        log::debug!("wrong again: {} != {}", value, correct_answer);
        self.events.send(QuizEvent::AnswerWrong {
            correct_answer: Some(correct_answer),
        });
        self.advance();
        Ok(Outcome::Revealed { correct_answer })
    }

    /// Feeds one elapsed second into the countdown. Reaching zero times the
    /// question out; ticks from an earlier question are ignored.
    pub fn on_tick(&mut self, handle: TimerHandle) -> Tick {
        let tick = self.countdown.tick(handle);
        match tick {
            Tick::Running(remaining) => self.events.send(QuizEvent::Tick { remaining }),
            Tick::Expired => {
                if let Err(err) = self.on_timeout() {
                    log::warn!("countdown expired on a finished quiz: {}", err);
                }
            }
            Tick::Stale => log::debug!("ignoring stale tick"),
        }
        tick
    }

    /// Treats the current question as failed on its final attempt.
    pub fn on_timeout(&mut self) -> Result<i64, QuizError> {
        if self.is_completed() {
            return Err(QuizError::Finished);
        }
        self.countdown.cancel();
        let correct_answer = self.question.answer();
        log::debug!("question {} timed out", self.question_index);
        self.events.send(QuizEvent::Timeout { correct_answer });
        self.advance();
        Ok(correct_answer)
    }

    /// Moves past the current question without scoring it. After the last
    /// question the quiz completes and is graded.
    pub fn advance(&mut self) {
        if self.is_completed() {
            return;
        }
        self.question_index += 1;
        if self.question_index > QUESTIONS_PER_QUIZ {
            self.countdown.cancel();
            let grade = Grade::from_score(self.score);
            log::info!("quiz finished: {}/{} ({})", self.score, MAX_SCORE, grade);
            self.grade = Some(grade);
            self.events.send(QuizEvent::ScreenEntered(QuizScreen::Results));
        } else {
            self.generate_question();
        }
    }

    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        self.events.drain().collect()
    }
}

impl<R> QuizSession<R> {
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 1-based; `QUESTIONS_PER_QUIZ + 1` once completed.
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    pub fn first_attempt(&self) -> bool {
        self.first_attempt
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.countdown.handle()
    }

    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    pub fn is_completed(&self) -> bool {
        self.grade.is_some()
    }

    pub fn state(&self) -> QuizState {
        match self.grade {
            Some(grade) => QuizState::Completed(grade),
            None if self.first_attempt => QuizState::AwaitingFirstAnswer,
            None => QuizState::AwaitingSecondAnswer,
        }
    }
}
