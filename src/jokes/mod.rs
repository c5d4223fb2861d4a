pub mod source;

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::events::{Cue, Events};
use crate::sound::SoundCue;

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Joke {
    pub setup: String,
    pub punchline: String,
}

impl Joke {
    pub fn new(setup: impl Into<String>, punchline: impl Into<String>) -> Self {
        Self {
            setup: setup.into(),
            punchline: punchline.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum JokeError {
    #[error("no jokes available")]
    NoJokesAvailable,
    #[error("no favourite joke saved yet")]
    NoFavouriteSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JokeEvent {
    SetupShown(Joke),
    PunchlineRevealed(Joke),
    FavouriteSaved(Joke),
    FavouriteShown(Joke),
}

impl Cue for JokeEvent {
    fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            JokeEvent::PunchlineRevealed(_) => Some(SoundCue::Punchline),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokeState {
    Idle,
    SetupShown,
    PunchlineShown,
}

pub struct JokeSession<R = ThreadRng> {
    jokes: Vec<Joke>,
    current: Option<Joke>,
    punchline_revealed: bool,
    favourite: Option<Joke>,
    events: Events<JokeEvent>,
    rng: R,
}

impl JokeSession<ThreadRng> {
    pub fn new(jokes: Vec<Joke>) -> Self {
        Self::with_rng(jokes, rand::thread_rng())
    }
}

impl<R: Rng> JokeSession<R> {
    pub fn with_rng(jokes: Vec<Joke>, rng: R) -> Self {
        Self {
            jokes,
            current: None,
            punchline_revealed: false,
            favourite: None,
            events: Events::new(),
            rng,
        }
    }

    /// Picks a joke at random and hides its punchline.
    pub fn tell_joke(&mut self) -> Result<&Joke, JokeError> {
        let joke = self
            .jokes
            .choose(&mut self.rng)
            .cloned()
            .ok_or(JokeError::NoJokesAvailable)?;
        log::debug!("telling {:?}", joke.setup);
        self.punchline_revealed = false;
        self.events.send(JokeEvent::SetupShown(joke.clone()));
        let current: &Joke = self.current.insert(joke);
        Ok(current)
    }
}

impl<R> JokeSession<R> {
    /// Reveals the current punchline. Returns `None` when there is nothing new
    /// to show: no joke yet, or this punchline is already out.
    pub fn show_punchline(&mut self) -> Option<&str> {
        if self.punchline_revealed {
            return None;
        }
        let joke = self.current.as_ref()?;
        self.punchline_revealed = true;
        self.events.send(JokeEvent::PunchlineRevealed(joke.clone()));
        Some(joke.punchline.as_str())
    }

    /// Overwrites the favourite with the current joke. Returns whether
    /// anything was saved.
    pub fn save_favourite(&mut self) -> bool {
        let Some(joke) = self.current.clone() else {
            return false;
        };
        log::info!("favourite saved: {:?}", joke.setup);
        self.events.send(JokeEvent::FavouriteSaved(joke.clone()));
        self.favourite = Some(joke);
        true
    }

    pub fn show_favourite(&mut self) -> Result<&Joke, JokeError> {
        let joke = self.favourite.as_ref().ok_or(JokeError::NoFavouriteSet)?;
        self.events.send(JokeEvent::FavouriteShown(joke.clone()));
        Ok(joke)
    }

    pub fn favourite(&self) -> Option<&Joke> {
        self.favourite.as_ref()
    }

    pub fn current(&self) -> Option<&Joke> {
        self.current.as_ref()
    }

    pub fn punchline_revealed(&self) -> bool {
        self.punchline_revealed
    }

    pub fn state(&self) -> JokeState {
        match (&self.current, self.punchline_revealed) {
            (None, _) => JokeState::Idle,
            (Some(_), false) => JokeState::SetupShown,
            (Some(_), true) => JokeState::PunchlineShown,
        }
    }

    pub fn drain_events(&mut self) -> Vec<JokeEvent> {
        self.events.drain().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(jokes: Vec<Joke>) -> JokeSession<StdRng> {
        JokeSession::with_rng(jokes, StdRng::seed_from_u64(3))
    }

    #[test]
    fn empty_list_has_nothing_to_tell() {
        let mut session = session(Vec::new());
        assert_eq!(session.tell_joke(), Err(JokeError::NoJokesAvailable));
        assert_eq!(session.state(), JokeState::Idle);
    }

    #[test]
    fn tell_then_reveal() {
        let mut session = session(source::builtin_jokes());
        let told = session.tell_joke().unwrap().clone();
        assert!(source::builtin_jokes().contains(&told));
        assert_eq!(session.state(), JokeState::SetupShown);

        assert_eq!(session.show_punchline(), Some(told.punchline.as_str()));
        assert_eq!(session.state(), JokeState::PunchlineShown);
        assert_eq!(
            session.drain_events(),
            vec![
                JokeEvent::SetupShown(told.clone()),
                JokeEvent::PunchlineRevealed(told)
            ]
        );
    }

    #[test]
    fn punchline_reveals_only_once() {
        let mut session = session(source::builtin_jokes());
        session.tell_joke().unwrap();
        let first = session.show_punchline().map(str::to_owned);
        assert!(first.is_some());
        session.drain_events();

        assert_eq!(session.show_punchline(), None);
        assert!(session.punchline_revealed());
        assert_eq!(session.current().map(|j| j.punchline.clone()), first);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn next_joke_hides_punchline_again() {
        let mut session = session(source::builtin_jokes());
        session.tell_joke().unwrap();
        session.show_punchline();
        session.tell_joke().unwrap();
        assert!(!session.punchline_revealed());
        assert!(session.show_punchline().is_some());
    }

    #[test]
    fn punchline_without_joke_is_noop() {
        let mut session = session(source::builtin_jokes());
        assert_eq!(session.show_punchline(), None);
        assert!(!session.punchline_revealed());
    }

    #[test]
    fn picks_are_spread_over_the_list() {
        let mut session = session(source::builtin_jokes());
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(session.tell_joke().unwrap().clone());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn favourite_round_trip() {
        let mut session = session(source::builtin_jokes());
        assert_eq!(session.show_favourite(), Err(JokeError::NoFavouriteSet));
        assert!(!session.save_favourite());

        let told = session.tell_joke().unwrap().clone();
        assert!(session.save_favourite());
        assert_eq!(session.show_favourite(), Ok(&told));
    }

    #[test]
    fn favourite_is_overwritten() {
        let jokes = vec![Joke::new("A?", "a"), Joke::new("B?", "b")];
        let mut session = session(jokes);
        session.tell_joke().unwrap();
        session.save_favourite();
        let first = session.favourite().cloned();

        // Keep drawing until the other joke comes up
        let mut next = session.tell_joke().unwrap().clone();
        while Some(&next) == first.as_ref() {
            next = session.tell_joke().unwrap().clone();
        }
        session.save_favourite();
        assert_eq!(session.favourite(), Some(&next));
    }
}
