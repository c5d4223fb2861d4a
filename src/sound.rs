use std::io::Write;
use std::path::PathBuf;

use crate::events::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Start,
    Correct,
    Wrong,
    Timeout,
    Punchline,
}

impl SoundCue {
    /// File name of the audio asset behind this cue.
    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::Start => "start.wav",
            SoundCue::Correct => "correct_sound_effect.wav",
            SoundCue::Wrong => "wrong_answer_sound_effect.wav",
            SoundCue::Timeout => "timeout.wav",
            SoundCue::Punchline => "main funny.wav",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    #[error("sound is disabled")]
    Disabled,
    #[error("sound asset {0} not found")]
    MissingAsset(PathBuf),
    #[error("no audio output: {0}")]
    Output(String),
    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait SoundPlayer {
    fn play(&self, cue: SoundCue) -> Result<(), SoundError>;
}

/// Resolves cues against an asset directory and signals them on the terminal.
///
/// This is the fallback player: a cue whose asset exists rings the terminal
/// bell, anything else is an error for the caller to swallow.
#[derive(Debug, Clone)]
pub struct SoundBoard {
    dir: PathBuf,
    enabled: bool,
}

impl SoundBoard {
    pub fn new(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    pub fn asset_path(&self, cue: SoundCue) -> PathBuf {
        self.dir.join(cue.asset())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The asset to play for `cue`, if sound is on and the file is there.
    fn resolve(&self, cue: SoundCue) -> Result<PathBuf, SoundError> {
        if !self.enabled {
            return Err(SoundError::Disabled);
        }
        let path = self.asset_path(cue);
        if !path.is_file() {
            return Err(SoundError::MissingAsset(path));
        }
        Ok(path)
    }
}

impl SoundPlayer for SoundBoard {
    fn play(&self, cue: SoundCue) -> Result<(), SoundError> {
        self.resolve(cue)?;
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Decodes the cue's asset and plays it on the default output device.
/// Playback is detached, so `play` returns as soon as the sound is queued.
#[cfg(feature = "audio")]
pub struct Speaker {
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
    board: SoundBoard,
}

#[cfg(feature = "audio")]
impl Speaker {
    pub fn open(board: SoundBoard) -> Result<Self, SoundError> {
        let (stream, handle) = rodio::OutputStream::try_default()
            .map_err(|err| SoundError::Output(err.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            board,
        })
    }
}

#[cfg(feature = "audio")]
impl SoundPlayer for Speaker {
    fn play(&self, cue: SoundCue) -> Result<(), SoundError> {
        let path = self.board.resolve(cue)?;
        let file = std::io::BufReader::new(std::fs::File::open(&path)?);
        let source = rodio::Decoder::new(file).map_err(|err| SoundError::Decode {
            path: path.clone(),
            reason: err.to_string(),
        })?;
        let sink =
            rodio::Sink::try_new(&self.handle).map_err(|err| SoundError::Output(err.to_string()))?;
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

/// Picks the player for this build: the speaker when the `audio` feature is
/// on and an output device opens, otherwise the terminal bell.
pub fn open_player(dir: impl Into<PathBuf>, enabled: bool) -> Box<dyn SoundPlayer> {
    let board = SoundBoard::new(dir, enabled);
    if !board.is_enabled() {
        return Box::new(board);
    }

    #[cfg(feature = "audio")]
    let board = match Speaker::open(board.clone()) {
        Ok(speaker) => return Box::new(speaker),
        Err(err) => {
            log::warn!("{}, falling back to the terminal bell", err);
            board
        }
    };

    Box::new(board)
}

/// Plays the cue attached to `event`, if any. Failures never reach the caller.
pub fn play_event<E: Cue>(player: &dyn SoundPlayer, event: &E) {
    if let Some(cue) = event.sound_cue() {
        play_best_effort(player, cue);
    }
}

pub fn play_best_effort(player: &dyn SoundPlayer, cue: SoundCue) {
    match player.play(cue) {
        Ok(()) => log::debug!("played {:?}", cue),
        Err(SoundError::Disabled) => {}
        Err(SoundError::MissingAsset(path)) => {
            log::debug!("no asset for {:?} at {}", cue, path.display())
        }
        Err(err) => log::warn!("sound {:?} failed: {}", cue, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        played: RefCell<Vec<SoundCue>>,
        fail: bool,
    }

    impl SoundPlayer for Recorder {
        fn play(&self, cue: SoundCue) -> Result<(), SoundError> {
            if self.fail {
                return Err(SoundError::MissingAsset(PathBuf::from(cue.asset())));
            }
            self.played.borrow_mut().push(cue);
            Ok(())
        }
    }

    struct Beep(Option<SoundCue>);

    impl Cue for Beep {
        fn sound_cue(&self) -> Option<SoundCue> {
            self.0
        }
    }

    #[test]
    fn missing_asset_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let board = SoundBoard::new(dir.path(), true);
        match board.play(SoundCue::Correct) {
            Err(SoundError::MissingAsset(path)) => {
                assert_eq!(path, dir.path().join("correct_sound_effect.wav"))
            }
            other => panic!("expected missing asset, got {:?}", other),
        }
    }

    #[test]
    fn disabled_board_plays_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("start.wav"), b"RIFF").unwrap();
        let board = SoundBoard::new(dir.path(), false);
        assert!(matches!(board.play(SoundCue::Start), Err(SoundError::Disabled)));
    }

    #[test]
    fn disabled_player_never_opens_a_device() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("timeout.wav"), b"RIFF").unwrap();
        let player = open_player(dir.path(), false);
        assert!(matches!(
            player.play(SoundCue::Timeout),
            Err(SoundError::Disabled)
        ));
    }

    #[test]
    fn any_player_reports_missing_assets() {
        let dir = tempfile::tempdir().unwrap();
        let player = open_player(dir.path(), true);
        match player.play(SoundCue::Punchline) {
            Err(SoundError::MissingAsset(path)) => {
                assert_eq!(path, dir.path().join("main funny.wav"))
            }
            other => panic!("expected missing asset, got {:?}", other),
        }
    }

    #[test]
    fn events_without_cue_are_silent() {
        let recorder = Recorder {
            played: RefCell::new(Vec::new()),
            fail: false,
        };
        play_event(&recorder, &Beep(None));
        play_event(&recorder, &Beep(Some(SoundCue::Timeout)));
        assert_eq!(*recorder.played.borrow(), vec![SoundCue::Timeout]);
    }

    #[test]
    fn failures_are_swallowed() {
        let recorder = Recorder {
            played: RefCell::new(Vec::new()),
            fail: true,
        };
        play_best_effort(&recorder, SoundCue::Wrong);
        assert!(recorder.played.borrow().is_empty());
    }
}
