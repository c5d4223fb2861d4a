use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::Joke;

const MARKER: char = '-';

/// Where the loaded jokes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokeOrigin {
    File,
    BuiltIn,
}

pub fn builtin_jokes() -> Vec<Joke> {
    vec![
        Joke::new("Why did the chicken cross the road?", "To get to the other side."),
        Joke::new("What happens if you boil a clown?", "You get a laughing stock."),
        Joke::new(
            "Why don't scientists trust atoms?",
            "Because they make up everything!",
        ),
    ]
}

/// Parses one `[- ]setup?punchline` line. The setup keeps its `?`.
pub fn parse_line(line: &str) -> Option<Joke> {
    let mut line = line.trim();
    if let Some(rest) = line.strip_prefix(MARKER) {
        line = rest.trim();
    }
    let (setup, punchline) = line.split_once('?')?;
    let (setup, punchline) = (setup.trim(), punchline.trim());
    if setup.is_empty() || punchline.is_empty() {
        return None;
    }
    Some(Joke::new(format!("{}?", setup), punchline))
}

/// Collects every usable line. Lines that are not valid UTF-8 are skipped
/// like any other malformed line; a read error ends the list early.
pub fn parse_jokes<R: BufRead>(mut reader: R) -> Vec<Joke> {
    let mut jokes = Vec::new();
    let mut buf = Vec::new();
    let mut line_number = 0;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => line_number += 1,
            Err(err) => {
                log::warn!("stopped reading jokes after line {}: {}", line_number, err);
                break;
            }
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(err) => {
                log::warn!("skipping joke line {}: {}", line_number, err);
                continue;
            }
        };
        match parse_line(line) {
            Some(joke) => jokes.push(joke),
            None if line.trim().is_empty() => {}
            None => log::debug!("skipping joke line {}: {:?}", line_number, line.trim_end()),
        }
    }
    jokes
}

/// Loads jokes from `path`, falling back to the built-in list only when the
/// file cannot be opened. An opened file with no usable lines yields no jokes.
pub fn load_jokes(path: &Path) -> (Vec<Joke>, JokeOrigin) {
    match File::open(path) {
        Ok(file) => {
            let jokes = parse_jokes(BufReader::new(file));
            log::info!("loaded {} jokes from {}", jokes.len(), path.display());
            (jokes, JokeOrigin::File)
        }
        Err(err) => {
            log::warn!(
                "cannot open jokes file {} ({}), using built-in list",
                path.display(),
                err
            );
            (builtin_jokes(), JokeOrigin::BuiltIn)
        }
    }
}
