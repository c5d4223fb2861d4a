use std::io::Write;
use std::time::Duration;

use portfolio::config::Config;
use portfolio::jokes::source::{self, JokeOrigin};
use portfolio::jokes::{JokeError, JokeEvent, JokeSession};
use portfolio::sound::{self, SoundPlayer};
use tokio::io::{AsyncBufReadExt, BufReader};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const MENU_TEXT: &str = "  t. Alexa tell me a Joke
  p. Show Punchline
  n. Next Joke
  f. Favourite Joke
  s. Show Favourite
  q. Quit";

struct App {
    session: JokeSession,
    sounds: Box<dyn SoundPlayer>,
    typewriter_delay: Duration,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> HandlerResult {
    pretty_env_logger::init();
    let config = Config::from_env();
    log::info!("Starting joke teller...");

    let (jokes, origin) = source::load_jokes(&config.jokes_path);
    let mut app = App {
        session: JokeSession::new(jokes),
        sounds: sound::open_player(&config.sound_dir, config.sound_enabled),
        typewriter_delay: config.typewriter_delay,
    };

    println!("\n=== Welcome to Alexa Joke Teller ===");
    if origin == JokeOrigin::BuiltIn {
        println!(
            "({} not found, using a few jokes of my own)",
            config.jokes_path.display()
        );
    }
    println!("{}", MENU_TEXT);
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "t" | "n" => app.tell_joke(),
            "p" => app.show_punchline(),
            "f" => app.save_favourite(),
            "s" => app.show_favourite(),
            "q" | "quit" => break,
            "h" | "?" => println!("{}", MENU_TEXT),
            other => println!("Unknown option {:?}, press h for help.", other),
        }
        app.render().await?;
        prompt();
    }

    println!("Goodbye!");
    log::info!("joke teller closed");
    Ok(())
}

impl App {
    fn tell_joke(&mut self) {
        if let Err(err @ JokeError::NoJokesAvailable) = self.session.tell_joke() {
            println!("{}!", err);
        }
    }

    fn show_punchline(&mut self) {
        if self.session.show_punchline().is_none() {
            match self.session.current() {
                None => println!("Ask for a joke first."),
                Some(_) => println!("You've already heard that one. Press n for the next joke."),
            }
        }
    }

    fn save_favourite(&mut self) {
        if !self.session.save_favourite() {
            println!("There is no joke to save yet.");
        }
    }

    fn show_favourite(&mut self) {
        if let Err(err @ JokeError::NoFavouriteSet) = self.session.show_favourite() {
            println!("{}!", capitalise(&err.to_string()));
        }
    }

    async fn render(&mut self) -> HandlerResult {
        for event in self.session.drain_events() {
            sound::play_event(self.sounds.as_ref(), &event);
            match event {
                JokeEvent::SetupShown(joke) => {
                    println!();
                    typewrite(&joke.setup, self.typewriter_delay).await?;
                }
                JokeEvent::PunchlineRevealed(joke) => {
                    typewrite(&joke.punchline, self.typewriter_delay).await?;
                }
                JokeEvent::FavouriteSaved(_) => println!("Favourite joke saved! <3"),
                JokeEvent::FavouriteShown(joke) => {
                    println!("\n*** Your Favourite Joke ***\n{}\n{}", joke.setup, joke.punchline);
                }
            }
        }
        Ok(())
    }
}

/// Prints `text` one character at a time.
async fn typewrite(text: &str, delay: Duration) -> HandlerResult {
    let mut stdout = std::io::stdout();
    if delay.is_zero() {
        writeln!(stdout, "{}", text)?;
        return Ok(());
    }
    for c in text.chars() {
        write!(stdout, "{}", c)?;
        stdout.flush()?;
        tokio::time::sleep(delay).await;
    }
    writeln!(stdout)?;
    Ok(())
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn prompt() {
    print!("> ");
    // Nothing useful to do if stdout is gone
    let _ = std::io::stdout().flush();
}
