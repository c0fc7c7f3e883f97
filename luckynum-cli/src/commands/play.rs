use super::generate;
use clap::Args;
use dialoguer::Input;
use luckynum_core::{GeneratorConfig, LuckyError, Result, Session, SessionAction};

#[derive(Args)]
pub struct PlayArgs {
    /// Start with sound on
    #[arg(long)]
    sound: bool,

    /// Seed for reproducible draws
    #[arg(short, long)]
    seed: Option<u64>,
}

/// A line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Enter(String),
    Remove(String),
    Generate,
    ToggleSound,
    Quit,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "q" | "quit" | "exit" => Command::Quit,
        "s" | "sound" => Command::ToggleSound,
        "g" | "go" => Command::Generate,
        _ => match line.strip_prefix('-') {
            Some(number) => Command::Remove(number.trim().to_string()),
            None => Command::Enter(line.to_string()),
        },
    }
}

fn print_status(session: &Session) {
    if !session.entries().is_empty() {
        println!("Numbers: {}", session.entries().as_slice().join(" "));
    }
    println!("{}", session.digit_display());
    if let Some(error) = session.error() {
        println!("! {}", error);
    }
}

pub async fn handle_play(args: PlayArgs, config: &GeneratorConfig) -> Result<()> {
    let mut session =
        Session::new().with_sound(args.sound || config.reveal.sound_enabled);
    // Each run gets its own seed so repeated runs differ but stay reproducible.
    let mut seed = args.seed;

    println!("Enter numbers one at a time. Press Enter on an empty line to draw.");
    println!("'-<number>' removes a number, 's' toggles sound, 'q' quits.");
    println!();

    loop {
        let prompt = if session.sound_enabled() {
            "number (sound on)"
        } else {
            "number"
        };
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| LuckyError::dialog(e.to_string()))?;

        let generate_now = match parse_command(&line) {
            Command::Quit => break,
            Command::ToggleSound => {
                let on = session.toggle_sound();
                println!("Sound {}", if on { "on" } else { "off" });
                false
            }
            Command::Remove(number) => {
                if let Err(e) = session.remove(&number) {
                    println!("! {}", e);
                }
                false
            }
            Command::Generate => true,
            Command::Enter(input) => {
                session.set_input(&input);
                match session.submit() {
                    SessionAction::Generate => true,
                    SessionAction::Added(number) => {
                        tracing::debug!("Session added {}", number);
                        false
                    }
                    SessionAction::Rejected | SessionAction::Nothing => false,
                }
            }
        };

        if generate_now {
            match session.begin_generation() {
                Ok(pool) => {
                    println!();
                    let outcome =
                        generate(config.mode, &pool, config, seed, session.sound_enabled()).await;
                    if matches!(&outcome, Err(e) if !e.is_user_facing()) {
                        return outcome.map(|_| ());
                    }
                    session.finish_generation(&outcome);
                    seed = seed.map(|s| s.wrapping_add(1));
                }
                Err(e) => tracing::debug!("Generation refused: {}", e),
            }
        }

        println!();
        print_status(&session);
    }

    Ok(())
}
