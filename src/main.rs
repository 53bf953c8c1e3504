use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use sixcount::{
    chat,
    config::Settings,
    game::{ChannelId, GameRegistry, PlayerId},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// sixcount validates counting-game moves: expressions over the digits 1-6
/// with `+ - * / ^ !` and parentheses.
///
/// Without `--eval`, reads chat lines from stdin in the form
/// `[#channel] <sender> <message>` and prints the reply to each.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate a single expression and print its value.
    #[arg(short, long)]
    eval: Option<String>,

    /// TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reject expressions that use a digit more than once.
    #[arg(long)]
    unique_digits: bool,

    /// Largest operand accepted by `!`.
    #[arg(long)]
    max_factorial: Option<u32>,

    /// Largest magnitude a power may produce.
    #[arg(long)]
    max_magnitude: Option<u64>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => match Settings::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            },
        },
        None => Settings::default(),
    };
    settings.rules.unique_digits |= args.unique_digits;
    if let Some(max) = args.max_factorial {
        settings.limits.max_factorial = max;
    }
    if let Some(max) = args.max_magnitude {
        settings.limits.max_magnitude = max;
    }

    if let Some(expression) = &args.eval {
        return match settings.context().run(expression) {
            Ok(value) => {
                println!("{value}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    match play(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "I/O failure");
            ExitCode::FAILURE
        },
    }
}

/// Feeds stdin lines through the chat boundary until end of input.
fn play(settings: &Settings) -> io::Result<()> {
    let registry = GameRegistry::new(settings.context());
    let prefixes = settings.chat.reserved_prefixes.as_slice();
    info!("Reading moves from stdin");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some((channel, sender, text)) = split_line(&line) else {
            continue;
        };
        let game = registry.game(channel);
        if let Some(reply) = chat::respond(&game, prefixes, &sender, text) {
            writeln!(out, "{channel} {reply}")?;
        }
    }
    Ok(())
}

/// Splits `[#channel] <sender> <message>`; the channel defaults to `#0`.
fn split_line(line: &str) -> Option<(ChannelId, PlayerId, &str)> {
    let line = line.trim_start();
    let (channel, rest) = match line.strip_prefix('#') {
        Some(tagged) => {
            let (id, rest) = tagged.split_once(char::is_whitespace)?;
            (ChannelId(id.parse().ok()?), rest.trim_start())
        },
        None => (ChannelId(0), line),
    };
    let (sender, text) = rest.split_once(char::is_whitespace)
                             .unwrap_or((rest, ""));
    if sender.is_empty() {
        return None;
    }
    Some((channel, PlayerId::from(sender), text))
}
