//! Terminal frontend for the Nim engine.
//!
//! Reads one command per line from stdin and redraws the table after each:
//!
//! ```text
//! s <pile> <item>   toggle an item (0-based)
//! c                 confirm the selection
//! r                 restart, Player 1 first
//! p                 restart, Player 2 first
//! h                 show the optimal move
//! q                 quit
//! ```

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nim_engine::{CommandStatus, GameController, NimConfig, Opponent, Snapshot, TurnOutcome};

/// Play misère Nim against a perfect-play computer, or hot-seat.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for dealing piles (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Let Player 2 open the first game
    #[arg(long)]
    computer_first: bool,

    /// Two humans share the terminal
    #[arg(long)]
    human: bool,

    /// Pause before each computer move, in milliseconds
    #[arg(long, default_value = "500")]
    delay_ms: u64,

    #[arg(long, default_value = "3")]
    min_piles: usize,

    #[arg(long, default_value = "4")]
    max_piles: usize,

    #[arg(long, default_value = "1")]
    min_count: u32,

    #[arg(long, default_value = "7")]
    max_count: u32,
}

impl Args {
    fn config(&self) -> NimConfig {
        let opponent = if self.human {
            Opponent::Human
        } else {
            Opponent::Computer
        };
        let mut config = NimConfig::default()
            .with_piles(self.min_piles, self.max_piles)
            .with_counts(self.min_count, self.max_count)
            .with_opponent(opponent);
        config.seed = self.seed;
        config
    }
}

enum Command {
    Select(usize, u32),
    Confirm,
    Restart { computer_first: bool },
    Hint,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next()? {
        "s" | "select" => {
            let pile = words.next()?.parse().ok()?;
            let ordinal = words.next()?.parse().ok()?;
            Command::Select(pile, ordinal)
        }
        "c" | "confirm" => Command::Confirm,
        "r" | "restart" => Command::Restart {
            computer_first: false,
        },
        "p" | "player2" => Command::Restart {
            computer_first: true,
        },
        "h" | "hint" => Command::Hint,
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

fn render(view: &Snapshot, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    match view.loser {
        Some(loser) => writeln!(out, "Game Over - {loser} Loses!")?,
        None => writeln!(out, "{}'s Turn", view.current_player)?,
    }
    for (pile, &count) in view.piles.iter().enumerate() {
        let items: Vec<&str> = (0..count)
            .map(|ordinal| if view.is_selected(pile, ordinal) { "[x]" } else { " o " })
            .collect();
        writeln!(out, "  {pile}: {}", items.join(""))?;
    }
    if !view.terminal {
        writeln!(out, "  {} items left", view.items_left)?;
    }
    if view.can_confirm() {
        writeln!(out, "  ({} selected, 'c' to confirm)", view.selection.len())?;
    }
    Ok(())
}

fn report(status: &CommandStatus, out: &mut impl Write) -> io::Result<()> {
    match status {
        CommandStatus::NotApplicable(reason) => writeln!(out, "Not now: {reason}"),
        CommandStatus::Rejected(err) => writeln!(out, "Rejected: {err}"),
        _ => match status.move_report() {
            Some(moved) => {
                writeln!(out, "{} played: {}", moved.applied.player, moved.applied.mv)?;
                if let TurnOutcome::GameOver { loser } = moved.outcome {
                    writeln!(out, "{loser} took the last item.")?;
                }
                Ok(())
            }
            None => Ok(()),
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let delay = Duration::from_millis(args.delay_ms);
    let mut game = GameController::new(args.config())?;
    tracing::info!(seed = game.seed(), "dealing");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.computer_first {
        let status = game.restart(true)?;
        report(&status, &mut out)?;
    }
    render(&game.snapshot(), &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let status = match parse_command(&line) {
            Some(Command::Select(pile, ordinal)) => game.select(pile, ordinal)?,
            Some(Command::Confirm) => game.confirm()?,
            Some(Command::Restart { computer_first }) => game.restart(computer_first)?,
            Some(Command::Hint) => {
                match game.hint()? {
                    Some(mv) => writeln!(out, "Hint: {mv} (nim-sum {})", game.nim_sum())?,
                    None => writeln!(out, "No moves left.")?,
                }
                continue;
            }
            Some(Command::Quit) => break,
            None => {
                writeln!(out, "Commands: s <pile> <item>, c, r, p, h, q")?;
                continue;
            }
        };
        report(&status, &mut out)?;

        if game.is_computer_turn() {
            render(&game.snapshot(), &mut out)?;
            out.flush()?;
            thread::sleep(delay);
            let status = game.request_computer_move()?;
            report(&status, &mut out)?;
        }

        render(&game.snapshot(), &mut out)?;
        out.flush()?;
    }

    Ok(())
}
