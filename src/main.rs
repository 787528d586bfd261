//! Faceoff - survey game-show scoring from the terminal

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use faceoff::config::{config_path, Config};
use faceoff::game::{
    standings, Answer, Choice, FaceOff, FaceOffPhase, GuessOutcome, Player, Question, Round,
    RoundEnd,
};
use faceoff::utils::find_fuzzy_match_index;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Check a guess against a list of answers
    Check {
        guess: String,
        #[arg(required = true)]
        answers: Vec<String>,
    },
    /// Write the current config to the config file
    Init,
    /// Play one question interactively on stdin
    Play {
        #[arg(short, long)]
        question: String,
        /// Answer as TEXT=POINTS, repeatable
        #[arg(short, long = "answer", required = true)]
        answers: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging before the config is read so its warnings are shown
    let from_env = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let initial = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let (filter, reload_handle) = reload::Layer::new(initial);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()?;

    let config = Config::load().context("Failed to load config")?;
    if !args.verbose && !from_env {
        match EnvFilter::try_new(config.log_level.to_lowercase()) {
            Ok(filter) => reload_handle.reload(filter)?,
            Err(e) => warn!("Ignoring log_level '{}': {}", config.log_level, e),
        }
    }

    match args.command {
        Cmd::Check { guess, answers } => {
            match find_fuzzy_match_index(&guess, &answers) {
                Some(idx) => println!("match #{}: {}", idx + 1, answers[idx]),
                None => println!("no match"),
            }
            Ok(())
        }
        Cmd::Init => {
            config.save().context("Failed to save config")?;
            println!("Wrote {}", config_path().display());
            Ok(())
        }
        Cmd::Play { question, answers } => {
            let question = build_question(&question, &answers)?;
            play(&config, question)
        }
    }
}

fn parse_answer(idx: usize, raw: &str) -> Result<Answer> {
    let Some((text, points)) = raw.rsplit_once('=') else {
        bail!("answer '{}' must look like TEXT=POINTS", raw);
    };
    let points: u32 = points
        .trim()
        .parse()
        .with_context(|| format!("invalid points in '{}'", raw))?;
    Ok(Answer::new(format!("a{}", idx + 1), text, points))
}

fn build_question(prompt: &str, raw_answers: &[String]) -> Result<Question> {
    let answers = raw_answers
        .iter()
        .enumerate()
        .map(|(idx, raw)| parse_answer(idx, raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(Question::new("q1", prompt, answers)?)
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> Result<String> {
    print!("{} ", text);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?),
        None => bail!("input closed"),
    }
}

fn print_board(question: &Question) {
    println!("\n{}", question.prompt);
    for (idx, answer) in question.board().iter().enumerate() {
        if answer.revealed {
            println!("  {}. {:<24} {:>3}", idx + 1, answer.text, answer.points);
        } else {
            println!("  {}. {:<24} {:>3}", idx + 1, "????????", "");
        }
    }
}

fn play(config: &Config, question: Question) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let [first_name, second_name] = &config.player_names;
    let players = [Player::new("1", first_name), Player::new("2", second_name)];

    info!("🎬 Starting '{}' with {} answers", question.prompt, question.answers.len());
    print_board(&question);

    // Face-off
    let mut faceoff = FaceOff::new(&question);
    loop {
        let who = prompt(&mut lines, "Who buzzed first? [1/2]")?;
        match who.trim().parse::<usize>() {
            Ok(n @ 1..=2) => {
                faceoff.buzz(n - 1)?;
                break;
            }
            _ => println!("Enter 1 or 2."),
        }
    }

    while let Some(player) = faceoff.guessing_player() {
        let guess = prompt(&mut lines, &format!("{}, your guess:", players[player].name))?;
        let record = if faceoff.phase() == FaceOffPhase::FirstGuess {
            faceoff.first_guess(&guess)?
        } else {
            faceoff.second_guess(&guess)?
        };
        match &record.answer_id {
            Some(_) => println!("✓ On the board for {} points", record.points),
            None => println!("✗ Not on the board"),
        }
    }

    for record in faceoff
        .first_guess_record()
        .into_iter()
        .chain(faceoff.second_guess_record())
    {
        let verdict = match &record.answer_id {
            Some(_) => format!("✓ ({} points)", record.points),
            None => "✗".to_string(),
        };
        println!("{}: \"{}\" {}", players[record.player].name, record.text, verdict);
    }

    let winner = faceoff.winner().context("face-off ended without a winner")?;
    let choice = loop {
        let raw = prompt(
            &mut lines,
            &format!("{} controls the board. Pass or play?", players[winner].name),
        )?;
        match raw.trim().to_lowercase().as_str() {
            "pass" => break Choice::Pass,
            "play" => break Choice::Play,
            _ => println!("Type pass or play."),
        }
    };
    let result = faceoff.choose(choice)?;

    // Round
    let mut round = Round::new(question, players, &result, config.max_strikes)?;
    while !round.is_over() {
        print_board(round.question());
        let state = round.state();
        let label = if state.steal_mode { "steal" } else { "guess" };
        let guess = prompt(
            &mut lines,
            &format!(
                "{} [{}/{} strikes] {}:",
                round.current_player().name,
                state.strikes,
                round.max_strikes(),
                label
            ),
        )?;

        match round.guess(&guess)? {
            GuessOutcome::Revealed { points, .. } => println!("✓ {} points!", points),
            GuessOutcome::AlreadyRevealed { .. } => println!("Already on the board."),
            GuessOutcome::Strike { strikes } => println!("✗ Strike {}", strikes),
            GuessOutcome::ControlPassed { to } => {
                println!("✗ Out of strikes! {} may steal.", round.players()[to].name)
            }
            GuessOutcome::Stolen { transferred, .. } => {
                println!("💰 Stolen! {} points change hands.", transferred)
            }
            GuessOutcome::StealFailed => println!("✗ Steal failed."),
        }
    }

    if round.state().ended == Some(RoundEnd::Cleared) {
        println!("Board cleared!");
    }
    round.reveal_remaining()?;
    print_board(round.question());

    let final_standings = standings(&round.into_players());
    println!("\nFinal scores");
    for (idx, player) in final_standings.ranked().iter().enumerate() {
        println!("  #{} {:<16} {}", idx + 1, player.name, player.score);
    }
    match final_standings.winner() {
        Some(player) => println!("Winner: {}", player.name),
        None => println!("It's a tie!"),
    }

    Ok(())
}
