//! Terminal front-end for the trivia engine.
//!
//! Thin glue over the engine's public API: loads a dataset, prints
//! questions, reads answers from stdin. Timers are displayed but not
//! enforced; enforcing them belongs to richer front-ends.
//!
//! Usage: trivia <dataset.json> [--continue-on-miss] [--scores <file>]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use trivia_core::{
    Answer, FileScoreStore, GameEngine, GameOptions, JsonFileLoader, MissPolicy, Question,
};

struct Args {
    dataset: String,
    continue_on_miss: bool,
    scores: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut dataset = None;
    let mut continue_on_miss = false;
    let mut scores = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--continue-on-miss" => continue_on_miss = true,
            "--scores" => {
                scores = Some(args.next().ok_or("--scores requires a file path")?);
            }
            _ if dataset.is_none() => dataset = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }

    Ok(Args {
        dataset: dataset.ok_or("usage: trivia <dataset.json> [--continue-on-miss] [--scores <file>]")?,
        continue_on_miss,
        scores,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    let mut options = GameOptions::default();
    if args.continue_on_miss {
        options = options
            .with_wrong_answer_policy(MissPolicy::Continue)
            .with_timeout_policy(MissPolicy::Continue);
    }

    let loader = JsonFileLoader::new(&args.dataset);
    let mut engine = GameEngine::initialize(&loader, options).await?;
    if let Some(path) = &args.scores {
        engine = engine.with_score_store(Box::new(FileScoreStore::open(path)?));
    }

    println!(
        "Loaded {} picks. Best streak so far: {}.",
        engine.pool().len(),
        engine.best_streak()
    );

    if engine.start_game().is_none() {
        println!("Not enough data to build a question from this dataset.");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(question) = engine.current_question() else {
            break;
        };
        let option_count = question.options().len();
        let correct_name = question.correct_option().name.clone();
        print_question(question, engine.current_time_limit());

        let Some(choice) = read_choice(&mut lines, option_count)? else {
            println!("Bye!");
            return Ok(());
        };

        let outcome = engine.submit_answer(Answer::Choice(choice))?;
        if outcome.correct {
            println!(
                "Correct! Score {}, streak {}.",
                engine.score(),
                engine.streak()
            );
        } else {
            println!("Wrong - it was {correct_name}. Streak reset.");
        }

        if outcome.game_over {
            break;
        }
        if engine.generate_next_question().is_none() {
            println!("The pool ran out of questions.");
            break;
        }
    }

    println!(
        "Game over. Final score {} of {}. Best streak: {}.",
        engine.score(),
        engine.questions_answered(),
        engine.best_streak()
    );
    Ok(())
}

fn print_question(question: &Question, time_limit: f64) {
    println!();
    println!("=== {} ({}s) ===", question.prompt_text(), time_limit);
    for (i, pick) in question.options().iter().enumerate() {
        println!("  {}. {}", i + 1, pick.name);
    }
}

/// Read a 1-based option number; `None` means the player quit.
fn read_choice(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    option_count: usize,
) -> Result<Option<usize>, io::Error> {
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let trimmed = line.trim();

        if trimmed.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => return Ok(Some(n - 1)),
            _ => println!("Enter a number from 1 to {option_count}, or q to quit."),
        }
    }
}
