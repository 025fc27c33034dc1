use std::io::{stdin, BufRead};
use std::process::ExitCode;

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing::error;

use readiness_check::history::{self, format_date, HistoryStore, JsonFileHistory};
use readiness_check::{
    report, telemetry, trend, Answers, AppConfig, AssessmentResult, Engine, Error, Trend,
};

#[derive(Parser)]
#[command(about = "Interview readiness self-assessment")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Answer the questions and see your results (default)
    Take {
        /// Also write a text report into the report directory
        #[arg(long)]
        report: bool,
    },
    /// List past results, newest first
    History,
    /// Delete all past results
    Clear,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "readiness check failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let config = AppConfig::load()?;
    if let Err(e) = telemetry::init(&config.log_level) {
        eprintln!("{}", e);
    }
    let engine = readiness_check::standard()?;
    let mut store = JsonFileHistory::new(&config.history_path);

    match args.command.unwrap_or(Command::Take { report: false }) {
        Command::Take {
            report: write_report,
        } => {
            let answers = ask(engine, stdin().lock())?;
            let result = engine.score(&answers);
            print_result(engine, &result);

            history::record(&mut store, result.clone(), Utc::now())?;
            let entries = store.read_all();
            if let Some(trend) = trend(&entries) {
                println!("Compared with your last attempt: {}", describe(trend));
            }

            if write_report {
                let path = report::export(
                    &result,
                    engine.catalog(),
                    &config.report_dir,
                    Local::now().date_naive(),
                )?;
                println!("Report written to {}", path.display());
            }
        }
        Command::History => {
            let entries = store.read_all();
            if entries.is_empty() {
                println!("No past assessments.");
            }
            for entry in &entries {
                println!(
                    "{}  {:>3}/100  {}",
                    format_date(&entry.date),
                    entry.result.overall_score,
                    entry.result.readiness_level.label()
                );
            }
            if let Some(trend) = trend(&entries) {
                println!("Trend: {}", describe(trend));
            }
        }
        Command::Clear => {
            store.clear()?;
            println!("History cleared.");
        }
    }
    Ok(())
}

fn ask(engine: &Engine, mut input: impl BufRead) -> Result<Answers, Error> {
    let mut buffer = String::new();
    let mut answers = Answers::new();
    let questions = engine.catalog().questions();

    for (index, question) in questions.iter().enumerate() {
        println!(
            "[{}/{}] {}",
            index + 1,
            questions.len(),
            engine.catalog().label(question.category)
        );
        println!("{}", question.text);
        for option in &question.options {
            match option.description {
                Some(ref description) => {
                    println!("  {} => {} ({})", option.value, option.label, description)
                }
                None => println!("  {} => {}", option.value, option.label),
            }
        }
        loop {
            buffer.clear();
            if input.read_line(&mut buffer)? == 0 {
                // input closed; remaining questions stay unanswered
                return Ok(answers);
            }
            match store_answer(buffer.trim(), engine, &question.id, &mut answers) {
                Ok(()) => break,
                Err(_) => println!("Please answer with one of the listed numbers."),
            }
        }
        println!();
    }
    Ok(answers)
}

fn store_answer(
    value: &str,
    engine: &Engine,
    question_id: &str,
    answers: &mut Answers,
) -> Result<(), Error> {
    let value = value.parse::<u8>().map_err(|_| Error::IllegalAnswer {
        question: question_id.to_string(),
        value: value.to_string(),
    })?;
    answers.insert(engine.catalog(), question_id, value)
}

fn print_result(engine: &Engine, result: &AssessmentResult) {
    println!(
        "Overall readiness: {}/100 ({})",
        result.overall_score,
        result.readiness_level.label()
    );
    println!("Estimated prep time: {}", result.estimated_prep_time);
    println!();
    for cs in &result.category_scores {
        println!(
            "{:<22} {:>3}%  {}",
            engine.catalog().label(cs.category),
            cs.score,
            cs.feedback
        );
    }
    println!();
    println!("Next steps:");
    for (index, step) in result.next_steps.iter().enumerate() {
        println!("  {}. {}", index + 1, step);
    }
}

fn describe(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "improving",
        Trend::Down => "declining",
        Trend::Stable => "steady",
    }
}
