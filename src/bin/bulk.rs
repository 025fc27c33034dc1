use clap::Parser;
use readiness_check::{read_bulk, Error};
use std::fs::File;
use std::io::BufReader;

/// Score every respondent in a CSV file.
#[derive(Parser)]
struct Args {
    path: String,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    let engine = readiness_check::standard()?;
    let reader = BufReader::new(File::open(&args.path)?);
    for row in read_bulk(engine.catalog(), reader) {
        match row {
            Ok((id, answers)) => {
                let result = engine.score(&answers);
                println!(
                    "id = {}, score = {}, level = {}, prep_time = {}",
                    id, result.overall_score, result.readiness_level, result.estimated_prep_time
                );
            }
            Err(e) => {
                eprintln!("skipped row: {}", e);
            }
        }
    }
    Ok(())
}
