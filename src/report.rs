//! Plain-text readiness report.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::catalog::Catalog;
use crate::scoring::AssessmentResult;
use crate::Result;

const TITLE: &str = "Interview Readiness Report";
const FOOTER: &str = "Interview Readiness Assessment Tool - Helping you prepare for success";

/// `interview-readiness-report-YYYY-MM-DD.txt`
pub fn file_name(date: NaiveDate) -> String {
    format!("interview-readiness-report-{}.txt", date.format("%Y-%m-%d"))
}

pub fn render(result: &AssessmentResult, catalog: &Catalog, generated_on: NaiveDate) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, result, catalog, generated_on);
    out
}

fn write_report(
    out: &mut String,
    result: &AssessmentResult,
    catalog: &Catalog,
    generated_on: NaiveDate,
) -> std::fmt::Result {
    writeln!(out, "{}", TITLE)?;
    writeln!(out, "Generated on {}", generated_on.format("%B %-d, %Y"))?;
    writeln!(out)?;

    writeln!(out, "Overall Interview Readiness Score: {} / 100", result.overall_score)?;
    writeln!(out, "{}", result.readiness_level.label())?;
    writeln!(out, "Estimated prep time: {}", result.estimated_prep_time)?;
    writeln!(out)?;

    writeln!(out, "Category Breakdown")?;
    for cs in &result.category_scores {
        writeln!(out)?;
        writeln!(out, "{} - {}%", catalog.label(cs.category), cs.score)?;
        writeln!(out, "  {}", cs.feedback)?;
        if !cs.strengths.is_empty() {
            writeln!(out, "  Strengths:")?;
            for strength in &cs.strengths {
                writeln!(out, "    * {}", strength)?;
            }
        }
        if !cs.improvements.is_empty() {
            writeln!(out, "  Improvements:")?;
            for improvement in &cs.improvements {
                writeln!(out, "    * {}", improvement)?;
            }
        }
    }
    writeln!(out)?;

    writeln!(out, "Key Strengths")?;
    for strength in result
        .category_scores
        .iter()
        .filter_map(|cs| cs.strengths.first())
    {
        writeln!(out, "  * {}", strength)?;
    }
    writeln!(out)?;

    writeln!(out, "Areas to Improve")?;
    for improvement in result
        .category_scores
        .iter()
        .filter_map(|cs| cs.improvements.first())
    {
        writeln!(out, "  * {}", improvement)?;
    }
    writeln!(out)?;

    writeln!(out, "Your Action Plan")?;
    for (index, step) in result.next_steps.iter().enumerate() {
        writeln!(out, "  {}. {}", index + 1, step)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", FOOTER)
}

/// Writes the report for `date` into `dir` and returns the file path.
pub fn export(
    result: &AssessmentResult,
    catalog: &Catalog,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(date));
    fs::write(&path, render(result, catalog, date))?;
    info!(path = %path.display(), "exported readiness report");
    Ok(path)
}
