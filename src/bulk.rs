use std::io::Read;

use csv::StringRecord;

use crate::answers::Answers;
use crate::catalog::Catalog;
use crate::{Error, Result};

/// Reads respondents from CSV.
///
/// The header row is `id` followed by question ids; each later row holds a respondent id and
/// one option value per question. Empty cells are left unanswered. Rows with values that are
/// not options of their question come back as errors without stopping the remaining rows.
pub fn read_bulk<'a, R: Read + 'a>(
    catalog: &'a Catalog,
    reader: R,
) -> impl Iterator<Item = Result<(String, Answers)>> + 'a {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut pending = Some(reader.headers().cloned().map_err(Error::from));
    let mut records = reader.into_records();
    let mut headers: Option<StringRecord> = None;

    std::iter::from_fn(move || {
        match pending.take() {
            Some(Ok(row)) => headers = Some(row),
            Some(Err(e)) => return Some(Err(e)),
            None => {}
        }
        let headers = headers.as_ref()?;
        let row = records.next()?;
        Some(
            row.map_err(Error::from)
                .and_then(|row| parse_row(catalog, headers, &row)),
        )
    })
}

fn parse_row(
    catalog: &Catalog,
    headers: &StringRecord,
    row: &StringRecord,
) -> Result<(String, Answers)> {
    let id = row.get(0).unwrap_or_default().to_string();
    let mut answers = Answers::new();
    for (question_id, cell) in headers.iter().zip(row.iter()).skip(1) {
        if cell.is_empty() {
            continue;
        }
        let value = cell.parse::<u8>().map_err(|_| Error::IllegalAnswer {
            question: question_id.to_string(),
            value: cell.to_string(),
        })?;
        answers.insert(catalog, question_id, value)?;
    }
    Ok((id, answers))
}
