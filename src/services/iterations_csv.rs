use std::io;

use thiserror::Error;

use crate::domain::iteration::{Iteration, IterationPlan};

const HEADER: [&str; 5] = [
    "Iteration Number",
    "Days",
    "Team Size",
    "Total Hours",
    "Is Current",
];

#[derive(Error, Debug)]
pub enum IterationsCsvError {
    #[error("failed to read iterations csv: {0}")]
    Read(#[from] io::Error),
    #[error("failed to write iterations csv: {0}")]
    Write(#[source] io::Error),
    #[error("failed to parse iterations csv: {0}")]
    Parse(#[from] csv::Error),
    #[error("invalid {column} value on line {line}: {value:?}")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("no valid iterations found in csv file")]
    NoIterations,
}

pub async fn export_iterations_to_csv_file(
    path: &str,
    plan: &IterationPlan,
) -> Result<(), IterationsCsvError> {
    let csv = serialize_iterations_to_csv(plan)?;
    tokio::fs::write(path, csv)
        .await
        .map_err(IterationsCsvError::Write)?;
    Ok(())
}

pub async fn import_iterations_from_csv_file(
    path: &str,
) -> Result<IterationPlan, IterationsCsvError> {
    let contents = tokio::fs::read_to_string(path).await?;
    deserialize_iterations_from_csv_str(&contents)
}

pub fn serialize_iterations_to_csv(plan: &IterationPlan) -> Result<String, IterationsCsvError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for (iteration, is_current) in plan.flagged() {
        writer.write_record([
            iteration.number.to_string(),
            iteration.days.to_string(),
            iteration.team_size.to_string(),
            iteration.hours().to_string(),
            is_current.to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| IterationsCsvError::Write(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Rows without a numeric ordinal are skipped. Any other malformed cell
/// rejects the whole file, as does a file without a single valid row.
pub fn deserialize_iterations_from_csv_str(
    input: &str,
) -> Result<IterationPlan, IterationsCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        let number = match record.get(0).map(str::trim).and_then(|v| v.parse::<u32>().ok()) {
            Some(number) => number,
            None => {
                tracing::debug!(line, "skipping iteration row without ordinal");
                continue;
            }
        };

        let cell = |index: usize| record.get(index).unwrap_or("").trim();
        let days = parse_count(cell(1), line, HEADER[1])?;
        let team_size = parse_count(cell(2), line, HEADER[2])?;
        let total_hours = match cell(3) {
            "" => None,
            text => Some(parse_hours(text, line)?),
        };
        let is_current = cell(4) == "true";

        rows.push((
            Iteration {
                number,
                days,
                team_size,
                total_hours,
            },
            is_current,
        ));
    }

    if rows.is_empty() {
        return Err(IterationsCsvError::NoIterations);
    }
    Ok(IterationPlan::from_flagged(rows))
}

fn parse_cell<T: std::str::FromStr>(
    text: &str,
    line: u64,
    column: &'static str,
) -> Result<T, IterationsCsvError> {
    text.parse::<T>()
        .map_err(|_| IterationsCsvError::InvalidValue {
            line,
            column,
            value: text.to_string(),
        })
}

fn parse_count(text: &str, line: u64, column: &'static str) -> Result<u32, IterationsCsvError> {
    match parse_cell::<u32>(text, line, column)? {
        0 => Err(IterationsCsvError::InvalidValue {
            line,
            column,
            value: text.to_string(),
        }),
        count => Ok(count),
    }
}

fn parse_hours(text: &str, line: u64) -> Result<f64, IterationsCsvError> {
    match parse_cell::<f64>(text, line, HEADER[3])? {
        hours if hours.is_finite() && hours >= 0.0 => Ok(hours),
        _ => Err(IterationsCsvError::InvalidValue {
            line,
            column: HEADER[3],
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_iteration;
    use assert_fs::prelude::*;

    fn sample_plan() -> IterationPlan {
        let mut no_hours = build_iteration(3, 0.0);
        no_hours.total_hours = None;
        IterationPlan::from_flagged(vec![
            (build_iteration(1, 80.0), false),
            (build_iteration(2, 72.5), true),
            (no_hours, false),
        ])
    }

    #[test]
    fn serialize_iterations_writes_one_row_per_iteration() {
        let csv = serialize_iterations_to_csv(&sample_plan()).unwrap();

        assert_eq!(
            csv,
            "Iteration Number,Days,Team Size,Total Hours,Is Current\n\
             1,5,2,80,false\n2,5,2,72.5,true\n3,5,2,0,false\n"
        );
    }

    #[test]
    fn round_trip_keeps_ordinals_hours_and_current_flag() {
        let plan = sample_plan();
        let csv = serialize_iterations_to_csv(&plan).unwrap();
        let imported = deserialize_iterations_from_csv_str(&csv).unwrap();

        assert_eq!(imported.len(), plan.len());
        assert_eq!(imported.current_index(), plan.current_index());
        for (original, restored) in plan.iterations().iter().zip(imported.iterations()) {
            assert_eq!(original.number, restored.number);
            assert_eq!(original.days, restored.days);
            assert_eq!(original.team_size, restored.team_size);
            assert_eq!(original.hours(), restored.hours());
        }
    }

    #[test]
    fn rows_without_ordinal_are_skipped() {
        let csv = "Iteration Number,Days,Team Size,Total Hours,Is Current\n\
                   ,5,2,80,false\n1,10,4,300,TRUE\n";

        let plan = deserialize_iterations_from_csv_str(csv).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.iterations()[0].days, 10);
        assert_eq!(plan.iterations()[0].hours(), 300.0);
        // Only the literal lowercase "true" marks the current iteration.
        assert_eq!(plan.current_index(), None);
    }

    #[test]
    fn header_only_file_is_rejected() {
        let csv = "Iteration Number,Days,Team Size,Total Hours,Is Current\n";
        let error = deserialize_iterations_from_csv_str(csv).expect_err("expected rejection");
        assert!(matches!(error, IterationsCsvError::NoIterations));
    }

    #[test]
    fn malformed_days_reject_the_file() {
        let csv = "Iteration Number,Days,Team Size,Total Hours,Is Current\n1,five,2,80,false\n";

        let error = deserialize_iterations_from_csv_str(csv).expect_err("expected rejection");

        match error {
            IterationsCsvError::InvalidValue { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Days");
                assert_eq!(value, "five");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_team_size_rejects_the_file() {
        let csv = "Iteration Number,Days,Team Size,Total Hours,Is Current\n1,5,0,80,false\n";

        let error = deserialize_iterations_from_csv_str(csv).expect_err("expected rejection");

        assert!(matches!(
            error,
            IterationsCsvError::InvalidValue { column: "Team Size", .. }
        ));
    }

    #[tokio::test]
    async fn export_to_missing_directory_reports_write_failure() {
        let dir = assert_fs::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("iterations.csv");

        let error = export_iterations_to_csv_file(path.to_str().unwrap(), &sample_plan())
            .await
            .expect_err("expected write failure");

        assert!(matches!(error, IterationsCsvError::Write(_)));
        assert!(error.to_string().starts_with("failed to write iterations csv"));
    }

    #[tokio::test]
    async fn export_then_import_file_restores_plan() {
        let file = assert_fs::NamedTempFile::new("iterations.csv").unwrap();
        let path = file.path().to_str().unwrap();
        let plan = IterationPlan::from_flagged(vec![
            (build_iteration(1, 80.0), true),
            (build_iteration(2, 64.0), false),
        ]);

        export_iterations_to_csv_file(path, &plan).await.unwrap();
        let imported = import_iterations_from_csv_file(path).await.unwrap();

        assert_eq!(imported, plan);
        file.assert(predicates::str::contains("1,5,2,80,true"));
    }
}
