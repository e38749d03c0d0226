//! Validation of `survey.tsv` question tables

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::reporter::Reporter;

pub const SURVEY_FILE: &str = "survey.tsv";

pub const REQUIRED_COLUMNS: [&str; 6] = [
    "question_type",
    "question_text",
    "required",
    "page_number",
    "option_text",
    "option_values",
];

pub const QUESTION_TYPES: [&str; 7] = [
    "instruction",
    "radio",
    "checkbox",
    "textfield",
    "textarea",
    "numeric",
    "table",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySummary {
    pub exp_id: String,
    pub questions: usize,
    pub pages: usize,
}

type Result<T> = std::result::Result<T, SurveyError>;

/// Validate `survey_repo/<exp_id>/survey.tsv`
pub fn validate_survey_table(
    exp_id: &str,
    survey_repo: &Path,
    reporter: &Reporter,
) -> Result<SurveySummary> {
    reporter.test(&format!("SURVEY: Experiment {}", exp_id));

    let result = check_table(exp_id, survey_repo);
    match &result {
        Ok(summary) => reporter.debug(&format!(
            "{} questions across {} pages in {}",
            summary.questions, summary.pages, exp_id
        )),
        Err(e) => reporter.failure(&e.to_string()),
    }
    result
}

fn check_table(exp_id: &str, survey_repo: &Path) -> Result<SurveySummary> {
    let path = survey_repo.join(exp_id).join(SURVEY_FILE);
    if !path.is_file() {
        return Err(SurveyError::MissingTable(path));
    }

    let content = fs::read_to_string(&path)?;
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty());

    let header: Vec<&str> = match lines.next() {
        Some((_, line)) => line.split('\t').map(str::trim).collect(),
        None => return Err(SurveyError::Empty(exp_id.to_string())),
    };

    let columns: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();
    for column in REQUIRED_COLUMNS {
        if !columns.contains_key(column) {
            return Err(SurveyError::MissingColumn {
                exp_id: exp_id.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut questions = 0;
    let mut pages = BTreeSet::new();

    for (line, row) in lines {
        let cells: Vec<&str> = row.split('\t').map(str::trim).collect();
        let invalid = |reason: String| SurveyError::InvalidRow {
            exp_id: exp_id.to_string(),
            line,
            reason,
        };

        if cells.len() != header.len() {
            return Err(invalid(format!(
                "expected {} columns, found {}",
                header.len(),
                cells.len()
            )));
        }
        let cell = |column: &str| cells[columns[column]];

        let question_type = cell("question_type");
        if !QUESTION_TYPES.contains(&question_type) {
            return Err(invalid(format!("unknown question_type '{}'", question_type)));
        }

        if !matches!(cell("required"), "0" | "1") {
            return Err(invalid("required must be 0 or 1".to_string()));
        }

        let page = cell("page_number")
            .parse::<u32>()
            .ok()
            .filter(|page| *page > 0)
            .ok_or_else(|| invalid("page_number must be a positive integer".to_string()))?;
        pages.insert(page);

        if matches!(question_type, "radio" | "checkbox") {
            let texts = split_options(cell("option_text"));
            let values = split_options(cell("option_values"));
            if texts.is_empty() || values.is_empty() {
                return Err(invalid(format!("{} questions need options", question_type)));
            }
            if texts.len() != values.len() {
                return Err(invalid(format!(
                    "{} option texts but {} option values",
                    texts.len(),
                    values.len()
                )));
            }
        }

        questions += 1;
    }

    if questions == 0 {
        return Err(SurveyError::Empty(exp_id.to_string()));
    }

    Ok(SurveySummary {
        exp_id: exp_id.to_string(),
        questions,
        pages: pages.len(),
    })
}

fn split_options(cell: &str) -> Vec<&str> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(',').map(str::trim).collect()
}
