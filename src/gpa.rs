use std::collections::HashSet;

use tracing::debug;

use crate::{error::GpaError, grades::GradeTable, utils::is_subject_name};

pub const MIN_CREDIT: i64 = 1;
pub const MAX_CREDIT: i64 = 4;

/// One subject as typed into the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectRow {
    pub subject: String,
    pub credit: String,
    pub grade: Option<String>,
}

impl SubjectRow {
    pub fn new(subject: &str, credit: &str, grade: &str) -> Self {
        SubjectRow {
            subject: subject.to_string(),
            credit: credit.to_string(),
            grade: Some(grade.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub subject: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpaResult {
    pub gpa: f64,
    pub total_points: f64,
    pub total_credits: u32,
    pub contributions: Vec<Contribution>,
}

impl GpaResult {
    pub fn display_gpa(&self) -> String {
        format!("{:.4}", self.gpa)
    }
}

/// Credit-weighted average of the rows' grade points.
///
/// The first invalid row aborts the calculation. An empty row set gives a GPA of 0.
pub fn compute_gpa<'a, I>(rows: I, grades: &GradeTable) -> Result<GpaResult, GpaError>
where
    I: IntoIterator<Item = &'a SubjectRow>,
{
    let mut seen = HashSet::new();
    let mut total_points = 0.0;
    let mut total_credits = 0u32;
    let mut contributions = vec![];

    for row in rows {
        let subject = row.subject.trim();

        if !seen.insert(subject) {
            return Err(GpaError::DuplicateSubject(subject.to_string()));
        }
        if !is_subject_name(subject) {
            return Err(GpaError::InvalidSubjectName(subject.to_string()));
        }

        let credit = row
            .credit
            .trim()
            .parse::<i64>()
            .map_err(|_| GpaError::InvalidCredit(subject.to_string()))?;
        if !(MIN_CREDIT..=MAX_CREDIT).contains(&credit) {
            return Err(GpaError::CreditOutOfRange(subject.to_string()));
        }

        let point = row
            .grade
            .as_deref()
            .and_then(|label| grades.point(label))
            .ok_or_else(|| GpaError::MissingGrade(subject.to_string()))?;

        let points = credit as f64 * point;
        total_points += points;
        total_credits += credit as u32;
        contributions.push(Contribution {
            subject: subject.to_string(),
            points,
        });
    }

    let gpa = if total_credits > 0 {
        total_points / total_credits as f64
    } else {
        0.0
    };
    debug!(gpa, total_credits, subjects = contributions.len(), "computed gpa");

    Ok(GpaResult {
        gpa,
        total_points,
        total_credits,
        contributions,
    })
}
