use std::{fmt, io};

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    EmptyFilename,
    Malformed { line: usize, content: String },
    InvalidPoint { label: String, point: f64 },
    InvalidNumber { label: String, text: String },
    MissingLabel(String),
    OrderViolation { higher: String, lower: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "io error: {err}"),
            StoreError::EmptyFilename => write!(f, "Filename must be a non-empty string"),
            StoreError::Malformed { line, content } => {
                write!(f, "malformed grade file line {line}: {content:?}")
            }
            StoreError::InvalidPoint { label, point } => {
                write!(f, "Invalid grade point for {label}: {point}")
            }
            StoreError::InvalidNumber { label, text } => {
                write!(f, "Invalid grade point for {label}: {text:?} is not a number")
            }
            StoreError::MissingLabel(label) => write!(f, "Grade {label} is missing from the grade list"),
            StoreError::OrderViolation { higher, lower } => write!(
                f,
                "Invalid grade order: {higher} must be greater than or equal to {lower}."
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A row that stops a GPA calculation. Each variant names the offending subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpaError {
    DuplicateSubject(String),
    InvalidSubjectName(String),
    InvalidCredit(String),
    CreditOutOfRange(String),
    MissingGrade(String),
}

impl fmt::Display for GpaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpaError::DuplicateSubject(name) => write!(f, "Duplicate subject: {name}"),
            GpaError::InvalidSubjectName(name) => write!(
                f,
                "Subject names must contain only letters/spaces: {name}"
            ),
            GpaError::InvalidCredit(name) => {
                write!(f, "Invalid credit input for {name}. Must be an integer.")
            }
            GpaError::CreditOutOfRange(name) => write!(f, "Credit for {name} must be 1–4."),
            GpaError::MissingGrade(name) => write!(f, "Select a grade for {name}"),
        }
    }
}

impl std::error::Error for GpaError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    TooManyRows,
    LastRow,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::TooManyRows => write!(f, "Maximum of 10 subjects allowed."),
            FormError::LastRow => write!(f, "At least one subject must remain."),
        }
    }
}

impl std::error::Error for FormError {}
