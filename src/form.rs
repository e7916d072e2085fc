use crate::{error::FormError, gpa::SubjectRow};

pub const MAX_ROWS: usize = 10;

pub struct FormRow {
    pub id: u64,
    pub row: SubjectRow,
}

/// The subject rows currently on screen. Never fewer than one.
pub struct SubjectForm {
    rows: Vec<FormRow>,
    next_id: u64,
}

impl SubjectForm {
    pub fn new() -> SubjectForm {
        let mut form = SubjectForm {
            rows: vec![],
            next_id: 0,
        };
        form.push_empty();
        form
    }

    fn push_empty(&mut self) {
        self.rows.push(FormRow {
            id: self.next_id,
            row: SubjectRow::default(),
        });
        self.next_id += 1;
    }

    pub fn add_row(&mut self) -> Result<(), FormError> {
        if self.rows.len() >= MAX_ROWS {
            return Err(FormError::TooManyRows);
        }
        self.push_empty();
        Ok(())
    }

    pub fn remove_row(&mut self, id: u64) -> Result<(), FormError> {
        if self.rows.len() <= 1 {
            return Err(FormError::LastRow);
        }
        self.rows.retain(|r| r.id != id);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.rows.clear();
        self.push_empty();
    }

    pub fn rows(&self) -> &[FormRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [FormRow] {
        &mut self.rows
    }

    pub fn subjects(&self) -> impl Iterator<Item = &SubjectRow> {
        self.rows.iter().map(|r| &r.row)
    }
}
