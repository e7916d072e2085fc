use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::{StoreError, StoreResult},
    grades::{validate_order, GradeTable},
    utils::format_point,
};

pub const DEFAULT_GRADE_FILE: &str = "grades.txt";

/// The grade table together with the text file it lives in.
pub struct GradeFile {
    path: PathBuf,
    grades: GradeTable,
}

impl GradeFile {
    /// Opens `path`, writing the default table there if it does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<GradeFile> {
        let path = path.as_ref();
        if path.to_string_lossy().trim().is_empty() {
            return Err(StoreError::EmptyFilename);
        }

        let mut file = GradeFile {
            path: path.to_path_buf(),
            grades: GradeTable::empty(),
        };
        file.load()?;

        Ok(file)
    }

    pub fn load(&mut self) -> StoreResult<()> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "grade file not found, writing defaults");
                self.grades = GradeTable::defaults();
                self.save()?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        self.grades = parse_grades(&contents)?;
        info!(path = %self.path.display(), grades = self.grades.len(), "loaded grade file");

        Ok(())
    }

    pub fn save(&self) -> StoreResult<()> {
        write_grades(&self.path, &self.grades)
    }

    /// Replaces the table without touching the file.
    pub fn set_grades<I, S>(&mut self, pairs: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.grades = GradeTable::from_pairs(pairs)?;
        Ok(())
    }

    /// Applies the grade editor's text fields. Nothing changes, on disk or in
    /// memory, unless every field parses and the order check passes.
    pub fn apply_edit(&mut self, fields: &[(String, String)]) -> StoreResult<()> {
        let mut edited = GradeTable::empty();
        for (label, text) in fields {
            let point = text
                .trim()
                .parse::<f64>()
                .map_err(|_| StoreError::InvalidNumber {
                    label: label.clone(),
                    text: text.clone(),
                })?;
            edited.insert(label.clone(), point)?;
        }
        validate_order(&edited)?;

        write_grades(&self.path, &edited)?;
        self.grades = edited;
        info!(path = %self.path.display(), "grade list updated");

        Ok(())
    }

    pub fn reset_to_default(&mut self) -> StoreResult<()> {
        let defaults = GradeTable::defaults();
        write_grades(&self.path, &defaults)?;
        self.grades = defaults;
        info!(path = %self.path.display(), "grade list reset to defaults");

        Ok(())
    }

    pub fn point(&self, label: &str) -> Option<f64> {
        self.grades.point(label)
    }

    pub fn labels(&self) -> Vec<String> {
        self.grades.labels()
    }

    pub fn grades(&self) -> &GradeTable {
        &self.grades
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_grades(contents: &str) -> StoreResult<GradeTable> {
    let mut table = GradeTable::empty();

    for (idx, line) in contents.lines().enumerate() {
        let malformed = || StoreError::Malformed {
            line: idx + 1,
            content: line.to_string(),
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [label, point] => {
                let point = point.parse::<f64>().map_err(|_| malformed())?;
                table
                    .insert(label.to_string(), point)
                    .map_err(|_| malformed())?;
            }
            _ => return Err(malformed()),
        }
    }

    Ok(table)
}

fn write_grades(path: &Path, grades: &GradeTable) -> StoreResult<()> {
    let mut out = String::new();
    for (label, point) in grades.iter() {
        out.push_str(&format!("{} {}\n", label, format_point(point)));
    }
    fs::write(path, out)?;
    debug!(path = %path.display(), grades = grades.len(), "wrote grade file");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grades::DEFAULT_GRADES;
    use tempfile::{tempdir, NamedTempFile};

    fn editor_fields(file: &GradeFile) -> Vec<(String, String)> {
        file.grades()
            .iter()
            .map(|(label, point)| (label.to_string(), format_point(point)))
            .collect()
    }

    #[test]
    fn missing_file_installs_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grades.txt");

        let file = GradeFile::open(&path).unwrap();
        assert_eq!(file.grades(), &GradeTable::defaults());

        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), DEFAULT_GRADES.len());
        assert_eq!(lines[0], "A 4.0000");
        assert_eq!(lines[1], "A- 3.7500");
        assert_eq!(lines[7], "F 0.0000");
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "A 3.9\nB 2.5\nF 0\n").unwrap();

        let mut file = GradeFile::open(tmp.path()).unwrap();
        assert_eq!(file.labels(), vec!["A", "B", "F"]);
        file.set_grades(vec![("A", 4.0), ("B", 3.125), ("C", 1.5)]).unwrap();
        file.save().unwrap();

        let reloaded = GradeFile::open(tmp.path()).unwrap();
        assert_eq!(reloaded.grades(), file.grades());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let tmp = NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "\nA 4.0\n   \nB\t3.0\n").unwrap();

        let file = GradeFile::open(tmp.path()).unwrap();
        assert_eq!(file.point("A"), Some(4.0));
        assert_eq!(file.point("B"), Some(3.0));
        assert_eq!(file.point("C"), None);
    }

    #[test]
    fn malformed_line_fails_the_load() {
        let tmp = NamedTempFile::new().unwrap();
        fs::write(tmp.path(), "A 4.0\nB+ three\n").unwrap();
        assert!(matches!(
            GradeFile::open(tmp.path()),
            Err(StoreError::Malformed { line: 2, .. })
        ));

        fs::write(tmp.path(), "A 4.0 extra\n").unwrap();
        assert!(matches!(
            GradeFile::open(tmp.path()),
            Err(StoreError::Malformed { line: 1, .. })
        ));

        fs::write(tmp.path(), "A 5.0\n").unwrap();
        assert!(matches!(
            GradeFile::open(tmp.path()),
            Err(StoreError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn empty_filename_is_rejected() {
        assert!(matches!(GradeFile::open(""), Err(StoreError::EmptyFilename)));
        assert!(matches!(GradeFile::open("   "), Err(StoreError::EmptyFilename)));
    }

    #[test]
    fn set_grades_keeps_old_table_on_bad_point() {
        let dir = tempdir().unwrap();
        let mut file = GradeFile::open(dir.path().join("grades.txt")).unwrap();

        let err = file.set_grades(vec![("A", 4.0), ("B", 4.5)]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidPoint { .. }));
        assert_eq!(file.grades(), &GradeTable::defaults());
    }

    #[test]
    fn order_violation_leaves_saved_table_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grades.txt");
        let mut file = GradeFile::open(&path).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let mut fields = editor_fields(&file);
        fields[3].1 = "2.5".into(); // B below B-
        let err = file.apply_edit(&fields).unwrap_err();

        assert!(matches!(err, StoreError::OrderViolation { .. }));
        assert_eq!(err.to_string(), "Invalid grade order: B must be greater than or equal to B-.");
        assert_eq!(file.grades(), &GradeTable::defaults());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn non_numeric_edit_is_rejected() {
        let dir = tempdir().unwrap();
        let mut file = GradeFile::open(dir.path().join("grades.txt")).unwrap();

        let mut fields = editor_fields(&file);
        fields[0].1 = "four".into();
        assert!(matches!(
            file.apply_edit(&fields),
            Err(StoreError::InvalidNumber { .. })
        ));
        assert_eq!(file.grades(), &GradeTable::defaults());
    }

    #[test]
    fn valid_edit_is_persisted_and_reset_restores_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grades.txt");
        let mut file = GradeFile::open(&path).unwrap();

        let mut fields = editor_fields(&file);
        fields[1].1 = " 3.8 ".into();
        file.apply_edit(&fields).unwrap();
        assert_eq!(file.point("A-"), Some(3.8));
        assert_eq!(GradeFile::open(&path).unwrap().point("A-"), Some(3.8));

        file.reset_to_default().unwrap();
        assert_eq!(file.grades(), &GradeTable::defaults());
        assert_eq!(GradeFile::open(&path).unwrap().grades(), &GradeTable::defaults());
    }
}
