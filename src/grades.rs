use crate::error::{StoreError, StoreResult};

pub const MIN_POINT: f64 = 0.0;
pub const MAX_POINT: f64 = 4.0;

pub const DEFAULT_GRADES: [(&str, f64); 8] = [
    ("A", 4.0),
    ("A-", 3.75),
    ("B+", 3.5),
    ("B", 3.0),
    ("B-", 2.75),
    ("C+", 2.5),
    ("C", 2.0),
    ("F", 0.0),
];

/// Labels from best to worst. Points must not increase along this order.
pub const GRADE_ORDER: [&str; 8] = ["A", "A-", "B+", "B", "B-", "C+", "C", "F"];

/// Letter grade to grade point, kept in insertion order.
///
/// Every point held by a table is finite and within `MIN_POINT..=MAX_POINT`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    entries: Vec<(String, f64)>,
}

impl GradeTable {
    pub fn empty() -> GradeTable {
        GradeTable { entries: vec![] }
    }

    pub fn defaults() -> GradeTable {
        GradeTable {
            entries: DEFAULT_GRADES
                .iter()
                .map(|(label, point)| (label.to_string(), *point))
                .collect(),
        }
    }

    pub fn from_pairs<I, S>(pairs: I) -> StoreResult<GradeTable>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table = GradeTable::empty();
        for (label, point) in pairs {
            table.insert(label.into(), point)?;
        }
        Ok(table)
    }

    /// Adds or replaces a grade. A replaced label keeps its position.
    pub fn insert(&mut self, label: String, point: f64) -> StoreResult<()> {
        check_point(&label, point)?;

        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = point,
            None => self.entries.push((label, point)),
        }
        Ok(())
    }

    pub fn point(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, point)| *point)
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(label, point)| (label.as_str(), *point))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn check_point(label: &str, point: f64) -> StoreResult<()> {
    if !point.is_finite() || !(MIN_POINT..=MAX_POINT).contains(&point) {
        return Err(StoreError::InvalidPoint {
            label: label.to_string(),
            point,
        });
    }
    Ok(())
}

/// Checks that points never go up when walking `GRADE_ORDER`.
pub fn validate_order(table: &GradeTable) -> StoreResult<()> {
    for pair in GRADE_ORDER.windows(2) {
        let (higher, lower) = (pair[0], pair[1]);
        let higher_point = table
            .point(higher)
            .ok_or_else(|| StoreError::MissingLabel(higher.to_string()))?;
        let lower_point = table
            .point(lower)
            .ok_or_else(|| StoreError::MissingLabel(lower.to_string()))?;

        if higher_point < lower_point {
            return Err(StoreError::OrderViolation {
                higher: higher.to_string(),
                lower: lower.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_grade_order() {
        let table = GradeTable::defaults();
        assert_eq!(table.labels(), GRADE_ORDER.to_vec());
        assert_eq!(table.point("B-"), Some(2.75));
        assert!(validate_order(&table).is_ok());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut table = GradeTable::defaults();
        table.insert("B".into(), 3.25).unwrap();
        assert_eq!(table.len(), 8);
        assert_eq!(table.labels()[3], "B");
        assert_eq!(table.point("B"), Some(3.25));
    }

    #[test]
    fn out_of_range_points_are_rejected() {
        for bad in [-0.5, 4.01, f64::NAN, f64::INFINITY] {
            let err = GradeTable::from_pairs(vec![("A", bad)]).unwrap_err();
            assert!(matches!(err, StoreError::InvalidPoint { .. }));
        }
        assert!(GradeTable::from_pairs(vec![("A", 0.0), ("B", 4.0)]).is_ok());
    }

    #[test]
    fn order_violation_names_the_pair() {
        let mut table = GradeTable::defaults();
        table.insert("B".into(), 2.5).unwrap();

        match validate_order(&table) {
            Err(StoreError::OrderViolation { higher, lower }) => {
                assert_eq!(higher, "B");
                assert_eq!(lower, "B-");
            }
            other => panic!("expected order violation, got {other:?}"),
        }
    }

    #[test]
    fn equal_neighbours_are_allowed() {
        let mut table = GradeTable::defaults();
        table.insert("A-".into(), 4.0).unwrap();
        assert!(validate_order(&table).is_ok());
    }

    #[test]
    fn missing_label_fails_validation() {
        let table = GradeTable::from_pairs(vec![("A", 4.0), ("B", 3.0)]).unwrap();
        assert!(matches!(
            validate_order(&table),
            Err(StoreError::MissingLabel(label)) if label == "A-"
        ));
    }
}
