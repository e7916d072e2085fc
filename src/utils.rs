pub fn format_point(point: f64) -> String {
    format!("{:.4}", point)
}

/// Letters and spaces only, at least one letter.
pub fn is_subject_name(name: &str) -> bool {
    let mut letters = name.chars().filter(|c| *c != ' ').peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}
