use crate::ir::JobKey;

/// Derive the job key from a free-text timesheet label.
///
/// The label is uppercased and stripped of hyphens, only the text before the first space is kept,
/// and a hyphen is inserted in front of the first digit. `"proj-123 kickoff"` becomes `PROJ-123`,
/// a label without digits like `"admin"` becomes `ADMIN`.
///
/// If the first token has no digits and the second one is all digits, the two are read as one key,
/// so `"proj 123 kickoff"` also becomes `PROJ-123` while `"admin 1:1 sync"` stays `ADMIN`.
pub fn normalize(label: &str) -> JobKey {
    let label = label.trim().to_uppercase().replace('-', "");
    let mut tokens = label.split(' ');
    let first = tokens.next().unwrap_or_default();
    let token = match tokens.next() {
        Some(second) if !contains_digit(first) && is_number(second) => {
            format!("{first}{second}")
        }
        _ => first.to_string(),
    };
    let key = match token.find(|c: char| c.is_ascii_digit()) {
        Some(digit_index) => format!("{}-{}", &token[..digit_index], &token[digit_index..]),
        None => token.to_string(),
    };
    JobKey::new(key)
}

fn contains_digit(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

fn is_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}
