//! Genre labels are free text, stored on venues and artists as a single
//! comma-delimited column.

const DELIMITER: char = ',';

/// Trim labels, drop blanks and repeats. Order of first appearance is kept.
pub fn normalize<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        // The delimiter cannot survive a round trip through the column
        let label = label.as_ref().replace(DELIMITER, " ");
        let label = label.trim();
        if !label.is_empty() && !out.iter().any(|g| g == label) {
            out.push(label.to_string());
        }
    }
    out
}

pub fn encode<S: AsRef<str>>(labels: &[S]) -> String {
    normalize(labels).join(&DELIMITER.to_string())
}

pub fn decode(stored: &str) -> Vec<String> {
    normalize(stored.split(DELIMITER))
}
