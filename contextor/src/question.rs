//! Question normalization.

use crate::error::ContextorError;

/// Trims `raw` and makes it end with `?`.
///
/// The result is the cache key, so two questions hit the same entry only if
/// they normalize to the same string.
///
/// # Errors
/// [`ContextorError::Validation`] if the question is blank or longer than
/// `max_chars` characters after trimming.
pub fn normalize_question(raw: &str, max_chars: usize) -> Result<String, ContextorError> {
    let q = raw.trim();
    if q.is_empty() {
        return Err(ContextorError::Validation("question is empty".into()));
    }
    let chars = q.chars().count();
    if chars > max_chars {
        return Err(ContextorError::Validation(format!(
            "question is {chars} characters long, limit is {max_chars}"
        )));
    }

    let mut out = q.to_owned();
    if !out.ends_with('?') {
        out.push('?');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_appends_question_mark() {
        assert_eq!(
            normalize_question("  Is money important  \n", 100).unwrap(),
            "Is money important?"
        );
        assert_eq!(
            normalize_question("Is money important?", 100).unwrap(),
            "Is money important?"
        );
    }

    #[test]
    fn rejects_blank_and_overlong() {
        assert!(matches!(
            normalize_question(" \t\n", 100),
            Err(ContextorError::Validation(_))
        ));
        assert!(matches!(
            normalize_question("abcdef", 5),
            Err(ContextorError::Validation(_))
        ));
        assert!(normalize_question("abcde", 5).is_ok());
    }
}
