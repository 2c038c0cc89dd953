//! Dotted-path expressions such as `message.entities[0].type`.

use crate::error::{ObjectError, ObjectResult};

/// One parsed operation in a path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Select a named field.
    Field(String),
    /// Select a sequence element by zero-based index.
    Index(usize),
}

/// Parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    steps: Vec<PathStep>,
}

impl FieldPath {
    /// Parses dotted field syntax with optional `[index]` selectors.
    ///
    /// Identifiers consist of ASCII alphanumerics and `_`. Every segment
    /// starts with an identifier, so the first step is always a field.
    pub fn parse(input: &str) -> ObjectResult<Self> {
        let invalid = || ObjectError::invalid_path(input);
        if input.is_empty() {
            return Err(invalid());
        }

        let bytes = input.as_bytes();
        let mut idx = 0_usize;
        let mut steps = Vec::new();

        while idx < bytes.len() {
            let start = idx;
            while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_') {
                idx += 1;
            }
            if idx == start {
                return Err(invalid());
            }
            steps.push(PathStep::Field(input[start..idx].to_owned()));

            while idx < bytes.len() && bytes[idx] == b'[' {
                idx += 1;
                let n_start = idx;
                while idx < bytes.len() && bytes[idx].is_ascii_digit() {
                    idx += 1;
                }
                if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
                    return Err(invalid());
                }
                let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
                steps.push(PathStep::Index(number));
                idx += 1;
            }

            if idx < bytes.len() {
                if bytes[idx] != b'.' {
                    return Err(invalid());
                }
                idx += 1;
                if idx >= bytes.len() {
                    return Err(invalid());
                }
            }
        }

        Ok(Self { steps })
    }

    /// Returns the parsed steps.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested() {
        let path = FieldPath::parse("a.b[0].c").unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Field("a".into()),
                PathStep::Field("b".into()),
                PathStep::Index(0),
                PathStep::Field("c".into()),
            ]
        );
    }

    #[test]
    fn test_parse_multi_index() {
        let path = FieldPath::parse("photo[1][12]").unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Field("photo".into()),
                PathStep::Index(1),
                PathStep::Index(12),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", ".a", "a.", "a..b", "a[", "a[x]", "a[-1]", "[0]", "a b", "a[0]b"] {
            assert_eq!(
                FieldPath::parse(input),
                Err(ObjectError::invalid_path(input)),
                "input {input:?}"
            );
        }
    }
}
