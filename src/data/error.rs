use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ConvertError – everything that can go wrong converting one file
// ---------------------------------------------------------------------------

/// Failure while converting a single `.odt` file.
///
/// Every variant is local to one file; a batch keeps going with the next one.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A data line did not split into the fixed number of columns.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A numeric column holds something that is not a finite float.
    #[error("line {line}: column '{column}' value '{value}' is not a finite number")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// The source is too short to contain the header and footer lines.
    #[error("source has {lines} lines, fewer than the {required} header/footer lines")]
    Truncated { lines: usize, required: usize },

    /// The file name promises an angle but the token before the suffix is not an integer.
    #[error("'{identifier}': angle token '{token}' is not an integer")]
    AngleFormat { identifier: String, token: String },

    /// Normalizing the field axis would produce an infinite or NaN value.
    #[error("field axis undefined at {angle}° (row {row}): division by -cos θ = {divisor:e}")]
    NumericDomain { angle: i32, row: usize, divisor: f64 },

    /// Nothing to plot.
    #[error("table has no data rows")]
    EmptyTable,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("rendering failed: {0}")]
    Render(String),
}

/// Coarse error category, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    AngleFormat,
    NumericDomain,
    Io,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::FieldCount { .. }
            | ConvertError::InvalidNumber { .. }
            | ConvertError::Truncated { .. }
            | ConvertError::EmptyTable => ErrorKind::Format,
            ConvertError::AngleFormat { .. } => ErrorKind::AngleFormat,
            ConvertError::NumericDomain { .. } => ErrorKind::NumericDomain,
            ConvertError::Io { .. } | ConvertError::Csv(_) | ConvertError::Render(_) => {
                ErrorKind::Io
            }
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let e = ConvertError::FieldCount {
            line: 6,
            expected: 19,
            found: 3,
        };
        assert_eq!(e.kind(), ErrorKind::Format);

        let e = ConvertError::NumericDomain {
            angle: 90,
            row: 0,
            divisor: 0.0,
        };
        assert_eq!(e.kind(), ErrorKind::NumericDomain);

        let e = ConvertError::io("/nope", std::io::Error::other("denied"));
        assert_eq!(e.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_messages_name_the_line() {
        let e = ConvertError::InvalidNumber {
            line: 8,
            column: "Bx",
            value: "abc".into(),
        };
        assert_eq!(
            e.to_string(),
            "line 8: column 'Bx' value 'abc' is not a finite number"
        );
    }
}
