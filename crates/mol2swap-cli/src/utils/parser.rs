use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid combination size '{0}'. Expected a non-negative integer.")]
    InvalidSize(String),

    #[error("Invalid size range '{0}'. Expected 'start-end' with start <= end (e.g. '1-3').")]
    InvalidRange(String),

    #[error("Size specification cannot be empty.")]
    Empty,
}

/// Parses a combination size specification such as `2`, `1-3` or `1,3-4`.
///
/// Sizes are returned in the order written; ranges expand ascending.
pub fn parse_size_spec(spec: &str) -> Result<Vec<usize>, ParseError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut sizes = Vec::new();
    for part in spec.split(',').map(str::trim) {
        match part.split_once('-') {
            Some((start, end)) => {
                let invalid = || ParseError::InvalidRange(part.to_string());
                let start: usize = start.trim().parse().map_err(|_| invalid())?;
                let end: usize = end.trim().parse().map_err(|_| invalid())?;
                if start > end {
                    return Err(invalid());
                }
                sizes.extend(start..=end);
            }
            None => {
                let size = part
                    .parse()
                    .map_err(|_| ParseError::InvalidSize(part.to_string()))?;
                sizes.push(size);
            }
        }
    }
    Ok(sizes)
}

/// Parses several specifications and concatenates their sizes.
pub fn parse_size_specs<S: AsRef<str>>(specs: &[S]) -> Result<Vec<usize>, ParseError> {
    let mut sizes = Vec::new();
    for spec in specs {
        sizes.extend(parse_size_spec(spec.as_ref())?);
    }
    Ok(sizes)
}
