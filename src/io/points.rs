//! Sample point ingestion.
//!
//! Two sources feed the engine:
//!
//! - a two-column CSV file (`x,y` per line, optional `x,y` header)
//! - repeated inline `--point x,y` flags
//!
//! Parsing raw text into numbers happens here, before the engine: the fitters
//! assume already-numeric input. Row-level validation errors carry the file
//! line number for a usable message.

use std::fs;
use std::path::Path;

use crate::domain::SamplePoint;
use crate::error::AppError;

/// Read sample points from a two-column CSV file.
pub fn read_points_csv(path: &Path) -> Result<Vec<SamplePoint>, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;

    let mut points = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        // Tolerate a header row on the first non-empty line.
        if points.is_empty() && is_header(trimmed) {
            continue;
        }
        let point = parse_pair(trimmed).map_err(|reason| {
            AppError::new(
                2,
                format!("{}:{line_no}: {reason}", path.display()),
            )
        })?;
        points.push(point);
    }

    if points.is_empty() {
        return Err(AppError::new(
            2,
            format!("No sample points found in '{}'.", path.display()),
        ));
    }
    Ok(points)
}

/// Parse inline `--point` values (`x,y`).
pub fn parse_inline_points(values: &[String]) -> Result<Vec<SamplePoint>, AppError> {
    values
        .iter()
        .map(|v| {
            parse_pair(v).map_err(|reason| AppError::new(2, format!("Invalid --point '{v}': {reason}")))
        })
        .collect()
}

fn is_header(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    let mut fields = lower.split(',').map(str::trim);
    matches!((fields.next(), fields.next()), (Some("x"), Some("y")))
}

fn parse_pair(text: &str) -> Result<SamplePoint, String> {
    let mut fields = text.split(',').map(str::trim);
    let (Some(xs), Some(ys), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err("expected exactly two comma-separated values".to_string());
    };
    let x: f64 = xs
        .parse()
        .map_err(|_| format!("invalid x value '{xs}'"))?;
    let y: f64 = ys
        .parse()
        .map_err(|_| format!("invalid y value '{ys}'"))?;
    Ok(SamplePoint::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_accepts_floats_and_negatives() {
        let p = parse_pair("1.5, -2.25").unwrap();
        assert_eq!(p.x, 1.5);
        assert_eq!(p.y, -2.25);
    }

    #[test]
    fn parse_pair_rejects_wrong_arity_and_garbage() {
        assert!(parse_pair("1.0").is_err());
        assert!(parse_pair("1,2,3").is_err());
        assert!(parse_pair("a,b").is_err());
    }

    #[test]
    fn inline_points_parse_in_order() {
        let values = vec!["1,2".to_string(), "3,4".to_string()];
        let points = parse_inline_points(&values).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].x, 3.0);
        assert_eq!(points[1].y, 4.0);
    }

    #[test]
    fn header_row_is_recognized() {
        assert!(is_header("x,y"));
        assert!(is_header("X, Y"));
        assert!(!is_header("1,2"));
    }
}
