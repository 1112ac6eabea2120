//! Instance-file validation and loading.
//!
//! Instance grammar:
//! - line 1: a single integer `N` with `1 <= N <= 100`,
//! - lines `2..=N+1`: exactly `N` whitespace-separated integers, each `0` or `1`,
//! - every diagonal entry is `0`.
//!
//! Checks run top to bottom and the first violation wins. Content after row `N` is ignored.

use crate::error::InstanceError;
use crate::graph::{MasProblem, Vertex};
use std::fs;
use std::path::Path;

/// Largest order accepted in an instance file.
pub const MAX_ORDER: usize = 100;

/// Diagnostic reported for a well-formed instance.
pub const INSTANCE_OK: &str = "instance ok";

// ============================================================================
// Public API
// ============================================================================

/// Validates instance text and returns the graph it describes, labelled `1..=N`.
///
/// # Errors
/// Returns the first grammar violation found; its `Display` is the user-facing
/// diagnostic.
pub fn validate_instance(text: &str) -> Result<MasProblem, InstanceError> {
    let mut lines = text.lines();

    let header: Vec<&str> = lines.next().unwrap_or("").split_whitespace().collect();
    if header.len() != 1 || !is_digits(header[0]) {
        return Err(InstanceError::Header);
    }
    let n = header[0]
        .parse::<usize>()
        .map_err(|_| InstanceError::OrderOutOfRange)?;
    check_order(n)?;

    let mut adj = Vec::with_capacity(n);
    for i in 0..n {
        let line = i + 2;
        let tokens: Vec<&str> = lines.next().unwrap_or("").split_whitespace().collect();
        if tokens.len() != n {
            return Err(InstanceError::RowShape { line });
        }
        let mut row = Vec::with_capacity(n);
        for token in tokens {
            if !is_digits(token) {
                return Err(InstanceError::RowShape { line });
            }
            match token.parse::<u8>() {
                Ok(x @ (0 | 1)) => row.push(x),
                _ => return Err(InstanceError::NonBinary),
            }
        }
        adj.push(row);
    }

    if (0..n).any(|i| adj[i][i] != 0) {
        return Err(InstanceError::SelfLoop);
    }

    Ok(MasProblem::new(adj))
}

/// Checks that `n` is an order the instance grammar accepts.
///
/// # Errors
/// Returns [`InstanceError::OrderOutOfRange`] unless `1 <= n <= MAX_ORDER`.
pub fn check_order(n: usize) -> Result<usize, InstanceError> {
    if (1..=MAX_ORDER).contains(&n) {
        Ok(n)
    } else {
        Err(InstanceError::OrderOutOfRange)
    }
}

/// Returns the diagnostic string for instance text: the first violation, or
/// [`INSTANCE_OK`].
pub fn diagnose(text: &str) -> String {
    match validate_instance(text) {
        Ok(_) => INSTANCE_OK.to_string(),
        Err(e) => e.to_string(),
    }
}

/// Reads and validates an instance file.
///
/// # Errors
/// Returns [`InstanceError::Io`] if the file cannot be read, otherwise the first
/// grammar violation.
pub fn validate_instance_file(path: impl AsRef<Path>) -> Result<MasProblem, InstanceError> {
    let text = read(path.as_ref())?;
    validate_instance(&text)
}

/// Returns the diagnostic string for an instance file.
pub fn diagnose_file(path: impl AsRef<Path>) -> String {
    match read(path.as_ref()) {
        Ok(text) => diagnose(&text),
        Err(e) => e.to_string(),
    }
}

/// Parses a solution file: one line of `n` integers forming a permutation of `1..=n`.
///
/// # Errors
/// Returns [`InstanceError::Solution`] if the ranking has the wrong length, a
/// non-integer token, a label outside `1..=n`, or a repeated label.
pub fn parse_solution(text: &str, n: usize) -> Result<Vec<Vertex>, InstanceError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != n {
        return Err(InstanceError::Solution(format!(
            "expected {n} labels, got {}",
            tokens.len()
        )));
    }

    let mut seen = vec![false; n + 1];
    let mut ranking = Vec::with_capacity(n);
    for token in tokens {
        let v: Vertex = token
            .parse()
            .map_err(|_| InstanceError::Solution(format!("{token:?} is not a label")))?;
        if !(1..=n).contains(&v) {
            return Err(InstanceError::Solution(format!("label {v} outside 1..={n}")));
        }
        if seen[v] {
            return Err(InstanceError::Solution(format!("label {v} repeated")));
        }
        seen[v] = true;
        ranking.push(v);
    }
    Ok(ranking)
}

/// Reads and parses a solution file for an `n`-vertex instance.
///
/// # Errors
/// Returns [`InstanceError::Io`] if the file cannot be read, otherwise see
/// [`parse_solution`].
pub fn load_solution_file(path: impl AsRef<Path>, n: usize) -> Result<Vec<Vertex>, InstanceError> {
    let text = read(path.as_ref())?;
    parse_solution(&text, n)
}

// ============================================================================
// Internal
// ============================================================================

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Reads `path` as text. Invalid UTF-8 becomes U+FFFD, which then fails the grammar
/// checks like any other non-digit token.
fn read(path: &Path) -> Result<String, InstanceError> {
    let bytes =
        fs::read(path).map_err(|e| InstanceError::Io(format!("{}: {e}", path.display())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_instance() {
        let text = "4\n0 1 0 0\n0 0 1 1\n0 0 0 1\n0 0 0 0\n";
        assert_eq!(diagnose(text), "instance ok");
        let p = validate_instance(text).unwrap();
        assert_eq!(p.vertices(), &[1, 2, 3, 4]);
        assert_eq!(p.edge_count(), 4);
    }

    #[test]
    fn header_must_be_a_single_integer() {
        for text in ["", "\n", "3 3\n", "x\n", "-1\n", "2.0\n"] {
            assert_eq!(diagnose(text), "Line 1 must contain a single integer.", "{text:?}");
        }
    }

    #[test]
    fn header_must_be_in_range() {
        for text in ["0\n", "101\n", "99999999999999999999999\n"] {
            assert_eq!(
                diagnose(text),
                "N must be an integer between 1 and 100, inclusive.",
                "{text:?}"
            );
        }
    }

    #[test]
    fn short_row_reports_its_file_line() {
        let text = "3\n0 1 0\n0 1\n0 0 0\n";
        assert_eq!(diagnose(text), "Line 3 must contain N integers.");
    }

    #[test]
    fn missing_and_non_numeric_rows_report_line() {
        assert_eq!(diagnose("2\n0 1\n"), "Line 3 must contain N integers.");
        assert_eq!(diagnose("2\n0 a\n0 0\n"), "Line 2 must contain N integers.");
        assert_eq!(diagnose("2\n0 -1\n0 0\n"), "Line 2 must contain N integers.");
        assert_eq!(diagnose("2\n0 1 0\n0 0\n"), "Line 2 must contain N integers.");
    }

    #[test]
    fn entries_must_be_binary() {
        assert_eq!(
            diagnose("2\n0 2\n0 0\n"),
            "The adjacency matrix must be comprised of 0s and 1s."
        );
        assert_eq!(
            diagnose("2\n0 300\n0 0\n"),
            "The adjacency matrix must be comprised of 0s and 1s."
        );
    }

    #[test]
    fn first_violation_wins() {
        // Row 2 has a bad value, row 3 is short: the value error comes first.
        assert_eq!(
            diagnose("3\n0 5 0\n0 0\n0 0 0\n"),
            "The adjacency matrix must be comprised of 0s and 1s."
        );
        // Self-loops are only checked once all rows are read.
        assert_eq!(diagnose("2\n1 0\n0\n"), "Line 3 must contain N integers.");
    }

    #[test]
    fn diagonal_must_be_zero() {
        assert_eq!(
            diagnose("2\n0 1\n1 1\n"),
            "A node cannot have an edge to itself."
        );
    }

    #[test]
    fn trailing_content_is_ignored() {
        assert_eq!(diagnose("1\n0\nanything here\n"), "instance ok");
    }

    #[test]
    fn accepts_crlf_and_extra_spacing() {
        assert_eq!(diagnose("2\r\n 0\t1 \r\n0 0\r\n"), "instance ok");
    }

    #[test]
    fn file_round_trip_and_missing_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("mas_validate_{}.txt", std::process::id()));
        fs::write(&path, "2\n0 1\n1 0\n").unwrap();
        assert_eq!(diagnose_file(&path), "instance ok");
        assert_eq!(validate_instance_file(&path).unwrap().edge_count(), 2);
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            validate_instance_file(dir.join("mas_definitely_missing.txt")),
            Err(InstanceError::Io(_))
        ));
    }

    #[test]
    fn non_utf8_row_gets_grammar_diagnostic() {
        let path = std::env::temp_dir().join(format!("mas_non_utf8_{}.txt", std::process::id()));
        fs::write(&path, b"2\n0 \xff\n0 0\n").unwrap();
        assert_eq!(diagnose_file(&path), "Line 2 must contain N integers.");
        assert_eq!(
            validate_instance_file(&path),
            Err(InstanceError::RowShape { line: 2 })
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn check_order_bounds() {
        assert_eq!(check_order(1), Ok(1));
        assert_eq!(check_order(MAX_ORDER), Ok(MAX_ORDER));
        assert_eq!(check_order(0), Err(InstanceError::OrderOutOfRange));
        assert_eq!(check_order(MAX_ORDER + 1), Err(InstanceError::OrderOutOfRange));
    }

    #[test]
    fn parses_solution_permutation() {
        assert_eq!(parse_solution("3 1 2 \n", 3).unwrap(), vec![3, 1, 2]);
        assert!(parse_solution("1 2", 3).is_err());
        assert!(parse_solution("1 1 2", 3).is_err());
        assert!(parse_solution("1 2 4", 3).is_err());
        assert!(parse_solution("0 1 2", 3).is_err());
        assert!(parse_solution("1 x 2", 3).is_err());
    }
}
