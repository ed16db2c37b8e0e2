//! Neighbour candidate table.
//!
//! One line per scan, in scan order:
//!
//! ```text
//! <count> <unused> <unused> <id_0> <id_1> ... <id_{count-1}>
//! ```
//!
//! The two unused fields must be numeric but are otherwise discarded. Blank
//! lines are only allowed at the end of the file; one between rows would
//! shift every later row to the wrong scan. Ids beyond `count` are ignored
//! with a warning.
//!
//! Validation rejects an out-of-range id anywhere in a row, including ids
//! past the neighbourhood size the evaluator reads.

use std::path::Path;

use crate::error::{Result, SmritiError};

/// Ordered candidate lists, one per scan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborTable {
    rows: Vec<Vec<usize>>,
}

impl NeighborTable {
    /// Create a table from candidate lists in scan order.
    pub fn new(rows: Vec<Vec<usize>>) -> Self {
        Self { rows }
    }

    /// Load a table from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a table from text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        let mut first_blank: Option<usize> = None;

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let mut fields = line.split_whitespace();

            let Some(count_field) = fields.next() else {
                first_blank.get_or_insert(line_number);
                continue;
            };
            if let Some(line) = first_blank {
                return Err(SmritiError::NeighborHeader { line });
            }
            let declared = parse_field::<usize>(count_field, line_number)?;

            for _ in 0..2 {
                let field = fields
                    .next()
                    .ok_or(SmritiError::NeighborHeader { line: line_number })?;
                parse_field::<f64>(field, line_number)?;
            }

            let ids = fields
                .map(|f| parse_field::<usize>(f, line_number))
                .collect::<Result<Vec<_>>>()?;

            if ids.len() < declared {
                return Err(SmritiError::NeighborCount {
                    line: line_number,
                    declared,
                    found: ids.len(),
                });
            }
            if ids.len() > declared {
                log::warn!(
                    "Neighbour table line {}: {} ids beyond declared count {} ignored",
                    line_number,
                    ids.len() - declared,
                    declared
                );
            }

            let mut ids = ids;
            ids.truncate(declared);
            rows.push(ids);
        }

        Ok(Self { rows })
    }

    /// Check the table against a dataset of `scans` scans.
    ///
    /// Fails if there are fewer rows than scans or if any candidate id of the
    /// first `scans` rows is out of range, whether or not it falls inside the
    /// neighbourhood size. Surplus rows are ignored with a warning.
    pub fn validate(&self, scans: usize) -> Result<()> {
        if self.rows.len() < scans {
            return Err(SmritiError::NeighborTableTooShort {
                rows: self.rows.len(),
                scans,
            });
        }
        if self.rows.len() > scans {
            log::warn!(
                "Neighbour table has {} rows for {} scans, surplus rows ignored",
                self.rows.len(),
                scans
            );
        }

        for (query, row) in self.rows.iter().take(scans).enumerate() {
            if let Some(&candidate) = row.iter().find(|&&c| c >= scans) {
                return Err(SmritiError::CandidateOutOfRange {
                    query,
                    candidate,
                    scans,
                });
            }
        }

        Ok(())
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Is the table empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Candidates of scan `id`, in ranked order.
    #[inline]
    pub fn candidates(&self, id: usize) -> Option<&[usize]> {
        self.rows.get(id).map(Vec::as_slice)
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, line: usize) -> Result<T> {
    field.parse().map_err(|_| SmritiError::NeighborParse {
        line,
        field: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = NeighborTable::parse("2 0 0 1 2\n1 0.5 3 0\n0 0 0\n\n  \n").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.candidates(0), Some(&[1, 2][..]));
        assert_eq!(table.candidates(1), Some(&[0][..]));
        assert_eq!(table.candidates(2), Some(&[][..]));
    }

    #[test]
    fn test_surplus_ids_truncated() {
        let table = NeighborTable::parse("1 0 0 4 5 6").unwrap();
        assert_eq!(table.candidates(0), Some(&[4][..]));
    }

    #[test]
    fn test_declared_count_too_large() {
        let err = NeighborTable::parse("1 0 0 2\n3 0 0 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            SmritiError::NeighborCount {
                line: 2,
                declared: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_non_numeric_field() {
        let err = NeighborTable::parse("2 0 0 1 x").unwrap_err();
        assert!(matches!(err, SmritiError::NeighborParse { line: 1, .. }));

        let err = NeighborTable::parse("2 a 0 1 2").unwrap_err();
        assert!(matches!(err, SmritiError::NeighborParse { line: 1, .. }));
    }

    #[test]
    fn test_validate_checks_whole_row() {
        // The bad id sits past the first candidate; a one-neighbour run
        // would never read it, but the table is still rejected.
        let table = NeighborTable::parse("3 0 0 1 0 7\n1 0 0 0\n").unwrap();
        assert!(matches!(
            table.validate(2),
            Err(SmritiError::CandidateOutOfRange {
                query: 0,
                candidate: 7,
                scans: 2
            })
        ));
    }

    #[test]
    fn test_blank_line_between_rows() {
        let err = NeighborTable::parse("1 0 0 2\n\n1 0 0 0\n1 0 0 1\n").unwrap_err();
        assert!(matches!(err, SmritiError::NeighborHeader { line: 2 }));
    }

    #[test]
    fn test_missing_header() {
        let err = NeighborTable::parse("0 0").unwrap_err();
        assert!(matches!(err, SmritiError::NeighborHeader { line: 1 }));
    }

    #[test]
    fn test_validate() {
        let table = NeighborTable::parse("1 0 0 1\n1 0 0 0\n").unwrap();
        assert!(table.validate(2).is_ok());
        assert!(matches!(
            table.validate(3),
            Err(SmritiError::NeighborTableTooShort { rows: 2, scans: 3 })
        ));
        assert!(matches!(
            table.validate(1),
            Err(SmritiError::CandidateOutOfRange {
                query: 0,
                candidate: 1,
                scans: 1
            })
        ));
    }
}
