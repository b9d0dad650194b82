//! Text formats accepted by the command line
//!
//! - Number lists: `3, 2, 0, -4`
//! - Pair lists (intervals, points): `[1,3] [2,6]` or `[[1,3],[2,6]]`
//! - Level-order trees: `10, 5, null, 7` (`null`, `none`, `_` or `#` mark a gap)
//! - Sudoku: 81 cells, digits with `0` or `.` for blanks, whitespace ignored
//!
//! Every number must lie within `±MAX_MAGNITUDE`.

use super::errors::InputError;
use super::grid::{SudokuGrid, SIZE};
use super::interval::{Interval, Point};

/// Largest magnitude accepted for any number
pub const MAX_MAGNITUDE: i64 = 1_000_000_000;

fn parse_number(token: &str) -> Result<i64, InputError> {
    let value = token
        .trim()
        .parse::<i64>()
        .map_err(|_| InputError::InvalidNumber {
            token: token.trim().to_string(),
        })?;

    if !(-MAX_MAGNITUDE..=MAX_MAGNITUDE).contains(&value) {
        return Err(InputError::TooLarge {
            value,
            max: MAX_MAGNITUDE,
        });
    }
    Ok(value)
}

/// Parse a comma separated list of integers
pub fn parse_values(input: &str) -> Result<Vec<i64>, InputError> {
    let values = input
        .split(',')
        .filter(|token| !token.trim().is_empty())
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;

    if values.is_empty() {
        return Err(InputError::Empty { what: "numbers" });
    }
    Ok(values)
}

/// Parse `[a,b]` pairs, optionally wrapped as `[[a,b],[c,d]]`
pub fn parse_pairs(input: &str) -> Result<Vec<(i64, i64)>, InputError> {
    let mut pairs = Vec::new();
    let trimmed = input.trim();
    let mut rest = match trimmed.strip_prefix('[') {
        Some(inner) if inner.trim_start().starts_with('[') => {
            inner.strip_suffix(']').unwrap_or(inner).trim()
        }
        _ => trimmed,
    };

    while !rest.is_empty() {
        rest = rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        if rest.is_empty() {
            break;
        }

        let Some(body) = rest.strip_prefix('[') else {
            return Err(InputError::InvalidPair {
                text: rest.chars().take(12).collect(),
            });
        };
        let Some(close) = body.find(']') else {
            return Err(InputError::InvalidPair {
                text: rest.to_string(),
            });
        };

        let inner = &body[..close];
        let mut parts = inner.split(',');
        let pair = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(b), None) => (parse_number(a)?, parse_number(b)?),
            _ => {
                return Err(InputError::InvalidPair {
                    text: format!("[{}]", inner),
                })
            }
        };
        pairs.push(pair);
        rest = &body[close + 1..];
    }

    Ok(pairs)
}

/// Parse closed ranges, rejecting reversed ones
pub fn parse_intervals(input: &str) -> Result<Vec<Interval>, InputError> {
    let intervals = parse_pairs(input)?
        .into_iter()
        .map(|(start, end)| {
            if end < start {
                Err(InputError::ReversedInterval { start, end })
            } else {
                Ok(Interval::new(start, end))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if intervals.is_empty() {
        return Err(InputError::Empty { what: "intervals" });
    }
    Ok(intervals)
}

/// Parse a single interval such as `[4,8]`
pub fn parse_interval(input: &str) -> Result<Interval, InputError> {
    let intervals = parse_intervals(input)?;
    match intervals.as_slice() {
        [single] => Ok(*single),
        _ => Err(InputError::InvalidPair {
            text: input.trim().to_string(),
        }),
    }
}

pub fn parse_points(input: &str) -> Result<Vec<Point>, InputError> {
    let points: Vec<Point> = parse_pairs(input)?
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();

    if points.is_empty() {
        return Err(InputError::Empty { what: "points" });
    }
    Ok(points)
}

/// Parse a level-order tree listing
pub fn parse_tree(input: &str) -> Result<Vec<Option<i64>>, InputError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.to_ascii_lowercase().as_str() {
            "null" | "none" | "_" | "#" => Ok(None),
            _ => parse_number(token).map(Some),
        })
        .collect()
}

/// Parse an 81 cell Sudoku grid
pub fn parse_sudoku(input: &str) -> Result<SudokuGrid, InputError> {
    let digits: Vec<u8> = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '|')
        .map(|c| match c {
            '.' | '0' => Ok(0),
            '1'..='9' => Ok(c as u8 - b'0'),
            other => Err(InputError::InvalidGrid {
                reason: format!("unexpected character '{}'", other),
            }),
        })
        .collect::<Result<_, _>>()?;

    if digits.len() != SIZE * SIZE {
        return Err(InputError::InvalidGrid {
            reason: format!("expected {} cells, found {}", SIZE * SIZE, digits.len()),
        });
    }

    let mut cells = [[0u8; SIZE]; SIZE];
    for (i, digit) in digits.into_iter().enumerate() {
        cells[i / SIZE][i % SIZE] = digit;
    }
    SudokuGrid::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("3, 2,0 ,-4").unwrap(), vec![3, 2, 0, -4]);
        assert_eq!(parse_values("7,").unwrap(), vec![7]);
        assert_eq!(
            parse_values("1, x"),
            Err(InputError::InvalidNumber {
                token: "x".to_string()
            })
        );
        assert!(parse_values(" , ").is_err());
    }

    #[test]
    fn test_rejects_numbers_beyond_magnitude_limit() {
        assert_eq!(parse_values("-1000000000, 1000000000").unwrap().len(), 2);
        assert_eq!(
            parse_points("[4000000000,0] [1,1]"),
            Err(InputError::TooLarge {
                value: 4_000_000_000,
                max: MAX_MAGNITUDE
            })
        );
        assert!(parse_tree("9223372036854775807, 1").is_err());
        assert!(parse_intervals("[0,1000000000000000000] [5,6]").is_err());
        assert!(parse_values("-1000000001").is_err());
    }

    #[test]
    fn test_parse_intervals() {
        let intervals = parse_intervals("[1,3] [2,6], [8, 10]").unwrap();
        assert_eq!(
            intervals,
            vec![
                Interval::new(1, 3),
                Interval::new(2, 6),
                Interval::new(8, 10)
            ]
        );
    }

    #[test]
    fn test_parse_intervals_nested() {
        assert_eq!(
            parse_intervals("[[1,3],[2,6]]").unwrap(),
            vec![Interval::new(1, 3), Interval::new(2, 6)]
        );
    }

    #[test]
    fn test_parse_intervals_rejects_garbage() {
        assert!(parse_intervals("[1,3] 4").is_err());
        assert!(parse_intervals("[1,3").is_err());
        assert!(parse_intervals("[1,2,3]").is_err());
        assert_eq!(
            parse_intervals("[5,1]"),
            Err(InputError::ReversedInterval { start: 5, end: 1 })
        );
    }

    #[test]
    fn test_parse_points_allows_negatives() {
        assert_eq!(
            parse_points("[1,3] [-2,2]").unwrap(),
            vec![Point::new(1, 3), Point::new(-2, 2)]
        );
    }

    #[test]
    fn test_parse_single_interval() {
        assert_eq!(parse_interval("[4,8]").unwrap(), Interval::new(4, 8));
        assert!(parse_interval("[4,8] [9,9]").is_err());
    }

    #[test]
    fn test_parse_tree_gaps() {
        assert_eq!(
            parse_tree("1, null, 2, #").unwrap(),
            vec![Some(1), None, Some(2), None]
        );
    }

    #[test]
    fn test_parse_sudoku() {
        let text =
            "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";
        let grid = parse_sudoku(text).unwrap();
        assert_eq!(grid.get(0, 0), 5);
        assert_eq!(grid.get(8, 8), 9);
        assert!(parse_sudoku("123").is_err());
    }
}
