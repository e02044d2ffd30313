use crate::error::GraphError;
use crate::ir::Record;

const REQUIRED_COLUMNS: [&str; 3] = ["muscle", "origin", "insertion"];

/// Parse a CSV muscle table into ordered records.
///
/// The header row must contain the columns `muscle`, `origin` and
/// `insertion` (exact names, any order; extra columns are ignored).
/// Standard CSV quoting applies: fields may be wrapped in double quotes,
/// embedded quotes are doubled, and quoted fields may contain commas and
/// line breaks. A missing header column is a `LoadFailure`; a data row too
/// short to supply all three fields is a `MalformedRecord` carrying the
/// zero-based record index.
pub fn parse_records(input: &str) -> Result<Vec<Record>, GraphError> {
    let mut rows = split_rows(input)?;
    if rows.is_empty() {
        return Err(GraphError::LoadFailure("input has no header row".to_string()));
    }

    let header = rows.remove(0);
    let columns = resolve_columns(&header)?;

    let mut records = Vec::with_capacity(rows.len());
    for (row, fields) in rows.into_iter().enumerate() {
        let width = fields.len();
        let get = |idx: usize| -> Result<String, GraphError> {
            if idx < width {
                Ok(fields[idx].clone())
            } else {
                Err(GraphError::MalformedRecord { row })
            }
        };
        records.push(Record {
            muscle: get(columns[0])?,
            origin: get(columns[1])?,
            insertion: get(columns[2])?,
        });
    }

    Ok(records)
}

/// Map each required column name to its position in the header.
fn resolve_columns(header: &[String]) -> Result<[usize; 3], GraphError> {
    let mut columns = [0usize; 3];
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        let position = header.iter().position(|cell| cell.trim() == *name);
        match position {
            Some(idx) => columns[slot] = idx,
            None => {
                return Err(GraphError::LoadFailure(format!(
                    "header is missing required column \"{name}\""
                )));
            }
        }
    }
    Ok(columns)
}

/// Split CSV text into rows of fields, honoring double-quote escaping.
/// Rows that contain nothing but an empty field (blank lines, trailing
/// newline) are dropped.
fn split_rows(input: &str) -> Result<Vec<Vec<String>>, GraphError> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => {
                fields.push(std::mem::take(&mut field));
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut rows, &mut fields, &mut field);
            }
            '\n' => {
                end_row(&mut rows, &mut fields, &mut field);
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(GraphError::LoadFailure(
            "unterminated quoted field".to_string(),
        ));
    }
    end_row(&mut rows, &mut fields, &mut field);

    Ok(rows)
}

fn end_row(rows: &mut Vec<Vec<String>>, fields: &mut Vec<String>, field: &mut String) {
    fields.push(std::mem::take(field));
    let row = std::mem::take(fields);
    if row.len() == 1 && row[0].is_empty() {
        return;
    }
    rows.push(row);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_table() {
        let input = "muscle,origin,insertion\nBiceps,Scapula,Radius\nTriceps,Scapula,Ulna\n";
        let records = parse_records(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].muscle, "Biceps");
        assert_eq!(records[1].insertion, "Ulna");
    }

    #[test]
    fn resolves_columns_by_name_in_any_order() {
        let input = "insertion,muscle,origin\nRadius,Biceps,Scapula\n";
        let records = parse_records(input).unwrap();
        assert_eq!(records[0].muscle, "Biceps");
        assert_eq!(records[0].origin, "Scapula");
        assert_eq!(records[0].insertion, "Radius");
    }

    #[test]
    fn quoted_fields_keep_commas_and_quotes() {
        let input =
            "muscle,origin,insertion\n\"Flexor carpi, ulnaris\",\"the \"\"medial\"\" epicondyle\",Pisiform\n";
        let records = parse_records(input).unwrap();
        assert_eq!(records[0].muscle, "Flexor carpi, ulnaris");
        assert_eq!(records[0].origin, "the \"medial\" epicondyle");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let input = "muscle,origin,insertion\r\nBiceps,Scapula,Radius\r\n";
        let records = parse_records(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].insertion, "Radius");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = "muscle,origin,insertion\n\nBiceps,Scapula,Radius\n\n";
        let records = parse_records(input).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_header_column_is_a_load_failure() {
        let input = "muscle,source,insertion\nBiceps,Scapula,Radius\n";
        let err = parse_records(input).unwrap_err();
        assert!(matches!(err, GraphError::LoadFailure(_)));
    }

    #[test]
    fn empty_input_is_a_load_failure() {
        assert!(matches!(
            parse_records(""),
            Err(GraphError::LoadFailure(_))
        ));
    }

    #[test]
    fn short_row_reports_its_record_index() {
        let input = "muscle,origin,insertion\nBiceps,Scapula,Radius\nTriceps,Scapula\n";
        let err = parse_records(input).unwrap_err();
        assert_eq!(err, GraphError::MalformedRecord { row: 1 });
    }

    #[test]
    fn unterminated_quote_is_a_load_failure() {
        let input = "muscle,origin,insertion\n\"Biceps,Scapula,Radius\n";
        assert!(matches!(
            parse_records(input),
            Err(GraphError::LoadFailure(_))
        ));
    }

    #[test]
    fn header_only_yields_no_records() {
        let records = parse_records("muscle,origin,insertion\n").unwrap();
        assert!(records.is_empty());
    }
}
