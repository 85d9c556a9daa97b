use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::spec::ColumnSpec;

/// Parse a flat map of request form fields into per-column specifications.
///
/// Fields are keyed by a recognized prefix plus a column identifier:
/// `include-<col>`, `name-<col>`, `type-<col>`, `length-<col>`,
/// `precision-<col>`, `order-<col>`, `regex-<col>`. A column exists in the
/// output iff a `name-<col>` field is present; unrecognized keys are ignored.
///
/// Malformed numeric fields (non-integer, `length` < 1, `precision` < 0) are
/// rejected with an [`Error::InvalidField`] naming the offending field, so
/// bad input never reaches the generation engine.
pub fn parse_form(form: &HashMap<String, String>) -> Result<HashMap<String, ColumnSpec>> {
    let mut names: HashMap<&str, &str> = HashMap::new();
    let mut types: HashMap<&str, &str> = HashMap::new();
    let mut tags: HashMap<&str, &str> = HashMap::new();
    let mut includes: HashMap<&str, &str> = HashMap::new();
    let mut lengths: HashMap<&str, u32> = HashMap::new();
    let mut precisions: HashMap<&str, u32> = HashMap::new();
    let mut orders: HashMap<&str, i32> = HashMap::new();

    for (key, value) in form {
        if let Some(col) = key.strip_prefix("include-") {
            includes.insert(col, value.as_str());
        } else if let Some(col) = key.strip_prefix("name-") {
            names.insert(col, value.as_str());
        } else if let Some(col) = key.strip_prefix("type-") {
            types.insert(col, value.as_str());
        } else if let Some(col) = key.strip_prefix("regex-") {
            tags.insert(col, value.as_str());
        } else if let Some(col) = key.strip_prefix("length-") {
            let length = parse_int::<u32>(key, value)?;
            if length < 1 {
                return Err(out_of_range(key, length as i64));
            }
            lengths.insert(col, length);
        } else if let Some(col) = key.strip_prefix("precision-") {
            let precision = parse_int::<u32>(key, value)?;
            precisions.insert(col, precision);
        } else if let Some(col) = key.strip_prefix("order-") {
            orders.insert(col, parse_int::<i32>(key, value)?);
        }
    }

    let mut table = HashMap::new();
    for (col, name) in names {
        let spec = ColumnSpec {
            order: orders.get(col).copied().unwrap_or(0),
            name: (*name).to_string(),
            column_type: types.get(col).map(|t| (*t).to_string()).unwrap_or_default(),
            length: lengths.get(col).copied(),
            precision: precisions.get(col).copied(),
            nullable: false,
            include: includes.get(col).is_some_and(|v| *v == "on"),
            tag: tags
                .get(col)
                .filter(|t| !t.is_empty())
                .map(|t| (*t).to_string()),
        };
        table.insert(col.to_string(), spec);
    }

    Ok(table)
}

fn parse_int<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| Error::InvalidField {
        field: field.to_string(),
        reason: format!("unable to convert '{value}' to an integer"),
    })
}

fn out_of_range(field: &str, value: i64) -> Error {
    Error::InvalidField {
        field: field.to_string(),
        reason: format!("value out of range: {value}"),
    }
}
