//! Bridge between the route model and its editable form projection.
//!
//! The form is a flat collection of named inputs: singleton metadata fields
//! plus one repeatable group per stop. Field names and types come from a
//! fixed schema ([`ROUTE_FIELDS`], [`STOP_FIELDS`]) and are validated on scan.
//! Writing back never patches rows in place; the row list is rebuilt so its
//! length always matches the stop count.

use thiserror::Error;

use crate::route::{Route, Stop, DEFAULT_QUANTITY};

pub const ROUTE_NAME: &str = "routeName";
pub const PICKUP_LOCATION_KEY: &str = "pickupLocationKey";
pub const DATE: &str = "date";
pub const TIME: &str = "time";
pub const ADDRESS: &str = "address";
pub const QUANTITY: &str = "quantity";
pub const NOTES: &str = "notes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-negative integer. A blank input scans as `default`.
    Number { default: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

pub const ROUTE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: ROUTE_NAME,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: PICKUP_LOCATION_KEY,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: DATE,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: TIME,
        kind: FieldKind::Text,
    },
];

pub const STOP_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: ADDRESS,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: QUANTITY,
        kind: FieldKind::Number {
            default: DEFAULT_QUANTITY,
        },
    },
    FieldSpec {
        name: NOTES,
        kind: FieldKind::Text,
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// `row` is the zero-based stop row, or `None` for a metadata field.
    #[error("form is missing field \"{name}\" (row {row:?})")]
    MissingField { name: String, row: Option<usize> },

    #[error("field \"{name}\" in row {row} is not a non-negative number: \"{value}\"")]
    InvalidNumber {
        name: String,
        row: usize,
        value: String,
    },

    #[error("form has no field named \"{0}\"")]
    UnknownField(String),

    #[error("form has no row {0}")]
    NoSuchRow(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One repeatable stop group, inputs in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormRow {
    pub fields: Vec<Field>,
}

impl FormRow {
    /// A fresh row as the editor shows it: numbers at their default, text empty.
    #[must_use]
    pub fn blank() -> Self {
        let fields = STOP_FIELDS
            .iter()
            .map(|spec| match spec.kind {
                FieldKind::Text => Field::new(spec.name, ""),
                FieldKind::Number { default } => Field::new(spec.name, default.to_string()),
            })
            .collect();
        Self { fields }
    }

    fn from_stop(stop: &Stop) -> Self {
        Self {
            fields: vec![
                Field::new(ADDRESS, stop.address.clone()),
                Field::new(QUANTITY, stop.quantity.to_string()),
                Field::new(NOTES, stop.notes.clone()),
            ],
        }
    }

    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        find_value(&self.fields, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Form {
    pub metadata: Vec<Field>,
    pub rows: Vec<FormRow>,
}

impl Form {
    #[must_use]
    pub fn metadata_value(&self, name: &str) -> Option<&str> {
        find_value(&self.metadata, name)
    }

    /// Appends a blank stop row.
    pub fn add_row(&mut self) {
        self.rows.push(FormRow::blank());
    }

    /// Removes the row at `index` and returns it.
    ///
    /// Callers that want a confirmation prompt check the row's address first;
    /// a row without one can be dropped silently.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NoSuchRow`] if `index` is out of range.
    pub fn remove_row(&mut self, index: usize) -> Result<FormRow, ScanError> {
        if index >= self.rows.len() {
            return Err(ScanError::NoSuchRow(index));
        }
        Ok(self.rows.remove(index))
    }

    /// Writes `value` into the named input of stop row `row`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NoSuchRow`] or [`ScanError::UnknownField`] when the
    /// target input does not exist.
    pub fn set_field(&mut self, row: usize, name: &str, value: &str) -> Result<(), ScanError> {
        let target = self.rows.get_mut(row).ok_or(ScanError::NoSuchRow(row))?;
        write_value(&mut target.fields, name, value)
    }

    /// Writes `value` into the named metadata input.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::UnknownField`] when no metadata input has that name.
    pub fn set_metadata(&mut self, name: &str, value: &str) -> Result<(), ScanError> {
        write_value(&mut self.metadata, name, value)
    }
}

/// Result of [`scan_and_repair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    pub route: Route,
    /// The form had no rows; a placeholder stop was added and the form rebuilt.
    pub repaired: bool,
}

/// Reads the form into a [`Route`]; rows become stops in document order.
///
/// # Errors
///
/// - [`ScanError::MissingField`] if a schema field is absent from the form.
/// - [`ScanError::InvalidNumber`] if a numeric input holds something other
///   than a non-negative integer.
pub fn scan_form(form: &Form) -> Result<Route, ScanError> {
    let meta = |name: &str| -> Result<String, ScanError> {
        form.metadata_value(name)
            .map(str::to_owned)
            .ok_or_else(|| ScanError::MissingField {
                name: name.to_string(),
                row: None,
            })
    };

    let stops = form
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| scan_row(idx, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Route {
        route_name: meta(ROUTE_NAME)?,
        pickup_location_key: meta(PICKUP_LOCATION_KEY)?,
        date: meta(DATE)?,
        time: meta(TIME)?,
        stops,
    })
}

/// Scans the form and enforces the non-empty stop invariant before anything
/// downstream sees the route. When the repair fires the form is rebuilt to
/// show the new placeholder row.
///
/// # Errors
///
/// Propagates [`scan_form`] errors; the form is left untouched in that case.
pub fn scan_and_repair(form: &mut Form) -> Result<Scanned, ScanError> {
    let mut route = scan_form(form)?;
    let repaired = route.ensure_stops();
    if repaired {
        apply_to_form(&route, form);
    }
    Ok(Scanned { route, repaired })
}

/// Writes the route back into the form, rebuilding every stop row.
pub fn apply_to_form(route: &Route, form: &mut Form) {
    for (name, value) in [
        (ROUTE_NAME, &route.route_name),
        (PICKUP_LOCATION_KEY, &route.pickup_location_key),
        (DATE, &route.date),
        (TIME, &route.time),
    ] {
        match form.metadata.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value.clone_from(value),
            None => form.metadata.push(Field::new(name, value.clone())),
        }
    }

    form.rows = route.stops.iter().map(FormRow::from_stop).collect();
}

fn scan_row(idx: usize, row: &FormRow) -> Result<Stop, ScanError> {
    let mut stop = Stop::blank();
    for spec in STOP_FIELDS {
        let raw = row.value(spec.name).ok_or_else(|| ScanError::MissingField {
            name: spec.name.to_string(),
            row: Some(idx),
        })?;

        match (spec.name, spec.kind) {
            (ADDRESS, _) => raw.clone_into(&mut stop.address),
            (NOTES, _) => raw.clone_into(&mut stop.notes),
            (QUANTITY, FieldKind::Number { default }) => {
                stop.quantity = parse_number(raw, default).ok_or_else(|| {
                    ScanError::InvalidNumber {
                        name: spec.name.to_string(),
                        row: idx,
                        value: raw.to_string(),
                    }
                })?;
            }
            _ => {}
        }
    }
    Ok(stop)
}

fn parse_number(raw: &str, default: u32) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(default);
    }
    trimmed.parse::<u32>().ok()
}

fn find_value<'a>(fields: &'a [Field], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|f| f.name == name)
        .map(|f| f.value.as_str())
}

fn write_value(fields: &mut [Field], name: &str, value: &str) -> Result<(), ScanError> {
    let field = fields
        .iter_mut()
        .find(|f| f.name == name)
        .ok_or_else(|| ScanError::UnknownField(name.to_string()))?;
    value.clone_into(&mut field.value);
    Ok(())
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
