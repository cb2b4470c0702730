//! Lenient text → number coercion for form fields and pasted cells.
//!
//! Nothing in here fails: text that does not yield a finite, non-negative
//! number coerces to `0`.

use std::sync::LazyLock;

use regex::Regex;

/// Marker spreadsheets emit for a division by zero.
pub const DIVISION_ERROR_MARKER: &str = "#DIV/0!";

/// Everything a manual form field may not contain.
static NON_NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("form digit regex must compile"));

/// Decorations a pasted spreadsheet cell may carry: currency symbols,
/// percent signs and thousands separators.
static CELL_DECORATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[₩$%,]").expect("cell decoration regex must compile"));

/// Coerce a manual form field: drop every character outside `[0-9.]` and
/// parse what remains.
///
/// `"1,234원"` → `1234`, `""` → `0`, `"1.2.3"` → `0`.
pub fn coerce_form_number(text: &str) -> f64 {
    let digits = NON_NUMERIC_RE.replace_all(text, "");
    parse_non_negative(&digits)
}

/// Coerce a pasted spreadsheet cell.
///
/// Empty cells and cells containing [`DIVISION_ERROR_MARKER`] become `0`.
pub fn clean_cell(text: &str) -> f64 {
    if text.trim().is_empty() || text.contains(DIVISION_ERROR_MARKER) {
        return 0.0;
    }
    let stripped = CELL_DECORATION_RE.replace_all(text, "");
    parse_non_negative(stripped.trim())
}

/// Round a coerced amount to a whole count or currency unit.
pub fn to_whole(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

fn parse_non_negative(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_number_strips_non_numeric() {
        assert_eq!(coerce_form_number("1,234"), 1234.0);
        assert_eq!(coerce_form_number("₩5,316"), 5316.0);
        assert_eq!(coerce_form_number("0.25%"), 0.25);
        assert_eq!(coerce_form_number("약 300회"), 300.0);
    }

    #[test]
    fn form_number_defaults_to_zero() {
        assert_eq!(coerce_form_number(""), 0.0);
        assert_eq!(coerce_form_number("abc"), 0.0);
        assert_eq!(coerce_form_number("1.2.3"), 0.0);
        // The minus sign is stripped like any other non-numeric character.
        assert_eq!(coerce_form_number("-42"), 42.0);
    }

    #[test]
    fn cell_strips_decorations() {
        assert_eq!(clean_cell("₩1,500"), 1500.0);
        assert_eq!(clean_cell("0.2%"), 0.2);
        assert_eq!(clean_cell("1,234,567"), 1_234_567.0);
        assert_eq!(clean_cell(" 42 "), 42.0);
        assert_eq!(clean_cell("3000\r"), 3000.0);
    }

    #[test]
    fn cell_treats_blank_and_division_error_as_zero() {
        assert_eq!(clean_cell(""), 0.0);
        assert_eq!(clean_cell("   "), 0.0);
        assert_eq!(clean_cell("#DIV/0!"), 0.0);
        assert_eq!(clean_cell("₩#DIV/0!"), 0.0);
    }

    #[test]
    fn cell_rejects_garbage_and_negatives() {
        assert_eq!(clean_cell("n/a"), 0.0);
        assert_eq!(clean_cell("-5"), 0.0);
        assert_eq!(clean_cell("inf"), 0.0);
    }

    #[test]
    fn to_whole_rounds_and_clamps() {
        assert_eq!(to_whole(1499.6), 1500);
        assert_eq!(to_whole(0.0), 0);
        assert_eq!(to_whole(f64::NAN), 0);
        assert_eq!(to_whole(-3.0), 0);
    }
}
