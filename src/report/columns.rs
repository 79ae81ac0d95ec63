//! Table column planning
//!
//! Derives the header specs of a company's table from the field names of its
//! first order record.

use super::renderer::{TextAlign, VerticalAlign};

/// Width used for fields missing from [`COLUMN_WIDTHS`]
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

/// Known fields and their column widths in points
pub const COLUMN_WIDTHS: &[(&str, f32)] = &[
    ("ServiceOrderNo", 150.0),
    ("Command", 228.0),
    ("CommandTotalCount", 163.0),
    ("ServiceType", 105.0),
    ("Department", 100.0),
    ("Business", 75.0),
    ("Product", 135.0),
    ("Borrower", 145.0),
    ("Status", 95.0),
    ("Responsible", 94.0),
    ("created", 107.0),
    ("ServiceDate", 97.0),
    ("UrgentOrder", 97.0),
    ("Remark", 95.0),
];

/// Fields whose cells are left aligned; everything else is centred
const LEFT_ALIGNED_FIELDS: &[&str] = &["ServiceOrderNo", "Command"];

/// Which edges of the header cells get a border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderBorder {
    None,
    Bottom,
    All,
}

/// RGB colour with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    pub const BLACK: RgbColor = RgbColor {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

/// One table column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub label: String,
    pub property: String,
    pub align: TextAlign,
    pub valign: VerticalAlign,
    pub width: f32,
    pub header_color: RgbColor,
}

/// Settings applied to every column unless overridden
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDefaults {
    pub header_border: HeaderBorder,
    pub align: TextAlign,
    pub padding: f32,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            header_border: HeaderBorder::Bottom,
            align: TextAlign::Center,
            padding: 2.0,
        }
    }
}

/// Headers plus column defaults for one table draw
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub columns: Vec<ColumnSpec>,
    pub defaults: ColumnDefaults,
}

impl TableSpec {
    /// Build the table for a company from its field names
    pub fn for_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            columns: fields.into_iter().map(ColumnSpec::for_field).collect(),
            defaults: ColumnDefaults::default(),
        }
    }

    pub fn total_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

impl ColumnSpec {
    pub fn for_field(field: &str) -> Self {
        let align = if LEFT_ALIGNED_FIELDS.contains(&field) {
            TextAlign::Left
        } else {
            TextAlign::Center
        };

        Self {
            label: humanize_label(field),
            property: field.to_string(),
            align,
            valign: VerticalAlign::Center,
            width: column_width(field),
            header_color: RgbColor::WHITE,
        }
    }
}

/// Width of a field's column, falling back to [`DEFAULT_COLUMN_WIDTH`]
pub fn column_width(field: &str) -> f32 {
    COLUMN_WIDTHS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, width)| *width)
        .unwrap_or(DEFAULT_COLUMN_WIDTH)
}

/// Turn a field name into a header label.
///
/// A space goes between a lowercase ASCII letter and a directly following
/// uppercase one, then underscores become spaces:
/// `ServiceOrderNo` -> `Service Order No`, `created_at` -> `created at`.
pub fn humanize_label(field: &str) -> String {
    let mut label = String::with_capacity(field.len() + 4);
    let mut prev: Option<char> = None;

    for c in field.chars() {
        if let Some(p) = prev {
            if p.is_ascii_lowercase() && c.is_ascii_uppercase() {
                label.push(' ');
            }
        }
        label.push(if c == '_' { ' ' } else { c });
        prev = Some(c);
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_lower_upper_run(label: &str) -> bool {
        label
            .chars()
            .zip(label.chars().skip(1))
            .any(|(a, b)| a.is_ascii_lowercase() && b.is_ascii_uppercase())
    }

    #[test]
    fn test_humanize_label() {
        assert_eq!(humanize_label("ServiceOrderNo"), "Service Order No");
        assert_eq!(humanize_label("CommandTotalCount"), "Command Total Count");
        assert_eq!(humanize_label("created"), "created");
        assert_eq!(humanize_label("created_at"), "created at");
        assert_eq!(humanize_label("Urgent_Order"), "Urgent Order");
        assert_eq!(humanize_label("SOStatus"), "SOStatus");
        assert_eq!(humanize_label(""), "");
    }

    #[test]
    fn test_labels_have_no_lower_upper_run() {
        for (field, _) in COLUMN_WIDTHS {
            assert!(!has_lower_upper_run(&humanize_label(field)), "{field}");
        }
        assert!(!has_lower_upper_run(&humanize_label("aBcDeFgH")));
    }

    #[test]
    fn test_column_widths() {
        assert_eq!(column_width("ServiceOrderNo"), 150.0);
        assert_eq!(column_width("Business"), 75.0);
        assert_eq!(column_width("created"), 107.0);
        assert_eq!(column_width("Created"), DEFAULT_COLUMN_WIDTH);
        assert_eq!(column_width("SomethingElse"), 100.0);
    }

    #[test]
    fn test_alignment_rules() {
        let table = TableSpec::for_fields(["ServiceOrderNo", "Command", "Status", "command"]);
        let aligns: Vec<_> = table.columns.iter().map(|c| c.align).collect();
        assert_eq!(
            aligns,
            vec![
                TextAlign::Left,
                TextAlign::Left,
                TextAlign::Center,
                TextAlign::Center
            ]
        );
        assert!(table
            .columns
            .iter()
            .all(|c| c.valign == VerticalAlign::Center && c.header_color == RgbColor::WHITE));
    }

    #[test]
    fn test_table_spec_from_fields() {
        let table = TableSpec::for_fields(["ServiceOrderNo", "Mystery_Field"]);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[1].label, "Mystery Field");
        assert_eq!(table.columns[1].property, "Mystery_Field");
        assert_eq!(table.total_width(), 250.0);
        assert_eq!(table.defaults.header_border, HeaderBorder::Bottom);
        assert_eq!(table.defaults.padding, 2.0);
    }
}
