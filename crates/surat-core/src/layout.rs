//! Layout variants and the roster column rules that belong to each.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Template shape used for a letter.
///
/// The variant selects both the template file and how attendee values are
/// spread over the roster columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutVariant {
    /// Five columns: number, name, national ID, position, org unit
    #[serde(alias = "1")]
    SeparateColumns,
    /// Four columns: number, name + national ID, position, org unit
    #[default]
    #[serde(alias = "2")]
    NameIdCombined,
}

/// Horizontal paragraph alignment (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

/// Vertical cell alignment (`w:vAlign`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// Alignment pair applied to one roster cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAlignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl CellAlignment {
    /// Centered both ways, used by the sequence column and header rows
    pub const CENTERED: Self = Self {
        horizontal: HorizontalAlignment::Center,
        vertical: VerticalAlignment::Center,
    };

    /// Left aligned, vertically centered
    pub const LEFT_MIDDLE: Self = Self {
        horizontal: HorizontalAlignment::Left,
        vertical: VerticalAlignment::Center,
    };
}

impl LayoutVariant {
    /// All variants, in legacy numbering order
    pub const ALL: [Self; 2] = [Self::SeparateColumns, Self::NameIdCombined];

    /// Stable identifier used in configuration and logs
    #[inline]
    #[must_use = "returns the layout identifier"]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SeparateColumns => "separate-columns",
            Self::NameIdCombined => "name-id-combined",
        }
    }

    /// Number of value slots generated per roster row
    #[inline]
    #[must_use = "returns the number of roster columns this layout fills"]
    pub const fn column_count(&self) -> usize {
        match self {
            Self::SeparateColumns => 5,
            Self::NameIdCombined => 4,
        }
    }

    /// Alignment for a generated roster cell in column `column`.
    ///
    /// The sequence column is centered, every other column is left aligned.
    /// All cells are vertically centered.
    #[inline]
    #[must_use = "returns the alignment for the column"]
    pub const fn column_alignment(&self, column: usize) -> CellAlignment {
        if column == 0 {
            CellAlignment::CENTERED
        } else {
            CellAlignment::LEFT_MIDDLE
        }
    }
}

impl fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "separate-columns" | "separate_columns" | "1" => Ok(Self::SeparateColumns),
            "name-id-combined" | "name_id_combined" | "2" => Ok(Self::NameIdCombined),
            other => Err(format!("unknown layout variant: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout_names_and_aliases() {
        assert_eq!(
            "separate-columns".parse::<LayoutVariant>(),
            Ok(LayoutVariant::SeparateColumns)
        );
        assert_eq!("2".parse::<LayoutVariant>(), Ok(LayoutVariant::NameIdCombined));
        assert_eq!(
            " Name_Id_Combined ".parse::<LayoutVariant>(),
            Ok(LayoutVariant::NameIdCombined)
        );
        assert!("three".parse::<LayoutVariant>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for variant in LayoutVariant::ALL {
            assert_eq!(variant.to_string().parse::<LayoutVariant>(), Ok(variant));
        }
    }

    #[test]
    fn test_sequence_column_is_centered() {
        for variant in LayoutVariant::ALL {
            assert_eq!(variant.column_alignment(0), CellAlignment::CENTERED);
        }
    }

    #[test]
    fn test_other_columns_are_left_middle() {
        for variant in LayoutVariant::ALL {
            for column in 1..variant.column_count() {
                assert_eq!(variant.column_alignment(column), CellAlignment::LEFT_MIDDLE);
            }
        }
        // position and org unit sit at different indices per layout
        assert_eq!(
            LayoutVariant::SeparateColumns.column_alignment(4),
            LayoutVariant::NameIdCombined.column_alignment(3)
        );
    }

    #[test]
    fn test_deserialize_from_toml_value() {
        #[derive(Deserialize)]
        struct Holder {
            layout: LayoutVariant,
        }
        let holder: Holder = toml::from_str("layout = \"separate-columns\"").unwrap();
        assert_eq!(holder.layout, LayoutVariant::SeparateColumns);
    }
}
