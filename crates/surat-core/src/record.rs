//! Attendee records and the roster values derived from them.

use crate::layout::LayoutVariant;
use serde::{Deserialize, Serialize};

/// Length of a national civil-servant ID that gets grouped for display
pub const GROUPED_ID_LENGTH: usize = 18;

/// Group sizes for an 18-character ID: birth date, appointment date, sex, serial
const ID_GROUPS: [usize; 4] = [8, 6, 1, 3];

/// Default label put in front of the formatted ID in the combined column
pub const DEFAULT_ID_LABEL: &str = "ID. ";

/// One attendee listed in the roster table.
///
/// Field names on the wire follow the letter payload (`no`, `nama`, `nip`,
/// `jabatan`, `satker`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendeeRecord {
    /// Sequence number supplied by the caller. Rows are numbered by input
    /// position, so this is informational only.
    #[serde(rename = "no", default)]
    pub sequence_number: i64,
    #[serde(rename = "nama")]
    pub full_name: String,
    /// Kept as text; only its length matters for formatting.
    #[serde(rename = "nip")]
    pub national_id: String,
    #[serde(rename = "jabatan")]
    pub position: String,
    #[serde(rename = "satker")]
    pub org_unit: String,
}

impl AttendeeRecord {
    pub fn new(
        sequence_number: i64,
        full_name: impl Into<String>,
        national_id: impl Into<String>,
        position: impl Into<String>,
        org_unit: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            full_name: full_name.into(),
            national_id: national_id.into(),
            position: position.into(),
            org_unit: org_unit.into(),
        }
    }

    /// Ordered cell values for this record's roster row.
    ///
    /// `position` is the 1-based index of the record in the input list.
    #[must_use = "returns the cell values for the roster row"]
    pub fn roster_values(
        &self,
        layout: LayoutVariant,
        position: usize,
        id_label: &str,
    ) -> Vec<String> {
        let number = format!("{position}.");
        match layout {
            LayoutVariant::SeparateColumns => vec![
                number,
                self.full_name.clone(),
                self.national_id.clone(),
                self.position.clone(),
                self.org_unit.clone(),
            ],
            LayoutVariant::NameIdCombined => vec![
                number,
                format!(
                    "{}\n{}{}",
                    self.full_name,
                    id_label,
                    format_national_id(&self.national_id)
                ),
                self.position.clone(),
                self.org_unit.clone(),
            ],
        }
    }
}

/// Group an 18-character ID as `8 6 1 3`; any other length is returned as is.
///
/// Length is counted in characters. No check is made that the ID is numeric.
#[must_use = "returns the display form of the ID"]
pub fn format_national_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() != GROUPED_ID_LENGTH {
        return id.to_string();
    }

    let mut groups = Vec::with_capacity(ID_GROUPS.len());
    let mut start = 0;
    for size in ID_GROUPS {
        groups.push(chars[start..start + size].iter().collect::<String>());
        start += size;
    }
    groups.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_eighteen_character_id() {
        assert_eq!(
            format_national_id("123456789012345678"),
            "12345678 901234 5 678"
        );
    }

    #[test]
    fn test_format_other_lengths_pass_through() {
        assert_eq!(format_national_id(""), "");
        assert_eq!(format_national_id("12345"), "12345");
        assert_eq!(
            format_national_id("1234567890123456789"),
            "1234567890123456789"
        );
    }

    #[test]
    fn test_format_does_not_validate_digits() {
        assert_eq!(
            format_national_id("ABCDEFGHIJKLMNOPQR"),
            "ABCDEFGH IJKLMN O PQR"
        );
    }

    #[test]
    fn test_separate_columns_values() {
        let record = AttendeeRecord::new(7, "Siti", "123456789012345678", "Analis", "Biro Umum");
        let values = record.roster_values(LayoutVariant::SeparateColumns, 1, DEFAULT_ID_LABEL);
        assert_eq!(
            values,
            vec!["1.", "Siti", "123456789012345678", "Analis", "Biro Umum"]
        );
    }

    #[test]
    fn test_combined_values_use_position_not_sequence_number() {
        let record = AttendeeRecord::new(42, "Budi", "123456789012345678", "Kepala", "Setjen");
        let values = record.roster_values(LayoutVariant::NameIdCombined, 3, DEFAULT_ID_LABEL);
        assert_eq!(values.len(), LayoutVariant::NameIdCombined.column_count());
        assert_eq!(values[0], "3.");
        assert_eq!(values[1], "Budi\nID. 12345678 901234 5 678");
        assert_eq!(values[2], "Kepala");
        assert_eq!(values[3], "Setjen");
    }

    #[test]
    fn test_combined_values_with_custom_label() {
        let record = AttendeeRecord::new(1, "Ani", "99", "Staf", "Dit. A");
        let values = record.roster_values(LayoutVariant::NameIdCombined, 1, "NIP. ");
        assert_eq!(values[1], "Ani\nNIP. 99");
    }

    #[test]
    fn test_deserialize_payload_keys() {
        let json = r#"{"no": 1, "nama": "Ani", "nip": "123", "jabatan": "Staf", "satker": "Biro"}"#;
        let record: AttendeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, AttendeeRecord::new(1, "Ani", "123", "Staf", "Biro"));
    }
}
