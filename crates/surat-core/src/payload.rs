//! Letter payload as submitted by the calling layer.
//!
//! Required-field validation and persistence of the raw payload belong to
//! the caller. This module only gives the payload a typed shape and maps it
//! onto placeholders and clause lists.

use crate::clause::{ClauseInput, ClauseList};
use crate::error::Result;
use crate::placeholder::PlaceholderMap;
use crate::record::AttendeeRecord;
use serde::{Deserialize, Serialize};

/// Scalar field name → template token, in substitution order.
pub const SCALAR_TOKENS: [(&str, &str); 8] = [
    ("nomor_surat_tugas", "{{nomor_surat_tugas}}"),
    ("nama_kegiatan", "{{NAMA_KEGIATAN}}"),
    ("tahun_anggaran_kegiatan", "{{TAHUN_ANGGARAN_KEGIATAN}}"),
    ("hari_pelaksanaan", "{{HARI_PELAKSANAAN}}"),
    ("tanggal_pelaksanaan", "{{TANGGAL_PELAKSANAAN}}"),
    ("tempat_pelaksanaan", "{{TEMPAT_PELAKSANAAN}}"),
    ("kota", "{{KOTA}}"),
    ("tanggal", "{{TANGGAL}}"),
];

/// Typed letter payload. Missing or `null` scalars become empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPayload {
    pub nomor_surat_tugas: Option<String>,
    pub nama_kegiatan: Option<String>,
    pub tahun_anggaran_kegiatan: Option<String>,
    pub hari_pelaksanaan: Option<String>,
    pub tanggal_pelaksanaan: Option<String>,
    pub tempat_pelaksanaan: Option<String>,
    pub kota: Option<String>,
    pub tanggal: Option<String>,
    pub menimbang: Option<ClauseInput>,
    pub dasar_hukum: Option<ClauseInput>,
    pub peserta: Vec<AttendeeRecord>,
}

impl InputPayload {
    /// Parse a JSON payload
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn scalar(&self, field: &str) -> &str {
        let value = match field {
            "nomor_surat_tugas" => &self.nomor_surat_tugas,
            "nama_kegiatan" => &self.nama_kegiatan,
            "tahun_anggaran_kegiatan" => &self.tahun_anggaran_kegiatan,
            "hari_pelaksanaan" => &self.hari_pelaksanaan,
            "tanggal_pelaksanaan" => &self.tanggal_pelaksanaan,
            "tempat_pelaksanaan" => &self.tempat_pelaksanaan,
            "kota" => &self.kota,
            "tanggal" => &self.tanggal,
            _ => return "",
        };
        value.as_deref().unwrap_or_default()
    }

    /// Scalar fields as an ordered placeholder map
    #[must_use = "returns the placeholder map for the scalar fields"]
    pub fn placeholders(&self) -> PlaceholderMap {
        SCALAR_TOKENS
            .iter()
            .map(|(field, token)| (*token, self.scalar(field)))
            .collect()
    }

    /// "Menimbang" clauses, a single string normalized to one item
    #[must_use]
    pub fn menimbang(&self) -> ClauseList {
        self.menimbang.clone().map(ClauseList::from).unwrap_or_default()
    }

    /// "Dasar hukum" clauses, a single string normalized to one item
    #[must_use]
    pub fn dasar_hukum(&self) -> ClauseList {
        self.dasar_hukum
            .clone()
            .map(ClauseList::from)
            .unwrap_or_default()
    }
}
