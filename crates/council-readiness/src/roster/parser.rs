use super::domain::{DelegateRecord, Department, Gender};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::io::Read;

pub(crate) fn parse_delegates<R: Read>(reader: R) -> Result<Vec<DelegateRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut delegates = Vec::new();

    for record in csv_reader.deserialize::<DelegateRow>() {
        let row = record?;
        delegates.push(DelegateRecord {
            full_name: row.full_name,
            student_id: row.student_id,
            department_code: row.department_code,
            department_name: row.department_name,
            gender: row.gender,
            year_of_study: row.year_of_study,
            gpa: row.gpa,
            disciplinary_clear: row.disciplinary_clear,
        });
    }

    Ok(delegates)
}

/// Parse a department registry export; repeated codes (one row per course) collapse into one.
pub(crate) fn parse_departments<R: Read>(reader: R) -> Result<Vec<Department>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut departments: BTreeMap<String, Department> = BTreeMap::new();

    for record in csv_reader.deserialize::<DepartmentRow>() {
        let row = record?;
        let entry = departments
            .entry(row.department_code.clone())
            .or_insert_with(|| Department {
                code: row.department_code,
                name: row.department_name,
                target_min: None,
            });
        if row.target_min.is_some() {
            entry.target_min = row.target_min;
        }
    }

    Ok(departments.into_values().collect())
}

#[derive(Debug, Deserialize)]
struct DelegateRow {
    full_name: String,
    student_id: String,
    department_code: String,
    department_name: String,
    gender: Gender,
    year_of_study: u8,
    #[serde(default)]
    gpa: Option<f32>,
    #[serde(default, deserialize_with = "flexible_bool")]
    disciplinary_clear: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct DepartmentRow {
    department_code: String,
    department_name: String,
    #[serde(default)]
    target_min: Option<u32>,
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = opt.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(Some(true)),
        "false" | "no" | "n" | "0" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!(
            "expected yes/no for disciplinary_clear, found '{other}'"
        ))),
    }
}
