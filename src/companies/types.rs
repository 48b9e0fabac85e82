//! Types for companies

use serde::{Deserialize, Serialize};

/// A company profile as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Company {
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Registered company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raison_sociale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub siret_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Main sector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    /// Every sector the company works in
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photos_url: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub works_url: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub employees_id: Vec<String>,
}

impl Company {
    /// The sector list plus the main sector, without duplicates
    pub fn all_sectors(&self) -> Vec<&str> {
        let mut sectors: Vec<&str> = self.sectors.iter().map(String::as_str).collect();
        if let Some(main) = self.sector.as_deref() {
            if !sectors.iter().any(|s| s.trim().eq_ignore_ascii_case(main.trim())) {
                sectors.push(main);
            }
        }
        sectors
    }
}
