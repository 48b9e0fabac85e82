//! Types for designers and their calendar events

use serde::{Deserialize, Serialize};

/// A designer profile as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Designer {
    /// Unique identifier
    pub id: String,

    pub email: String,

    /// URL of the profile picture
    pub profile_picture: String,

    pub firstname: String,

    pub lastname: String,

    pub biography: String,

    pub phone_number: String,

    pub profession: String,

    pub specialties: Vec<String>,

    pub spheres_of_influence: Vec<String>,

    pub favorite_sectors: Vec<String>,

    pub country_of_origin: String,

    pub country_of_residence: String,

    /// Junior, senior or expert
    pub professional_level: String,

    /// URLs of the major works pictures
    pub major_works: Vec<String>,

    pub portfolio_url: String,

    pub events: Vec<DesignerEvent>,

    /// Id of the administrator who created the profile, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl Designer {
    /// "Firstname Lastname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname.trim(), self.lastname.trim())
            .trim()
            .to_string()
    }
}

/// A calendar event attached to a designer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerEvent {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// ISO-8601 start date
    pub start_date: String,

    /// ISO-8601 end date
    pub end_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Fields accepted by the admin "create designer" endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDesigner {
    pub firstname: String,
    pub lastname: String,
    pub profession: String,
    pub specialties: Vec<String>,
    pub spheres_of_influence: Vec<String>,
    pub favorite_sectors: Vec<String>,
    pub country_of_residence: String,
}
