//! Facet filters for the designer and company catalogues

use std::str::FromStr;

use crate::companies::Company;
use crate::designers::Designer;
use crate::forms::ValidationError;

/// A single active filter over one kind of entity
pub trait Facet: Clone + PartialEq + Send + Sync + 'static {
    /// Entity being filtered
    type Entity: Clone + Send + Sync + 'static;

    /// The filter dimension, without its value
    type Kind: Copy + PartialEq + FromStr<Err = ValidationError>;

    /// Build a filter from a dimension and the searched item
    fn new(kind: Self::Kind, item: &str) -> Self;

    fn kind(&self) -> Self::Kind;

    /// The searched item
    fn item(&self) -> &str;

    /// Whether `entity` passes the filter
    fn matches(&self, entity: &Self::Entity) -> bool;

    /// Values `entity` holds for `kind`, used to build the filter menus
    fn values(kind: Self::Kind, entity: &Self::Entity) -> Vec<String>;

    /// Parse a `(category, item)` pair; unknown categories are rejected
    fn parse(category: &str, item: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(category.parse()?, item))
    }
}

/// Comparison form: trimmed and lowercased
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn scalar_matches(value: &str, item: &str) -> bool {
    normalize(value) == normalize(item)
}

fn list_contains<S: AsRef<str>>(values: &[S], item: &str) -> bool {
    let item = normalize(item);
    values.iter().any(|value| normalize(value.as_ref()) == item)
}

/// Designer filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignerFacetKind {
    Profession,
    Specialty,
    Sphere,
    Sector,
    Country,
}

impl FromStr for DesignerFacetKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "profession" => Ok(Self::Profession),
            "specialty" => Ok(Self::Specialty),
            "sphere" => Ok(Self::Sphere),
            "sector" => Ok(Self::Sector),
            "country" => Ok(Self::Country),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}

/// Active designer filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignerFacet {
    Profession(String),
    Specialty(String),
    Sphere(String),
    Sector(String),
    /// Country of residence
    Country(String),
}

impl Facet for DesignerFacet {
    type Entity = Designer;
    type Kind = DesignerFacetKind;

    fn new(kind: DesignerFacetKind, item: &str) -> Self {
        let item = item.to_string();
        match kind {
            DesignerFacetKind::Profession => Self::Profession(item),
            DesignerFacetKind::Specialty => Self::Specialty(item),
            DesignerFacetKind::Sphere => Self::Sphere(item),
            DesignerFacetKind::Sector => Self::Sector(item),
            DesignerFacetKind::Country => Self::Country(item),
        }
    }

    fn kind(&self) -> DesignerFacetKind {
        match self {
            Self::Profession(_) => DesignerFacetKind::Profession,
            Self::Specialty(_) => DesignerFacetKind::Specialty,
            Self::Sphere(_) => DesignerFacetKind::Sphere,
            Self::Sector(_) => DesignerFacetKind::Sector,
            Self::Country(_) => DesignerFacetKind::Country,
        }
    }

    fn item(&self) -> &str {
        match self {
            Self::Profession(item)
            | Self::Specialty(item)
            | Self::Sphere(item)
            | Self::Sector(item)
            | Self::Country(item) => item,
        }
    }

    fn matches(&self, designer: &Designer) -> bool {
        match self {
            Self::Profession(item) => scalar_matches(&designer.profession, item),
            Self::Specialty(item) => list_contains(&designer.specialties, item),
            Self::Sphere(item) => list_contains(&designer.spheres_of_influence, item),
            Self::Sector(item) => list_contains(&designer.favorite_sectors, item),
            Self::Country(item) => scalar_matches(&designer.country_of_residence, item),
        }
    }

    fn values(kind: DesignerFacetKind, designer: &Designer) -> Vec<String> {
        match kind {
            DesignerFacetKind::Profession => vec![designer.profession.clone()],
            DesignerFacetKind::Specialty => designer.specialties.clone(),
            DesignerFacetKind::Sphere => designer.spheres_of_influence.clone(),
            DesignerFacetKind::Sector => designer.favorite_sectors.clone(),
            DesignerFacetKind::Country => vec![designer.country_of_residence.clone()],
        }
    }
}

/// Company filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyFacetKind {
    Type,
    Sector,
    Country,
}

impl FromStr for CompanyFacetKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "type" => Ok(Self::Type),
            "sector" => Ok(Self::Sector),
            "country" => Ok(Self::Country),
            other => Err(ValidationError::UnknownCategory(other.to_string())),
        }
    }
}

/// Active company filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyFacet {
    Type(String),
    Sector(String),
    Country(String),
}

impl Facet for CompanyFacet {
    type Entity = Company;
    type Kind = CompanyFacetKind;

    fn new(kind: CompanyFacetKind, item: &str) -> Self {
        let item = item.to_string();
        match kind {
            CompanyFacetKind::Type => Self::Type(item),
            CompanyFacetKind::Sector => Self::Sector(item),
            CompanyFacetKind::Country => Self::Country(item),
        }
    }

    fn kind(&self) -> CompanyFacetKind {
        match self {
            Self::Type(_) => CompanyFacetKind::Type,
            Self::Sector(_) => CompanyFacetKind::Sector,
            Self::Country(_) => CompanyFacetKind::Country,
        }
    }

    fn item(&self) -> &str {
        match self {
            Self::Type(item) | Self::Sector(item) | Self::Country(item) => item,
        }
    }

    fn matches(&self, company: &Company) -> bool {
        match self {
            Self::Type(item) => {
                scalar_matches(company.kind.as_deref().unwrap_or_default(), item)
            }
            Self::Sector(item) => list_contains(&company.all_sectors(), item),
            Self::Country(item) => {
                scalar_matches(company.country.as_deref().unwrap_or_default(), item)
            }
        }
    }

    fn values(kind: CompanyFacetKind, company: &Company) -> Vec<String> {
        match kind {
            CompanyFacetKind::Type => company.kind.iter().cloned().collect(),
            CompanyFacetKind::Sector => company
                .all_sectors()
                .into_iter()
                .map(str::to_string)
                .collect(),
            CompanyFacetKind::Country => company.country.iter().cloned().collect(),
        }
    }
}
