use serde::Serialize;

/// Lookup tables backing the demographic fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    University,
    Major,
    Gender,
    Experience,
    MarketingSource,
}

impl LookupKind {
    pub const ALL: [LookupKind; 5] = [
        LookupKind::University,
        LookupKind::Major,
        LookupKind::Gender,
        LookupKind::Experience,
        LookupKind::MarketingSource,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            LookupKind::University => "universities",
            LookupKind::Major => "majors",
            LookupKind::Gender => "genders",
            LookupKind::Experience => "experience_levels",
            LookupKind::MarketingSource => "marketing_sources",
        }
    }

    /// Field name used in request bodies and error messages.
    pub fn field(&self) -> &'static str {
        match self {
            LookupKind::University => "university_id",
            LookupKind::Major => "major_id",
            LookupKind::Gender => "gender_id",
            LookupKind::Experience => "experience_id",
            LookupKind::MarketingSource => "marketing_source_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct LookupEntry {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Lookups {
    pub universities: Vec<LookupEntry>,
    pub majors: Vec<LookupEntry>,
    pub genders: Vec<LookupEntry>,
    pub experience_levels: Vec<LookupEntry>,
    pub marketing_sources: Vec<LookupEntry>,
}
