use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ProjectId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ProjectId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Construction project. Certifications reference it and inherit its
/// contractual retention rate by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub base: BaseAggregate<ProjectId>,

    #[serde(rename = "clientName", default)]
    pub client_name: String,

    #[serde(rename = "siteAddress", default)]
    pub site_address: String,

    #[serde(rename = "startDate")]
    pub start_date: Option<chrono::NaiveDate>,

    /// Contractual retention, in percentage points
    #[serde(rename = "retentionRate", default)]
    pub retention_rate: f64,

    #[serde(default)]
    pub status: String,
}

impl Project {
    pub fn new_for_insert(
        code: String,
        description: String,
        client_name: String,
        site_address: String,
        start_date: Option<chrono::NaiveDate>,
        retention_rate: f64,
        status: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(ProjectId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            client_name,
            site_address,
            start_date,
            retention_rate,
            status,
        }
    }

    pub fn update(&mut self, dto: &ProjectDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.client_name = dto.client_name.clone().unwrap_or_default();
        self.site_address = dto.site_address.clone().unwrap_or_default();
        self.start_date = dto.start_date;
        self.retention_rate = dto.retention_rate.unwrap_or(0.0);
        self.status = dto.status.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre de la obra no puede estar vacío".into());
        }
        if !(0.0..=100.0).contains(&self.retention_rate) {
            return Err("La retención debe estar entre 0 y 100".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Project {
    type Id = ProjectId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "project"
    }

    fn element_name() -> &'static str {
        "Obra"
    }

    fn list_name() -> &'static str {
        "Obras"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "clientName")]
    pub client_name: Option<String>,
    #[serde(rename = "siteAddress")]
    pub site_address: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(rename = "retentionRate")]
    pub retention_rate: Option<f64>,
    pub status: Option<String>,
}
