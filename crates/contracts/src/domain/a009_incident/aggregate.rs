use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncidentId(pub Uuid);

impl IncidentId {
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

impl AggregateId for IncidentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(IncidentId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Breakdown, accident or inspection finding on a vehicle or machine.
/// `base.description` holds the incident summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    #[serde(flatten)]
    pub base: BaseAggregate<IncidentId>,

    #[serde(rename = "vehicleId")]
    pub vehicle_id: Option<String>,

    #[serde(rename = "machineryId")]
    pub machinery_id: Option<String>,

    pub date: chrono::NaiveDate,

    /// "Leve", "Grave", "Crítica"
    #[serde(default)]
    pub severity: String,

    #[serde(default)]
    pub resolved: bool,
}

impl Incident {
    pub fn new_for_insert(
        code: String,
        description: String,
        vehicle_id: Option<String>,
        machinery_id: Option<String>,
        date: chrono::NaiveDate,
        severity: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(IncidentId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            vehicle_id,
            machinery_id,
            date,
            severity,
            resolved: false,
        }
    }

    pub fn update(&mut self, dto: &IncidentDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.vehicle_id = dto.vehicle_id.clone();
        self.machinery_id = dto.machinery_id.clone();
        self.date = dto.date;
        self.severity = dto.severity.clone().unwrap_or_default();
        self.resolved = dto.resolved;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.vehicle_id.is_none() && self.machinery_id.is_none() {
            return Err("La incidencia debe referirse a un vehículo o a una máquina".into());
        }
        if self.base.description.trim().is_empty() {
            return Err("La descripción no puede estar vacía".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Incident {
    type Id = IncidentId;

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
        "a009"
    }

    fn collection_name() -> &'static str {
        "incident"
    }

    fn element_name() -> &'static str {
        "Incidencia"
    }

    fn list_name() -> &'static str {
        "Incidencias"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IncidentDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "vehicleId")]
    pub vehicle_id: Option<String>,
    #[serde(rename = "machineryId")]
    pub machinery_id: Option<String>,
    pub date: chrono::NaiveDate,
    pub severity: Option<String>,
    #[serde(default)]
    pub resolved: bool,
}
