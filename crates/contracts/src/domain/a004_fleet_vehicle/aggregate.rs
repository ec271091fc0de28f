use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FleetVehicleId(pub Uuid);

impl FleetVehicleId {
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

impl AggregateId for FleetVehicleId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(FleetVehicleId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Company-owned vehicle. `base.description` holds "brand model" for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetVehicle {
    #[serde(flatten)]
    pub base: BaseAggregate<FleetVehicleId>,

    #[serde(default)]
    pub plate: String,

    #[serde(default)]
    pub brand: String,

    #[serde(default)]
    pub model: String,

    /// Next mandatory inspection (ITV) due date
    #[serde(rename = "itvDue")]
    pub itv_due: Option<chrono::NaiveDate>,

    #[serde(rename = "assignedWorkerId")]
    pub assigned_worker_id: Option<String>,

    #[serde(default)]
    pub status: String,
}

impl FleetVehicle {
    pub fn new_for_insert(
        code: String,
        description: String,
        plate: String,
        brand: String,
        model: String,
        itv_due: Option<chrono::NaiveDate>,
        assigned_worker_id: Option<String>,
        status: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(FleetVehicleId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            plate,
            brand,
            model,
            itv_due,
            assigned_worker_id,
            status,
        }
    }

    pub fn update(&mut self, dto: &FleetVehicleDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.plate = dto.plate.clone().unwrap_or_default();
        self.brand = dto.brand.clone().unwrap_or_default();
        self.model = dto.model.clone().unwrap_or_default();
        self.itv_due = dto.itv_due;
        self.assigned_worker_id = dto.assigned_worker_id.clone();
        self.status = dto.status.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.plate.trim().is_empty() {
            return Err("La matrícula no puede estar vacía".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for FleetVehicle {
    type Id = FleetVehicleId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "fleet_vehicle"
    }

    fn element_name() -> &'static str {
        "Vehículo"
    }

    fn list_name() -> &'static str {
        "Flota"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FleetVehicleDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub plate: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    #[serde(rename = "itvDue")]
    pub itv_due: Option<chrono::NaiveDate>,
    #[serde(rename = "assignedWorkerId")]
    pub assigned_worker_id: Option<String>,
    pub status: Option<String>,
}
