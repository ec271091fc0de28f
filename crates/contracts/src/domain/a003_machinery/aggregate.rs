use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineryId(pub Uuid);

impl MachineryId {
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

impl AggregateId for MachineryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(MachineryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Leased construction equipment (cranes, excavators, lifts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machinery {
    #[serde(flatten)]
    pub base: BaseAggregate<MachineryId>,

    /// Supplier that leases this machine, if any
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<String>,

    #[serde(default)]
    pub category: String,

    #[serde(rename = "plateOrSerial", default)]
    pub plate_or_serial: String,

    #[serde(rename = "monthlyRentalCost", default)]
    pub monthly_rental_cost: f64,

    #[serde(default)]
    pub status: String,
}

impl Machinery {
    pub fn new_for_insert(
        code: String,
        description: String,
        supplier_id: Option<String>,
        category: String,
        plate_or_serial: String,
        monthly_rental_cost: f64,
        status: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(MachineryId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            supplier_id,
            category,
            plate_or_serial,
            monthly_rental_cost,
            status,
        }
    }

    pub fn update(&mut self, dto: &MachineryDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.supplier_id = dto.supplier_id.clone();
        self.category = dto.category.clone().unwrap_or_default();
        self.plate_or_serial = dto.plate_or_serial.clone().unwrap_or_default();
        self.monthly_rental_cost = dto.monthly_rental_cost.unwrap_or(0.0);
        self.status = dto.status.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre de la máquina no puede estar vacío".into());
        }
        if self.monthly_rental_cost < 0.0 {
            return Err("El coste de alquiler no puede ser negativo".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Machinery {
    type Id = MachineryId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "machinery"
    }

    fn element_name() -> &'static str {
        "Maquinaria"
    }

    fn list_name() -> &'static str {
        "Maquinaria"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MachineryDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "supplierId")]
    pub supplier_id: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "plateOrSerial")]
    pub plate_or_serial: Option<String>,
    #[serde(rename = "monthlyRentalCost")]
    pub monthly_rental_cost: Option<f64>,
    pub status: Option<String>,
}
