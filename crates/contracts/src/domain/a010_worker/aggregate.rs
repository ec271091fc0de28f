use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::finance::payroll_net;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(pub Uuid);

impl WorkerId {
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

impl AggregateId for WorkerId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(WorkerId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Personnel record. `base.description` holds the worker's full name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    #[serde(flatten)]
    pub base: BaseAggregate<WorkerId>,

    #[serde(default)]
    pub dni: String,

    /// Trade or professional category, e.g. "Oficial 1ª", "Gruista"
    #[serde(default)]
    pub trade: String,

    #[serde(rename = "hourlyCost", default)]
    pub hourly_cost: f64,

    /// IRPF withholding rate, percentage points
    #[serde(rename = "irpfRate", default)]
    pub irpf_rate: f64,

    #[serde(default)]
    pub active: bool,
}

impl Worker {
    pub fn new_for_insert(
        code: String,
        description: String,
        dni: String,
        trade: String,
        hourly_cost: f64,
        irpf_rate: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(WorkerId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            dni,
            trade,
            hourly_cost,
            irpf_rate,
            active: true,
        }
    }

    pub fn update(&mut self, dto: &WorkerDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.dni = dto.dni.clone().unwrap_or_default();
        self.trade = dto.trade.clone().unwrap_or_default();
        self.hourly_cost = dto.hourly_cost.unwrap_or(0.0);
        self.irpf_rate = dto.irpf_rate.unwrap_or(0.0);
        self.active = dto.active;
    }

    /// Gross, withheld and net pay for a number of worked hours
    pub fn payroll_for_hours(&self, hours: f64) -> (f64, f64, f64) {
        let gross = self.hourly_cost * hours;
        let (withheld, net) = payroll_net(gross, self.irpf_rate);
        (crate::shared::finance::round_cents(gross), withheld, net)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre del trabajador no puede estar vacío".into());
        }
        if self.hourly_cost < 0.0 {
            return Err("El coste por hora no puede ser negativo".into());
        }
        if !(0.0..=100.0).contains(&self.irpf_rate) {
            return Err("El IRPF debe estar entre 0 y 100".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Worker {
    type Id = WorkerId;

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
        "a010"
    }

    fn collection_name() -> &'static str {
        "worker"
    }

    fn element_name() -> &'static str {
        "Trabajador"
    }

    fn list_name() -> &'static str {
        "Trabajadores"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkerDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub dni: Option<String>,
    pub trade: Option<String>,
    #[serde(rename = "hourlyCost")]
    pub hourly_cost: Option<f64>,
    #[serde(rename = "irpfRate")]
    pub irpf_rate: Option<f64>,
    #[serde(default)]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payroll_for_hours() {
        let w = Worker::new_for_insert(
            "TRB-001".into(),
            "Juan Pérez".into(),
            "12345678Z".into(),
            "Oficial 1ª".into(),
            20.0,
            15.0,
            None,
        );
        let (gross, withheld, net) = w.payroll_for_hours(160.0);
        assert_eq!(gross, 3200.0);
        assert_eq!(withheld, 480.0);
        assert_eq!(net, 2720.0);
    }
}
