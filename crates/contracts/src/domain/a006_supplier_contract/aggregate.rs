use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierContractId(pub Uuid);

impl SupplierContractId {
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

impl AggregateId for SupplierContractId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SupplierContractId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Rental or service contract signed with a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierContract {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierContractId>,

    #[serde(rename = "supplierId")]
    pub supplier_id: String,

    #[serde(rename = "startDate")]
    pub start_date: chrono::NaiveDate,

    #[serde(rename = "endDate")]
    pub end_date: Option<chrono::NaiveDate>,

    #[serde(rename = "monthlyAmount", default)]
    pub monthly_amount: f64,

    #[serde(default)]
    pub signed: bool,
}

impl SupplierContract {
    pub fn new_for_insert(
        code: String,
        description: String,
        supplier_id: String,
        start_date: chrono::NaiveDate,
        end_date: Option<chrono::NaiveDate>,
        monthly_amount: f64,
        signed: bool,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(SupplierContractId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            supplier_id,
            start_date,
            end_date,
            monthly_amount,
            signed,
        }
    }

    pub fn update(&mut self, dto: &SupplierContractDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.supplier_id = dto.supplier_id.clone();
        self.start_date = dto.start_date;
        self.end_date = dto.end_date;
        self.monthly_amount = dto.monthly_amount.unwrap_or(0.0);
        self.signed = dto.signed;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.supplier_id.trim().is_empty() {
            return Err("El contrato debe estar asociado a un proveedor".into());
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err("La fecha de fin no puede ser anterior al inicio".into());
            }
        }
        if self.monthly_amount < 0.0 {
            return Err("El importe mensual no puede ser negativo".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for SupplierContract {
    type Id = SupplierContractId;

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
        "a006"
    }

    fn collection_name() -> &'static str {
        "supplier_contract"
    }

    fn element_name() -> &'static str {
        "Contrato"
    }

    fn list_name() -> &'static str {
        "Contratos"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupplierContractDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    #[serde(rename = "startDate")]
    pub start_date: chrono::NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(rename = "monthlyAmount")]
    pub monthly_amount: Option<f64>,
    #[serde(default)]
    pub signed: bool,
}
