use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierPaymentId(pub Uuid);

impl SupplierPaymentId {
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

impl AggregateId for SupplierPaymentId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SupplierPaymentId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Payment made to a supplier for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierPayment {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierPaymentId>,

    #[serde(rename = "supplierId")]
    pub supplier_id: String,

    pub year: i32,

    /// 1..=12
    pub month: u32,

    pub amount: f64,

    #[serde(rename = "paymentDate")]
    pub payment_date: Option<chrono::NaiveDate>,

    /// "Transferencia", "Confirming", ...
    #[serde(default)]
    pub method: String,
}

impl SupplierPayment {
    pub fn new_for_insert(
        code: String,
        description: String,
        supplier_id: String,
        year: i32,
        month: u32,
        amount: f64,
        payment_date: Option<chrono::NaiveDate>,
        method: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(SupplierPaymentId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            supplier_id,
            year,
            month,
            amount,
            payment_date,
            method,
        }
    }

    pub fn update(&mut self, dto: &SupplierPaymentDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.supplier_id = dto.supplier_id.clone();
        self.year = dto.year;
        self.month = dto.month;
        self.amount = dto.amount;
        self.payment_date = dto.payment_date;
        self.method = dto.method.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.supplier_id.trim().is_empty() {
            return Err("El pago debe estar asociado a un proveedor".into());
        }
        if !(1..=12).contains(&self.month) {
            return Err("El mes debe estar entre 1 y 12".into());
        }
        if self.amount < 0.0 {
            return Err("El importe no puede ser negativo".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for SupplierPayment {
    type Id = SupplierPaymentId;

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
        "a008"
    }

    fn collection_name() -> &'static str {
        "supplier_payment"
    }

    fn element_name() -> &'static str {
        "Pago"
    }

    fn list_name() -> &'static str {
        "Pagos"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupplierPaymentDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
    #[serde(rename = "paymentDate")]
    pub payment_date: Option<chrono::NaiveDate>,
    pub method: Option<String>,
}
