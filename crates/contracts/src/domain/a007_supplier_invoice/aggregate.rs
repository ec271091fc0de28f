use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::finance::FinancialBreakdown;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierInvoiceId(pub Uuid);

impl SupplierInvoiceId {
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

impl AggregateId for SupplierInvoiceId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SupplierInvoiceId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Incoming supplier invoice. IVA and total are derived on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierInvoice {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierInvoiceId>,

    #[serde(rename = "supplierId")]
    pub supplier_id: String,

    #[serde(rename = "invoiceNumber", default)]
    pub invoice_number: String,

    #[serde(rename = "issueDate")]
    pub issue_date: chrono::NaiveDate,

    #[serde(rename = "baseAmount")]
    pub base_amount: f64,

    #[serde(rename = "ivaRate")]
    pub iva_rate: f64,

    #[serde(rename = "ivaAmount", default)]
    pub iva_amount: f64,

    #[serde(rename = "totalAmount", default)]
    pub total_amount: f64,

    #[serde(default)]
    pub paid: bool,
}

impl SupplierInvoice {
    pub fn new_for_insert(
        code: String,
        description: String,
        supplier_id: String,
        invoice_number: String,
        issue_date: chrono::NaiveDate,
        base_amount: f64,
        iva_rate: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(SupplierInvoiceId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            supplier_id,
            invoice_number,
            issue_date,
            base_amount,
            iva_rate,
            iva_amount: 0.0,
            total_amount: 0.0,
            paid: false,
        }
    }

    pub fn update(&mut self, dto: &SupplierInvoiceDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.supplier_id = dto.supplier_id.clone();
        self.invoice_number = dto.invoice_number.clone().unwrap_or_default();
        self.issue_date = dto.issue_date;
        self.base_amount = dto.base_amount;
        self.iva_rate = dto.iva_rate.unwrap_or(21.0);
        self.paid = dto.paid;
    }

    /// Recompute IVA and total from the base amount. Supplier invoices carry
    /// no contract retention.
    pub fn recompute(&mut self) {
        let b = FinancialBreakdown::from_base(self.base_amount, self.iva_rate, 0.0);
        self.base_amount = b.base_amount;
        self.iva_amount = b.iva_amount;
        self.total_amount = b.net_amount;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.supplier_id.trim().is_empty() {
            return Err("La factura debe estar asociada a un proveedor".into());
        }
        if self.invoice_number.trim().is_empty() {
            return Err("El número de factura no puede estar vacío".into());
        }
        if self.base_amount < 0.0 {
            return Err("El importe base no puede ser negativo".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for SupplierInvoice {
    type Id = SupplierInvoiceId;

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
        "a007"
    }

    fn collection_name() -> &'static str {
        "supplier_invoice"
    }

    fn element_name() -> &'static str {
        "Factura"
    }

    fn list_name() -> &'static str {
        "Facturas"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupplierInvoiceDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: Option<String>,
    #[serde(rename = "issueDate")]
    pub issue_date: chrono::NaiveDate,
    #[serde(rename = "baseAmount")]
    pub base_amount: f64,
    #[serde(rename = "ivaRate")]
    pub iva_rate: Option<f64>,
    #[serde(default)]
    pub paid: bool,
}
