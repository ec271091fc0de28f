use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierId(pub Uuid);

impl SupplierId {
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

impl AggregateId for SupplierId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SupplierId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Supplier of machinery rentals, materials or services.
/// `base.description` holds the commercial name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierId>,

    #[serde(rename = "legalName", default)]
    pub legal_name: String,

    /// Tax id (CIF/NIF)
    #[serde(default)]
    pub cif: String,

    #[serde(rename = "contactEmail", default)]
    pub contact_email: String,

    #[serde(default)]
    pub phone: String,

    /// Facet used by list filtering, e.g. "Equipos", "Materiales"
    #[serde(default)]
    pub category: String,

    #[serde(rename = "paymentTermsDays", default)]
    pub payment_terms_days: i32,

    #[serde(default)]
    pub status: String,
}

impl Supplier {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        legal_name: String,
        cif: String,
        contact_email: String,
        phone: String,
        category: String,
        payment_terms_days: i32,
        status: String,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(SupplierId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            legal_name,
            cif,
            contact_email,
            phone,
            category,
            payment_terms_days,
            status,
        }
    }

    pub fn update(&mut self, dto: &SupplierDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.legal_name = dto.legal_name.clone().unwrap_or_default();
        self.cif = dto.cif.clone().unwrap_or_default();
        self.contact_email = dto.contact_email.clone().unwrap_or_default();
        self.phone = dto.phone.clone().unwrap_or_default();
        self.category = dto.category.clone().unwrap_or_default();
        self.payment_terms_days = dto.payment_terms_days.unwrap_or(0);
        self.status = dto.status.clone().unwrap_or_default();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("El nombre comercial no puede estar vacío".into());
        }
        if self.payment_terms_days < 0 {
            return Err("Los días de pago no pueden ser negativos".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Supplier {
    type Id = SupplierId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "supplier"
    }

    fn element_name() -> &'static str {
        "Proveedor"
    }

    fn list_name() -> &'static str {
        "Proveedores"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SupplierDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "legalName")]
    pub legal_name: Option<String>,
    pub cif: Option<String>,
    #[serde(rename = "contactEmail")]
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "paymentTermsDays")]
    pub payment_terms_days: Option<i32>,
    pub status: Option<String>,
}
