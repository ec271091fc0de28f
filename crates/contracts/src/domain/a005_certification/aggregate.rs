use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::finance::FinancialBreakdown;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CertificationId(pub Uuid);

impl CertificationId {
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

impl AggregateId for CertificationId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(CertificationId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Periodic billing document for work executed on a project.
///
/// `iva_amount`, `retention_amount`, `net_amount` and `accumulated_amount`
/// are derived figures: the service recomputes them on every save, the
/// client never supplies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    #[serde(flatten)]
    pub base: BaseAggregate<CertificationId>,

    #[serde(rename = "projectId")]
    pub project_id: String,

    #[serde(rename = "issueDate")]
    pub issue_date: chrono::NaiveDate,

    #[serde(rename = "baseAmount")]
    pub base_amount: f64,

    /// Percentage points, e.g. 21.0
    #[serde(rename = "ivaRate")]
    pub iva_rate: f64,

    /// Percentage points withheld per contract terms
    #[serde(rename = "retentionRate")]
    pub retention_rate: f64,

    #[serde(rename = "ivaAmount", default)]
    pub iva_amount: f64,

    #[serde(rename = "retentionAmount", default)]
    pub retention_amount: f64,

    #[serde(rename = "netAmount", default)]
    pub net_amount: f64,

    /// Running total of base amounts for the project up to this record
    #[serde(rename = "accumulatedAmount", default)]
    pub accumulated_amount: f64,
}

impl Certification {
    pub fn new_for_insert(
        code: String,
        description: String,
        project_id: String,
        issue_date: chrono::NaiveDate,
        base_amount: f64,
        iva_rate: f64,
        retention_rate: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(CertificationId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            project_id,
            issue_date,
            base_amount,
            iva_rate,
            retention_rate,
            iva_amount: 0.0,
            retention_amount: 0.0,
            net_amount: 0.0,
            accumulated_amount: 0.0,
        }
    }

    /// Overwrite editable fields from the form payload. Derived amounts are
    /// recomputed afterwards via [`Certification::recompute`].
    pub fn update(&mut self, dto: &CertificationDto) {
        if let Some(code) = &dto.code {
            self.base.code = code.clone();
        }
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.project_id = dto.project_id.clone();
        self.issue_date = dto.issue_date;
        self.base_amount = dto.base_amount;
        self.iva_rate = dto.iva_rate.unwrap_or(21.0);
        self.retention_rate = dto.retention_rate.unwrap_or(0.0);
    }

    /// Recompute derived amounts from base figures and the accumulated
    /// total supplied by the service
    pub fn recompute(&mut self, accumulated_amount: f64) {
        let b = FinancialBreakdown::from_base(self.base_amount, self.iva_rate, self.retention_rate);
        self.base_amount = b.base_amount;
        self.iva_amount = b.iva_amount;
        self.retention_amount = b.retention_amount;
        self.net_amount = b.net_amount;
        self.accumulated_amount = accumulated_amount;
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.project_id.trim().is_empty() {
            return Err("La certificación debe estar asociada a una obra".into());
        }
        if self.base_amount < 0.0 {
            return Err("El importe base no puede ser negativo".into());
        }
        if !(0.0..=100.0).contains(&self.iva_rate) {
            return Err("El tipo de IVA debe estar entre 0 y 100".into());
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

impl AggregateRoot for Certification {
    type Id = CertificationId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "certification"
    }

    fn element_name() -> &'static str {
        "Certificación"
    }

    fn list_name() -> &'static str {
        "Certificaciones"
    }
}

// ============================================================================
// DTO
// ============================================================================

/// Form payload. Carries only editable fields; derived amounts are
/// recomputed server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CertificationDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(rename = "issueDate")]
    pub issue_date: chrono::NaiveDate,
    #[serde(rename = "baseAmount")]
    pub base_amount: f64,
    #[serde(rename = "ivaRate")]
    pub iva_rate: Option<f64>,
    #[serde(rename = "retentionRate")]
    pub retention_rate: Option<f64>,
}
