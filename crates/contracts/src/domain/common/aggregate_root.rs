use super::EntityMetadata;

/// Required surface of every aggregate root in the system
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Aggregate index in the system, e.g. "a005"
    fn aggregate_index() -> &'static str;

    /// Collection name used for database tables, e.g. "certification"
    fn collection_name() -> &'static str;

    /// Singular UI name, e.g. "Certificación"
    fn element_name() -> &'static str;

    /// Plural UI name, e.g. "Certificaciones"
    fn list_name() -> &'static str;

    /// Full system name, e.g. "a005_certification"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
