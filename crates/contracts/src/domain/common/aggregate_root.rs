use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Defines the accessors and static metadata every aggregate of the
/// system provides.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    // ========================================================================
    // Instance accessors
    // ========================================================================

    fn id(&self) -> Self::Id;

    fn code(&self) -> &str;

    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ========================================================================
    // Static aggregate metadata
    // ========================================================================

    /// Aggregate index in the system (for example "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name used for the DB table (for example "shop")
    fn collection_name() -> &'static str;

    /// Singular display name
    fn element_name() -> &'static str;

    /// Plural display name
    fn list_name() -> &'static str;

    // ========================================================================
    // Default implementations
    // ========================================================================

    /// Full aggregate name, used as the table name (for example "a001_shop")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
