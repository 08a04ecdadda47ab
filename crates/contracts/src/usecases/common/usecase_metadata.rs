/// UseCase metadata used for identification and documentation
pub trait UseCaseMetadata {
    /// UseCase index (for example "u101")
    fn usecase_index() -> &'static str;

    /// Technical name (for example "sync_products")
    fn usecase_name() -> &'static str;

    /// Display name for the UI
    fn display_name() -> &'static str;

    /// UseCase description
    fn description() -> &'static str {
        ""
    }

    /// Full name of the form "u101_sync_products"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
