use crate::resolver::BatchResolver;
use crate::storage::ResultStore;
use crate::variants::VariantCatalog;

/// Shared by every handler through axum's `State` extractor.
pub struct AppState {
    pub resolver: BatchResolver,
    pub store: Box<dyn ResultStore>,
    pub catalog: VariantCatalog,
}
