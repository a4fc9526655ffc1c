pub mod books;

use std::sync::Arc;

use shelf_db::BookStore;
use shelf_kernel::ModuleRegistry;

/// Register all project-specific modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: Arc<dyn BookStore>) {
    registry.register(books::create_module(store));
}
