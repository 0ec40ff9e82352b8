// Services module

pub mod extract;
pub mod lookup;
pub mod store;

pub use extract::ExtractService;
pub use lookup::LookupService;
pub use store::PropertyStore;
