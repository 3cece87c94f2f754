pub mod name_normalizer;
pub mod schema_resolver;
pub mod spec_to_ir;
pub mod usage;

pub use spec_to_ir::transform;
pub use usage::UsedTypes;
