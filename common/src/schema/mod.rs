pub mod regulation;
pub mod normalize;

pub use regulation::{ConditionSchema, RegulationSchema};
pub use normalize::normalize_schema;
