pub mod color;
pub mod record;
pub mod schema;

pub use color::{ColorOption, ColorSlot};
pub use record::{normalize_plate, CarRecord, ChecklistItem};
pub use schema::{FeatureDef, FeaturePackage, PackageProgress};
