pub mod accessibility;
pub mod apply;
pub mod defaults;
pub mod errors;
pub mod loader;
pub mod model;

pub use accessibility::LoadVerdict;
pub use defaults::default_snapshot;
pub use errors::PolicyError;
pub use loader::{load_snapshot, load_snapshot_with_options, LoadOptions};
pub use model::{
    AccessibilityPolicy, PolicyProvenance, PolicySnapshot, PolicySource, PolicyView,
    ReadinessPolicy,
};
