//! XR interaction: picking, hierarchical selection, highlight and grab.

pub mod candidates;
pub mod context;
pub mod controller;
pub mod grab;
pub mod highlight;
pub mod query;
pub mod selection;
pub mod settings;

pub use candidates::CandidateSet;
pub use context::{InteractionContext, InteractionOutcome};
pub use controller::{DeviceId, XrController, XrEvent, XrEventKind};
pub use grab::{grab, release, GrabState};
pub use highlight::{highlighted_count, set_highlight};
pub use query::{query, query_hit, PickHit, RAY_DIRECTIONS};
pub use selection::advance;
pub use settings::InteractionSettings;
