pub mod assets;
pub mod errors;
pub mod interaction;
pub mod resources;
pub mod scene;

pub use assets::{AssetServer, GeometryHandle, MaterialHandle, ModelSender, Prefab, PrefabMesh, PrefabNode};
pub use errors::{Result, XrError};
pub use interaction::{
    DeviceId, InteractionContext, InteractionOutcome, InteractionSettings, XrController, XrEvent, XrEventKind,
};
pub use resources::primitives::*;
pub use resources::{BoundingBox, Geometry, Material, Mesh, Ray, Side};
pub use scene::{NodeHandle, NodeHierarchy, Node, Scene, Transform};
