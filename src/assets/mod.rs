pub mod loader;
pub mod prefab;
pub mod server;
pub mod storage;

pub use loader::{ModelDelivery, ModelQueue, ModelSender};
pub use prefab::{Prefab, PrefabMesh, PrefabNode};
pub use server::{AssetServer, GeometryHandle, MaterialHandle};
pub use storage::AssetStorage;
