pub mod helpers;
pub mod test_scene;

pub use helpers::*;
pub use local_connection::LocalConnection;
pub use test_protocol::{protocol, Light, MirrorTransform, Transform, LIGHT, TRANSFORM};
pub use test_scene::TestScene;
