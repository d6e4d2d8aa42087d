//! LUX scenes - Cornell box builder and JSON options.

mod config;
mod cornell;

pub use config::{load_options, LuxOptions, RenderOptions, SceneError, SceneResult};
pub use cornell::{cornell_box, mirror_wall_material, object_material, CornellOptions, Finish, Wall};
