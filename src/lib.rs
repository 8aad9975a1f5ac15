#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod events;
pub mod host;
pub mod registry;
pub mod resources;
pub mod scene;
pub mod scroll;
pub mod settings;
pub mod stage;

pub use animation::{CurtainController, CurtainFrame, CurtainPhase, TweenSystem};
pub use assets::{Assets, GeometryKey, MaterialKey};
pub use errors::{Result, StageError};
pub use events::StageEvent;
pub use host::{Compositor, ElementId, ElementRect, FrameScheduler, LayoutProvider, ScheduleError, Viewport};
pub use registry::{ImageEntry, ImageRegistry};
pub use resources::{FlatMaterial, Geometry, ImageMaterial, Material, ScreenEffect, ShaderVariant, TextureSource, UniformChannel};
pub use scene::{Camera, Mesh, MeshKey, Scene};
pub use scroll::{ActiveElement, ElementFlags, InertialScroll, ScrollSource, SpeedElement};
pub use settings::StageSettings;
pub use stage::Stage;
