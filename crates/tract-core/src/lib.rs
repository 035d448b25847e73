pub mod constants;
pub mod events;
pub mod gamepad;
pub mod geometry;
pub mod glottis;
pub mod params;
pub mod registry;
pub mod surface;
pub mod tongue;
pub mod vowels;

pub use constants::*;
pub use events::*;
pub use gamepad::*;
pub use geometry::*;
pub use params::*;
pub use registry::*;
pub use surface::*;
pub use tongue::*;
pub use vowels::*;
