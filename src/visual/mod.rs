//! Visual feedback state
//!
//! Materials and lights are plain data here; nothing is rendered. They exist
//! so gameplay can express "look alerted" and observers can read it back.

mod alert;
mod light;
mod material;

pub use alert::AlertVisual;
pub use light::{ALERT_RED, SpotLight};
pub use material::Material;
