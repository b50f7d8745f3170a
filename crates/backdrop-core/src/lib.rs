pub mod canvas;
pub mod clock;
pub mod color;
pub mod constants;
pub mod error;
pub mod generators;
pub mod pointer;
#[cfg(feature = "testing")]
pub mod record;
pub mod stage;
pub mod surface;

pub use canvas::*;
pub use clock::*;
pub use color::*;
pub use error::*;
pub use generators::*;
pub use pointer::*;
#[cfg(feature = "testing")]
pub use record::*;
pub use stage::*;
pub use surface::*;
