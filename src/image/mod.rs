pub mod f32;
pub mod io;
pub mod overlay;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::overlay::Overlay;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
