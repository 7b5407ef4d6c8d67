pub mod f64;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f64::ImageF64;
pub use self::traits::{ImageView, ImageViewMut};
pub use self::u8::ImageU8;
