//! Placing encoded groups in images.
//!
//! - [`layout`]: group addressing, canvas preparation, write and extraction
//! - [`image`]: loading and saving carrier, key and encoded images

pub mod image;
pub mod layout;

pub use self::image::{StegoImage, StegoImageError};
pub use self::layout::{
    capacity, prepare_canvas, read_groups, rows_needed, write_groups, Channel, Extent,
    GroupAddress, LayoutError, ResizeFilter,
};
