//! Placement of encoded groups in image pixels.
//!
//! Group `g` lives in row `g / 3`, channel `g % 3` (R, G, B), columns `0..9`.
//! Only that one channel of those nine pixels is written; the other channels
//! and every column from 9 on keep the carrier's values.
//!
//! Format: one row holds up to three groups, so `n` groups need an image at
//! least 9 pixels wide and `ceil(n / 3)` rows tall.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use thiserror::Error;
use tracing::{debug, warn};

use crate::codec::EncodedGroup;
use crate::{GROUPS_PER_ROW, GROUP_SIZE};

/// Minimum image width able to hold a group.
pub const MIN_WIDTH: u32 = GROUP_SIZE as u32;

/// Errors that can occur while placing or extracting groups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Image too small: need {needed_width}x{needed_height}, have {width}x{height}")]
    ImageTooSmall {
        needed_width: u32,
        needed_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Requested {requested} groups but the image holds at most {available}")]
    UnderflowGroupCount { requested: usize, available: usize },
}

/// Color channel holding a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Row and channel of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupAddress {
    pub row: usize,
    pub channel: Channel,
}

impl GroupAddress {
    /// Address of the zero-based group `index`.
    pub fn of(index: usize) -> Self {
        let channel = match index % GROUPS_PER_ROW {
            0 => Channel::Red,
            1 => Channel::Green,
            _ => Channel::Blue,
        };
        Self {
            row: index / GROUPS_PER_ROW,
            channel,
        }
    }

    /// Inverse of [`GroupAddress::of`].
    pub fn group_index(&self) -> usize {
        self.row * GROUPS_PER_ROW + self.channel.index()
    }
}

/// Rows needed for `groups` groups.
pub fn rows_needed(groups: usize) -> usize {
    groups.div_ceil(GROUPS_PER_ROW)
}

/// Number of groups an image can hold.
pub fn capacity(width: u32, height: u32) -> usize {
    if width < MIN_WIDTH {
        0
    } else {
        height as usize * GROUPS_PER_ROW
    }
}

/// Interpolation used when an undersized carrier is stretched.
///
/// The stretched carrier only hosts the data; its fidelity is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    #[default]
    Nearest,
    /// Bilinear.
    Triangle,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
        }
    }
}

/// Builds the RGB canvas that will receive `group_count` groups.
///
/// Without a carrier a black image of the minimum size is created (at least
/// one row, so it can always be saved). A carrier smaller than required is
/// stretched when `resize` is given and rejected otherwise.
pub fn prepare_canvas(
    carrier: Option<&DynamicImage>,
    group_count: usize,
    resize: Option<ResizeFilter>,
) -> Result<RgbImage, LayoutError> {
    let rows = rows_needed(group_count);

    let Some(carrier) = carrier else {
        let height = u32::try_from(rows.max(1)).map_err(|_| too_small(rows, 0, 0))?;
        debug!(width = MIN_WIDTH, height, "creating black canvas");
        return Ok(RgbImage::from_pixel(MIN_WIDTH, height, Rgb([0, 0, 0])));
    };

    let (width, height) = carrier.dimensions();
    if width >= MIN_WIDTH && height as usize >= rows {
        return Ok(carrier.to_rgb8());
    }

    let Some(filter) = resize else {
        return Err(too_small(rows, width, height));
    };
    let new_height = u32::try_from(rows.max(height as usize))
        .map_err(|_| too_small(rows, width, height))?;
    let new_width = width.max(MIN_WIDTH);

    debug!(
        from_width = width,
        from_height = height,
        to_width = new_width,
        to_height = new_height,
        ?filter,
        "resizing carrier"
    );
    Ok(carrier
        .resize_exact(new_width, new_height, filter.into())
        .to_rgb8())
}

/// Writes groups in order, group `i` at [`GroupAddress::of`]`(i)`.
pub fn write_groups(canvas: &mut RgbImage, groups: &[EncodedGroup]) -> Result<(), LayoutError> {
    let (width, height) = canvas.dimensions();
    let rows = rows_needed(groups.len());
    if !groups.is_empty() && (width < MIN_WIDTH || (height as usize) < rows) {
        return Err(too_small(rows, width, height));
    }

    for (index, group) in groups.iter().enumerate() {
        let address = GroupAddress::of(index);
        let channel = address.channel.index();
        for (col, &value) in group.values().iter().enumerate() {
            let pixel = canvas.get_pixel_mut(col as u32, address.row as u32);
            pixel.0[channel] = value;
        }
    }

    debug!(groups = groups.len(), rows, "groups written");
    Ok(())
}

/// How many groups to pull out of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Read until an all-zero group or the last row.
    ///
    /// Only meaningful for the sum transform, whose values are never zero.
    /// Best-effort: anything written after a zeroed group is not seen.
    Sentinel,
    /// Read exactly this many groups.
    Count(usize),
}

/// Reads groups back out of an image.
pub fn read_groups(image: &RgbImage, extent: Extent) -> Result<Vec<EncodedGroup>, LayoutError> {
    let (width, height) = image.dimensions();
    let available = capacity(width, height);

    let limit = match extent {
        Extent::Count(0) => return Ok(Vec::new()),
        Extent::Count(requested) => {
            if width < MIN_WIDTH {
                return Err(too_small(rows_needed(requested), width, height));
            }
            if requested > available {
                return Err(LayoutError::UnderflowGroupCount {
                    requested,
                    available,
                });
            }
            requested
        }
        Extent::Sentinel => {
            if width < MIN_WIDTH {
                return Err(too_small(1, width, height));
            }
            available
        }
    };

    let mut groups = Vec::with_capacity(limit);
    for index in 0..limit {
        let group = read_group(image, GroupAddress::of(index));
        if extent == Extent::Sentinel && group.is_zero() {
            debug!(groups = index, "end-of-data sentinel reached");
            break;
        }
        groups.push(group);
    }

    if extent == Extent::Sentinel && groups.len() == available && available > 0 {
        warn!(groups = available, "no sentinel found, read every row of the image");
    }
    Ok(groups)
}

fn read_group(image: &RgbImage, address: GroupAddress) -> EncodedGroup {
    let channel = address.channel.index();
    let mut values = [0u8; GROUP_SIZE];
    for (col, value) in values.iter_mut().enumerate() {
        *value = image.get_pixel(col as u32, address.row as u32).0[channel];
    }
    EncodedGroup::new(values)
}

fn too_small(rows: usize, width: u32, height: u32) -> LayoutError {
    LayoutError::ImageTooSmall {
        needed_width: MIN_WIDTH,
        needed_height: u32::try_from(rows).unwrap_or(u32::MAX),
        width,
        height,
    }
}
