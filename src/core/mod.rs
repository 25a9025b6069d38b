pub mod calibrate;
pub mod color;
pub mod morph;
pub mod path;
pub mod raster;
pub mod scan;
pub mod series;
pub mod smooth;

pub use calibrate::{
    AxisScaleMode, DateAnchor, TimeAxisMap, ValueAnchor, ValueAxisMap, parse_flexible_date,
};
pub use color::{ColorSpec, DEFAULT_TOLERANCE};
pub use morph::{close_mask, fill_mask_holes};
pub use path::{PixelPath, RawPath, build_median_path, fill_gaps};
pub use raster::{Raster, Rgb};
pub use scan::{Bounds, ColumnRows, MatchMask, scan_mask};
pub use series::{CalibratedSeries, SeriesSample};
pub use smooth::{DEFAULT_SMOOTHING_WINDOW, SmoothingMethod};
