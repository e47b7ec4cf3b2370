//! Occupancy grid: storage, fan-sweep builder, and line rasterization.

mod builder;
mod raster;
mod storage;

pub use builder::GridBuilder;
pub use raster::DdaLine;
pub use storage::OccupancyGrid;
