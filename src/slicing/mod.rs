mod cuts;
mod slicer;

pub use cuts::AxisCuts;
pub use slicer::slice;
