mod maxrects;
mod rect;
mod search;

pub use maxrects::MaxRectsPacker;
pub use rect::Rect;
pub use search::{BinPacking, MAX_BIN_EDGE, START_BIN_EDGE, pack_boxes};
