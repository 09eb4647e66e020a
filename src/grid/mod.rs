//! The cell grid: glyphs, lines, cursor, modes, scroll region, charset table, and the `Screen`
//! that owns the primary and alternate buffers and every mutating operation on them.

pub mod charset;
pub mod cursor;
pub mod glyph;
pub mod line;
pub mod mode;
pub mod scroll_region;
pub mod screen;

pub use charset::{Charset, CharsetTable};
pub use cursor::{Cursor, CursorState, CursorStyle};
pub use glyph::{CellAttr, Color, Glyph};
pub use line::Line;
pub use mode::TermMode;
pub use scroll_region::ScrollRegion;
pub use screen::{ActiveBuffer, Grid, Screen};
