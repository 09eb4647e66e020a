//! `Grid`: one buffer's lines + dirty flags + tab stops + its own cursor pair.
//! `Screen`: owns a primary and an alternate `Grid`, the scroll region, mode bits, the charset
//! table, and the selection, and implements every mutating operation from the screen-buffer
//! component of this engine.
//!
//! Grounded in `st.c`'s `tnew`/`tresize`/`tmoveto`/`tscrollup`/`tscrolldown`/`tclearregion`/
//! `tinsertblank`/`tdeletechar`/`tinsertblankline`/`tdeleteline`/`tsetchar`/`tnewline`/
//! `tswapscreen`/`tputtab` (`examples/original_source/st.c`), restructured per this crate's
//! redesign notes: the source's pointer-swap of `term.line`/`term.alt` becomes a tagged
//! `ActiveBuffer` index over two owned `Grid`s instead of raw pointer juggling.

use super::charset::CharsetTable;
use super::cursor::{Cursor, CursorState, CursorStyle};
use super::glyph::{CellAttr, Color, Glyph};
use super::line::Line;
use super::mode::TermMode;
use super::scroll_region::ScrollRegion;
use crate::selection::{SelType, Selection, Snap};

pub const DEFAULT_TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveBuffer {
    Primary,
    Alternate,
}

/// One screen buffer: its lines, dirty flags, tab stops, live cursor, and DECSC/DECRC save slot.
#[derive(Debug, Clone)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub lines: Vec<Line>,
    pub dirty: Vec<bool>,
    pub tabs: Vec<bool>,
    pub cursor: Cursor,
    pub saved_cursor: Cursor,
}

impl Grid {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            rows,
            cols,
            lines: vec![Line::blank(cols); rows],
            dirty: vec![true; rows],
            tabs: default_tabs(cols),
            cursor: Cursor::default(),
            saved_cursor: Cursor::default(),
        }
    }

    pub fn mark_dirty(&mut self, y: usize) {
        if let Some(d) = self.dirty.get_mut(y) {
            *d = true;
        }
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty.iter_mut().for_each(|d| *d = true);
    }

    #[must_use]
    pub fn line(&self, y: usize) -> &Line {
        &self.lines[y]
    }
}

fn default_tabs(cols: usize) -> Vec<bool> {
    (0..cols).map(|x| x != 0 && x % DEFAULT_TAB_WIDTH == 0).collect()
}

pub struct Screen {
    primary: Grid,
    alternate: Grid,
    active: ActiveBuffer,
    pub scroll_region: ScrollRegion,
    pub mode: TermMode,
    pub charset: CharsetTable,
    pub selection: Selection,
    pub cursor_style: CursorStyle,
}

impl Screen {
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            primary: Grid::new(cols, rows),
            alternate: Grid::new(cols, rows),
            active: ActiveBuffer::Primary,
            scroll_region: ScrollRegion::full(rows),
            mode: TermMode::default(),
            charset: CharsetTable::default(),
            selection: Selection::default(),
            cursor_style: CursorStyle::default(),
        }
    }

    /// Replace the active buffer's cursor wholesale (used by the executor after mutating a copy
    /// of it, e.g. for SGR pen changes or DECOM).
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.active_grid_mut().cursor = cursor;
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.active_grid().rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.active_grid().cols
    }

    #[must_use]
    pub fn active_buffer(&self) -> ActiveBuffer {
        self.active
    }

    #[must_use]
    pub fn active_grid(&self) -> &Grid {
        match self.active {
            ActiveBuffer::Primary => &self.primary,
            ActiveBuffer::Alternate => &self.alternate,
        }
    }

    fn active_grid_mut(&mut self) -> &mut Grid {
        match self.active {
            ActiveBuffer::Primary => &mut self.primary,
            ActiveBuffer::Alternate => &mut self.alternate,
        }
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.active_grid().cursor
    }

    #[must_use]
    pub fn line(&self, y: usize) -> &Line {
        self.active_grid().line(y)
    }

    #[must_use]
    pub fn dirty(&self, y: usize) -> bool {
        self.active_grid().dirty[y]
    }

    pub fn clear_dirty(&mut self, y: usize) {
        self.active_grid_mut().dirty[y] = false;
    }

    // ---- Cursor motion -------------------------------------------------

    fn clamp_row_for_origin(&self, y: usize) -> usize {
        if self.active_grid().cursor.state.contains(CursorState::ORIGIN) {
            (self.scroll_region.top + y).min(self.scroll_region.bot)
        } else {
            y.min(self.rows() - 1)
        }
    }

    pub fn move_to(&mut self, x: usize, y: usize) {
        let cols = self.cols();
        let y = self.clamp_row_for_origin(y);
        let g = self.active_grid_mut();
        g.cursor.x = x.min(cols - 1);
        g.cursor.y = y;
        g.cursor.state.remove(CursorState::WRAPNEXT);
    }

    pub fn move_rel(&mut self, dx: isize, dy: isize) {
        let g = self.active_grid();
        let x = (g.cursor.x as isize + dx).max(0) as usize;
        let y = (g.cursor.y as isize + dy).max(0) as usize;
        self.move_to(x, y);
    }

    // ---- Scrolling ------------------------------------------------------

    /// Rotate rows `n` positions "up" within `[orig, bot]`: row `orig` is discarded (or moved
    /// into scrollback, which this engine does not implement), rows above shift down into the
    /// gap, and `n` fresh blank rows appear at the bottom of the region.
    pub fn scroll_up(&mut self, orig: usize, n: usize) {
        let bot = self.scroll_region.bot;
        let cols = self.cols();
        let n = n.min(bot.saturating_sub(orig) + 1);
        if n == 0 {
            return;
        }
        let fill = self.blank_glyph();
        let g = self.active_grid_mut();
        g.lines[orig..=bot].rotate_left(n);
        for y in (bot + 1 - n)..=bot {
            g.lines[y] = Line::blank_with(cols, fill);
        }
        for y in orig..=bot {
            g.mark_dirty(y);
        }
        self.selection.scroll(orig, bot, n as isize);
    }

    pub fn scroll_down(&mut self, orig: usize, n: usize) {
        let bot = self.scroll_region.bot;
        let cols = self.cols();
        let n = n.min(bot.saturating_sub(orig) + 1);
        if n == 0 {
            return;
        }
        let fill = self.blank_glyph();
        let g = self.active_grid_mut();
        g.lines[orig..=bot].rotate_right(n);
        for y in orig..(orig + n) {
            g.lines[y] = Line::blank_with(cols, fill);
        }
        for y in orig..=bot {
            g.mark_dirty(y);
        }
        self.selection.scroll(orig, bot, -(n as isize));
    }

    // ---- Clearing / editing ---------------------------------------------

    #[must_use]
    fn blank_glyph(&self) -> Glyph {
        let c = self.cursor();
        Glyph::blank_with(CellAttr::empty(), c.fg, c.bg)
    }

    /// Fill `[x1, y1]..=[x2, y2]` (row-major, inclusive) with blanks at the current pen colors.
    /// If the cleared rectangle intersects the current selection it is invalidated once, after
    /// the fill, rather than per cell (§9 resolution for `tclearregion`).
    pub fn clear_region(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));
        let fill = self.blank_glyph();
        let cols = self.cols();
        let intersects_selection = self.selection.mode != crate::selection::SelMode::Idle
            && (y1..=y2).any(|y| (self.selection.nb.y..=self.selection.ne.y).contains(&y));
        let g = self.active_grid_mut();
        for y in y1..=y2.min(g.rows - 1) {
            for x in x1..=x2.min(cols - 1) {
                g.lines[y][x] = fill;
            }
            g.mark_dirty(y);
        }
        if intersects_selection {
            self.selection.clear();
        }
    }

    pub fn insert_blanks(&mut self, n: usize) {
        let cursor = self.cursor();
        let cols = self.cols();
        let fill = self.blank_glyph();
        let n = n.min(cols - cursor.x);
        let g = self.active_grid_mut();
        let row = &mut g.lines[cursor.y];
        for x in (cursor.x..cols).rev() {
            row[x] = if x >= cursor.x + n { row[x - n] } else { fill };
        }
        g.mark_dirty(cursor.y);
    }

    pub fn delete_chars(&mut self, n: usize) {
        let cursor = self.cursor();
        let cols = self.cols();
        let fill = self.blank_glyph();
        let n = n.min(cols - cursor.x);
        let g = self.active_grid_mut();
        let row = &mut g.lines[cursor.y];
        for x in cursor.x..cols {
            row[x] = if x + n < cols { row[x + n] } else { fill };
        }
        g.mark_dirty(cursor.y);
    }

    pub fn insert_lines(&mut self, n: usize) {
        let y = self.cursor().y;
        if !self.scroll_region.contains_row(y) {
            return;
        }
        self.scroll_down(y, n);
    }

    pub fn delete_lines(&mut self, n: usize) {
        let y = self.cursor().y;
        if !self.scroll_region.contains_row(y) {
            return;
        }
        self.scroll_up(y, n);
    }

    /// Write one cell, demoting a `WIDE`/`WDUMMY` partner to a blank if overwritten asymmetrically.
    pub fn set_char(&mut self, ch: char, attr: CellAttr, fg: Color, bg: Color, x: usize, y: usize) {
        let cols = self.cols();
        let g = self.active_grid_mut();
        let was_wide = g.lines[y][x].is_wide();
        let was_wdummy = g.lines[y][x].is_wdummy();
        g.lines[y][x] = Glyph {
            code_point: ch,
            attr,
            fg,
            bg,
        };
        if was_wide && x + 1 < cols {
            g.lines[y][x + 1] = Glyph::blank();
        }
        if was_wdummy && x > 0 {
            g.lines[y][x - 1] = Glyph::blank();
        }
        g.mark_dirty(y);
    }

    /// Top-level write with VT100 wrap semantics: `WRAPNEXT` defers the wrap to the *next*
    /// printable character rather than wrapping eagerly at end of line.
    pub fn put_char(&mut self, ch: char) {
        let ch = self.charset.translate(ch);
        let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1).max(1);
        let cols = self.cols();
        let cursor = self.cursor();

        if self.mode.contains(TermMode::WRAP) && cursor.state.contains(CursorState::WRAPNEXT) {
            self.active_grid_mut().lines[cursor.y][cols - 1]
                .attr
                .insert(CellAttr::WRAP);
            self.newline(true);
        }

        let cursor = self.cursor();
        let mut x = cursor.x;
        if width == 2 && x + 1 >= cols {
            self.newline(true);
            x = self.cursor().x;
        }

        let y = self.cursor().y;
        let attr = if width == 2 {
            cursor.attr | CellAttr::WIDE
        } else {
            cursor.attr
        };
        self.set_char(ch, attr, cursor.fg, cursor.bg, x, y);
        if width == 2 && x + 1 < cols {
            self.set_char(' ', cursor.attr | CellAttr::WDUMMY, cursor.fg, cursor.bg, x + 1, y);
        }

        let g = self.active_grid_mut();
        if x + width >= cols {
            g.cursor.state.insert(CursorState::WRAPNEXT);
        } else {
            g.cursor.x = x + width;
            g.cursor.state.remove(CursorState::WRAPNEXT);
        }
    }

    pub fn newline(&mut self, first_col: bool) {
        let cursor = self.cursor();
        if cursor.y == self.scroll_region.bot {
            self.scroll_up(self.scroll_region.top, 1);
        } else {
            let new_y = (cursor.y + 1).min(self.rows() - 1);
            self.active_grid_mut().cursor.y = new_y;
        }
        let g = self.active_grid_mut();
        if first_col {
            g.cursor.x = 0;
        }
        g.cursor.state.remove(CursorState::WRAPNEXT);
    }

    pub fn swap_screen(&mut self) {
        self.active = match self.active {
            ActiveBuffer::Primary => ActiveBuffer::Alternate,
            ActiveBuffer::Alternate => ActiveBuffer::Primary,
        };
        self.mode.toggle(TermMode::ALTSCREEN);
        self.active_grid_mut().mark_all_dirty();
    }

    /// Mark every row of the active buffer dirty, for mode toggles (e.g. DECSET 5, reverse
    /// video) whose effect is visible on every cell already on screen.
    pub fn mark_all_dirty(&mut self) {
        self.active_grid_mut().mark_all_dirty();
    }

    // ---- Save/restore cursor (DECSC/DECRC, and the 1048/1049 DECSET path) ----

    pub fn save_cursor(&mut self) {
        let c = self.cursor();
        self.active_grid_mut().saved_cursor = c;
    }

    pub fn restore_cursor(&mut self) {
        let saved = self.active_grid().saved_cursor;
        self.active_grid_mut().cursor = saved;
    }

    // ---- Tabs -------------------------------------------------------------

    /// Advance (n > 0) or retreat (n < 0) through the next `|n|` set tab stops; never writes
    /// cells, only moves the cursor, clamped to `[0, cols-1]`.
    pub fn put_tab(&mut self, n: isize) {
        let cols = self.cols();
        let mut x = self.cursor().x;
        if n >= 0 {
            for _ in 0..n {
                loop {
                    if x + 1 >= cols {
                        break;
                    }
                    x += 1;
                    if self.active_grid().tabs[x] {
                        break;
                    }
                }
            }
        } else {
            for _ in 0..(-n) {
                loop {
                    if x == 0 {
                        break;
                    }
                    x -= 1;
                    if self.active_grid().tabs[x] {
                        break;
                    }
                }
            }
        }
        let g = self.active_grid_mut();
        g.cursor.x = x.min(cols - 1);
    }

    pub fn set_tab_stop(&mut self, x: usize, set: bool) {
        if let Some(slot) = self.active_grid_mut().tabs.get_mut(x) {
            *slot = set;
        }
    }

    pub fn clear_all_tabs(&mut self) {
        self.active_grid_mut().tabs.iter_mut().for_each(|t| *t = false);
    }

    // ---- Reset / resize -----------------------------------------------------

    pub fn reset(&mut self) {
        let (cols, rows) = (self.cols(), self.rows());
        self.primary = Grid::new(cols, rows);
        self.alternate = Grid::new(cols, rows);
        self.active = ActiveBuffer::Primary;
        self.scroll_region = ScrollRegion::full(rows);
        self.mode = TermMode::default();
        self.charset = CharsetTable::default();
        self.selection.clear();
    }

    /// Resize both buffers. New rows are cleared with the current background. Tab stops are
    /// regenerated. The cursor (in both buffers) and both buffers' saved cursors are clamped into
    /// bounds and have `WRAPNEXT` cleared — per this crate's resolution of the resize open
    /// question, clamping the *inactive* buffer's saved cursor too, not just the active one.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        for grid in [&mut self.primary, &mut self.alternate] {
            resize_grid(grid, cols, rows);
        }
        self.scroll_region = ScrollRegion::full(rows);
        if self.selection.nb.y >= rows || self.selection.ne.y >= rows {
            self.selection.clear();
        }
    }
}

fn resize_grid(grid: &mut Grid, cols: usize, rows: usize) {
    // Slide the window up to keep the cursor's row in view when shrinking height, freeing rows
    // off the *top* rather than truncating the tail, per `st.c`'s `tresize()`: when the cursor
    // sits at or past the new row count, drop exactly that many rows from the top first so the
    // content around the cursor survives instead of the rows nearest the cursor being the ones
    // discarded.
    let drop_from_top = (grid.cursor.y + 1).saturating_sub(rows).min(grid.lines.len());
    if drop_from_top > 0 {
        grid.lines.drain(0..drop_from_top);
        grid.dirty.drain(0..drop_from_top);
        grid.cursor.y -= drop_from_top;
        grid.saved_cursor.y = grid.saved_cursor.y.saturating_sub(drop_from_top);
    }

    let fill = Glyph::blank();
    grid.lines.resize(rows, Line::blank(cols));
    for line in &mut grid.lines {
        line.resize(cols, fill);
    }
    grid.dirty.resize(rows, true);
    grid.tabs = default_tabs(cols);
    grid.rows = rows;
    grid.cols = cols;

    for cursor in [&mut grid.cursor, &mut grid.saved_cursor] {
        cursor.x = cursor.x.min(cols.saturating_sub(1));
        cursor.y = cursor.y.min(rows.saturating_sub(1));
        cursor.state.remove(CursorState::WRAPNEXT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_char_basic_row() {
        let mut s = Screen::new(10, 5);
        for ch in "hi".chars() {
            s.put_char(ch);
        }
        assert_eq!(s.line(0)[0].code_point, 'h');
        assert_eq!(s.line(0)[1].code_point, 'i');
        assert_eq!(s.cursor().x, 2);
    }

    #[test]
    fn wrap_sets_wrap_attr_and_continues_next_row() {
        let mut s = Screen::new(4, 3);
        for ch in "ABCDE".chars() {
            s.put_char(ch);
        }
        assert!(s.line(0)[3].attr.contains(CellAttr::WRAP));
        assert_eq!(s.line(1)[0].code_point, 'E');
    }

    #[test]
    fn wide_char_pairs_with_wdummy() {
        let mut s = Screen::new(10, 2);
        s.put_char('\u{4e2d}'); // wide CJK char
        assert!(s.line(0)[0].is_wide());
        assert!(s.line(0)[1].is_wdummy());
    }

    #[test]
    fn overwriting_wide_cell_demotes_partner() {
        let mut s = Screen::new(10, 2);
        s.put_char('\u{4e2d}');
        s.move_to(0, 0);
        s.put_char('A');
        assert!(!s.line(0)[0].is_wide());
        assert_eq!(s.line(0)[1].code_point, ' ');
        assert!(!s.line(0)[1].is_wdummy());
    }

    #[test]
    fn scroll_up_clears_bottom_and_shifts() {
        let mut s = Screen::new(5, 3);
        s.set_char('A', CellAttr::empty(), Color::Default, Color::Default, 0, 0);
        s.set_char('B', CellAttr::empty(), Color::Default, Color::Default, 0, 1);
        s.scroll_up(0, 1);
        assert_eq!(s.line(0)[0].code_point, 'B');
        assert_eq!(s.line(2)[0].code_point, ' ');
    }

    #[test]
    fn ed2_idempotent() {
        let mut s = Screen::new(5, 3);
        s.put_char('x');
        let cols = s.cols();
        let rows = s.rows();
        s.clear_region(0, 0, cols - 1, rows - 1);
        let snapshot: Vec<_> = (0..rows).map(|y| s.line(y).clone()).collect();
        s.clear_region(0, 0, cols - 1, rows - 1);
        let snapshot2: Vec<_> = (0..rows).map(|y| s.line(y).clone()).collect();
        assert_eq!(snapshot, snapshot2);
    }

    #[test]
    fn resize_clamps_both_buffers_cursor() {
        let mut s = Screen::new(10, 10);
        s.move_to(9, 9);
        s.swap_screen();
        s.move_to(9, 9);
        s.swap_screen();
        s.resize(5, 5);
        assert!(s.primary.cursor.x < 5 && s.primary.cursor.y < 5);
        assert!(s.alternate.cursor.x < 5 && s.alternate.cursor.y < 5);
    }

    #[test]
    fn resize_shrink_slides_rows_up_to_keep_cursor_row() {
        let mut s = Screen::new(5, 10);
        for y in 0..10 {
            s.set_char(char::from(b'0' + y as u8), CellAttr::empty(), Color::Default, Color::Default, 0, y);
        }
        s.move_to(0, 9);
        s.resize(5, 5);
        // Row 9 ('9') was where the cursor sat; shrinking to 5 rows should have dropped rows off
        // the top (rows '0'..'4'), not the tail, keeping '5'..'9' visible with the cursor on '9'.
        let kept: String = (0..5).map(|y| s.line(y)[0].code_point).collect();
        assert_eq!(kept, "56789");
        assert_eq!(s.cursor().y, 4);
    }

    #[test]
    fn swap_screen_is_involution() {
        let mut s = Screen::new(5, 3);
        s.put_char('A');
        let before = s.line(0).clone();
        s.swap_screen();
        s.swap_screen();
        assert_eq!(s.line(0).clone(), before);
    }
}
