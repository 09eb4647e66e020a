//! SGR (`CSI ... m`) parameter application.
//!
//! Grounded in `core/pty_mux/vt_100_ansi_parser/operations/vt_100_shim_sgr_ops.rs`'s per-param
//! dispatch shape, extended to cover the full attribute/color parameter set this engine's spec
//! requires (8/16-color, 256-color palette, 24-bit direct color) beyond the teacher's subset.

use crate::grid::{CellAttr, Color, Cursor};

/// Apply one SGR parameter group sequence to `cursor`'s pen. `params` is the full list for the
/// whole `m` dispatch so that `38`/`48` can consume their trailing sub-parameters.
pub fn apply_sgr(cursor: &mut Cursor, params: &[u16]) {
    let mut i = 0;
    if params.is_empty() {
        reset(cursor);
        return;
    }
    while i < params.len() {
        let p = params[i];
        match p {
            0 => reset(cursor),
            1 => cursor.attr.insert(CellAttr::BOLD),
            2 => cursor.attr.insert(CellAttr::FAINT),
            3 => cursor.attr.insert(CellAttr::ITALIC),
            4 => cursor.attr.insert(CellAttr::UNDERLINE),
            5 | 6 => cursor.attr.insert(CellAttr::BLINK),
            7 => cursor.attr.insert(CellAttr::REVERSE),
            8 => cursor.attr.insert(CellAttr::INVISIBLE),
            9 => cursor.attr.insert(CellAttr::STRUCK),
            22 => cursor.attr.remove(CellAttr::BOLD | CellAttr::FAINT),
            23 => cursor.attr.remove(CellAttr::ITALIC),
            24 => cursor.attr.remove(CellAttr::UNDERLINE),
            25 => cursor.attr.remove(CellAttr::BLINK),
            27 => cursor.attr.remove(CellAttr::REVERSE),
            28 => cursor.attr.remove(CellAttr::INVISIBLE),
            29 => cursor.attr.remove(CellAttr::STRUCK),
            30..=37 => cursor.fg = Color::Indexed((p - 30) as u8),
            38 => {
                let (color, consumed) = extended_color(&params[i..]);
                if let Some(color) = color {
                    cursor.fg = color;
                }
                i += consumed;
                continue;
            }
            39 => cursor.fg = Color::Default,
            40..=47 => cursor.bg = Color::Indexed((p - 40) as u8),
            48 => {
                let (color, consumed) = extended_color(&params[i..]);
                if let Some(color) = color {
                    cursor.bg = color;
                }
                i += consumed;
                continue;
            }
            49 => cursor.bg = Color::Default,
            90..=97 => cursor.fg = Color::Indexed((p - 90) + 8),
            100..=107 => cursor.bg = Color::Indexed((p - 100) + 8),
            _ => tracing::warn!(param = p, "unrecognized SGR parameter, ignoring"),
        }
        i += 1;
    }
}

fn reset(cursor: &mut Cursor) {
    cursor.attr = CellAttr::empty();
    cursor.fg = Color::Default;
    cursor.bg = Color::Default;
}

/// Parse a `38;...`/`48;...` extended color starting at `params[0]` (the `38`/`48` itself).
/// Returns `(color, params_consumed_including_the_leading_tag)`. Malformed sub-sequences (missing
/// components, or an unrecognized sub-tag) consume their declared length and report via
/// `tracing::warn!`, matching the "non-fatal, logged" contract for bad SGR sub-parameters.
fn extended_color(params: &[u16]) -> (Option<Color>, usize) {
    match params.get(1) {
        Some(5) => match params.get(2) {
            Some(&n) => (Some(Color::Indexed(n as u8)), 3),
            None => {
                tracing::warn!("SGR 38/48;5 missing palette index");
                (None, params.len())
            }
        },
        Some(2) => match (params.get(2), params.get(3), params.get(4)) {
            (Some(&r), Some(&g), Some(&b)) => {
                (Some(Color::Rgb(r as u8, g as u8, b as u8)), 5)
            }
            _ => {
                tracing::warn!("SGR 38/48;2 missing r/g/b components");
                (None, params.len())
            }
        },
        _ => {
            tracing::warn!("SGR 38/48 with unrecognized sub-tag");
            (None, params.len().min(2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_then_set_then_reset_law() {
        let mut c = Cursor::default();
        apply_sgr(&mut c, &[0]);
        apply_sgr(&mut c, &[31, 1]);
        assert_eq!(c.fg, Color::Indexed(1));
        assert!(c.attr.contains(CellAttr::BOLD));
        apply_sgr(&mut c, &[0]);
        assert_eq!(c.fg, Color::Default);
        assert!(c.attr.is_empty());
    }

    #[test]
    fn extended_palette_color() {
        let mut c = Cursor::default();
        apply_sgr(&mut c, &[38, 5, 200]);
        assert_eq!(c.fg, Color::Indexed(200));
    }

    #[test]
    fn extended_rgb_color() {
        let mut c = Cursor::default();
        apply_sgr(&mut c, &[48, 2, 10, 20, 30]);
        assert_eq!(c.bg, Color::Rgb(10, 20, 30));
    }
}
