use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells a tab occupies.
const TAB_WIDTH: usize = 4;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// A cell count as a terminal coordinate, saturating at `u16::MAX`.
pub fn to_cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        TAB_WIDTH
    } else {
        UnicodeWidthStr::width(g)
    }
}

/// Cut `s` to at most `max_cells`, ending in `…` when something was dropped.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `offset`, or `None` at the end.
pub fn next_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let rest = s.get(offset..)?;
    let g = rest.graphemes(true).next()?;
    Some(offset + g.len())
}

/// Byte offset of the grapheme before `offset`, or `None` at the start.
pub fn prev_grapheme_boundary(s: &str, offset: usize) -> Option<usize> {
    let head = s.get(..offset)?;
    let g = head.graphemes(true).next_back()?;
    Some(offset - g.len())
}

/// Byte range of the line containing `offset`, newline excluded.
pub fn line_bounds(s: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(s.len());
    let start = s[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = s[offset..].find('\n').map_or(s.len(), |i| offset + i);
    (start, end)
}

/// Byte offset in `line` closest to display column `col`, snapped to a grapheme start.
pub fn offset_at_column(line: &str, col: usize) -> usize {
    let mut used = 0;
    for (i, g) in line.grapheme_indices(true) {
        let w = grapheme_width(g);
        if used + w > col {
            return i;
        }
        used += w;
    }
    line.len()
}
