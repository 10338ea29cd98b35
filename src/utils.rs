use itertools::Itertools;

use crate::grid::Pos;

pub fn is_knight_move(a: Pos, b: Pos) -> bool {
    let dr = a.r.abs_diff(b.r);
    let dc = a.c.abs_diff(b.c);
    (dr == 1 && dc == 2) || (dr == 2 && dc == 1)
}

/// True if `path` covers every cell of a `size`x`size` board exactly once
/// and each consecutive pair is a knight move.
pub fn is_complete_tour(size: usize, path: &[Pos]) -> bool {
    path.len() == size * size
        && path.iter().all(|p| p.r < size && p.c < size)
        && path.iter().all_unique()
        && path.iter().tuple_windows().all(|(&a, &b)| is_knight_move(a, b))
}

/// Move numbers (1-based) laid out on the board; unvisited cells show as `·`.
pub fn render_path(size: usize, path: &[Pos]) -> String {
    let mut order = vec![0usize; size * size];
    for (i, p) in path.iter().enumerate() { order[p.r * size + p.c] = i + 1; }
    let width = (size * size).to_string().len();
    let border = format!("+{}+\n", "-".repeat(size * (width + 1) + 1));

    let mut s = border.clone();
    for r in 0..size {
        s.push('|');
        for c in 0..size {
            let n = order[r * size + c];
            if n == 0 { s.push_str(&format!(" {:>width$}", "·")); } else { s.push_str(&format!(" {:>width$}", n)); }
        }
        s.push_str(" |\n");
    }
    s.push_str(&border);
    s
}

pub fn format_path(path: &[Pos]) -> String {
    path.iter().map(|p| format!("({},{})", p.r, p.c)).join(" ")
}
