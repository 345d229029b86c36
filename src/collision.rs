//! Axis-aligned bounding-box tests and barrier damage.

use crate::entities::{Barrier, Rect};

/// True when the two rectangles overlap.  Touching edges count as a hit.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}

/// Apply one hit to a barrier.
///
/// A barrier wider than `min_width` loses `damage` units, half from each side
/// so it stays centred.  A barrier already at `min_width`, or one the hit
/// would push below it, is destroyed instead, signalled by `None`.
pub fn damage_barrier(barrier: &Barrier, damage: i32, min_width: i32) -> Option<Barrier> {
    let r = barrier.rect;
    let w = r.w - damage;
    if r.w <= min_width || w < min_width {
        return None;
    }
    let shift = (r.w - w) / 2;
    Some(Barrier {
        rect: Rect { x: r.x + shift, w, ..r },
    })
}
