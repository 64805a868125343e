use crate::color::Color;
use crate::constants::MATCH_TOLERANCE;

/// True when every channel of `a` is within `MATCH_TOLERANCE` of `b`.
#[inline]
pub fn is_match(a: Color, b: Color) -> bool {
    a.r.abs_diff(b.r) <= MATCH_TOLERANCE
        && a.g.abs_diff(b.g) <= MATCH_TOLERANCE
        && a.b.abs_diff(b.b) <= MATCH_TOLERANCE
}
