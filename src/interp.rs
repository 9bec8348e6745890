/*
Hue Interpolation
=================

Both color models describe their carrier pitch as a handful of anchor points
around the color wheel and fill in everything between them with straight
lines:

    value
     880 ┤          ●
         │         ╱ ╲
     440 ┤       ╱     ╲
     330 ┤●──●╱          ╲              ●──●
         │                 ╲          ╱
      82 ┤                   ───●───
         └──┬──┬────┬──────────┬────┬────┬──→ hue
            0 30   60        240  270  330 (360 = 0)

The hue axis is a circle, so the last anchor connects back to the first one
360° later. A query between the last anchor and 360 lands on that wrap
segment and interpolates toward the first anchor's value.
*/

use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear interpolation: `a + (b - a) * t`.
///
/// `t` is not clamped; callers keep it inside the range they mean.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A control point on the hue circle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub hue: f32,
    pub value: f32,
}

impl Anchor {
    pub const fn new(hue: f32, value: f32) -> Self {
        Self { hue, value }
    }
}

/// Find the segment containing `hue` in anchors sorted ascending by hue.
///
/// Returns the index of the segment's starting anchor and the fractional
/// position inside it. `None` only when no segment matches (empty anchors,
/// NaN, or a hue far outside the circle).
pub fn locate(anchors: &[Anchor], hue: f32) -> Option<(usize, f32)> {
    let len = anchors.len();
    for (i, curr) in anchors.iter().enumerate() {
        let next = anchors[(i + 1) % len];
        let mut next_hue = next.hue;
        if next_hue <= curr.hue {
            next_hue += 360.0;
        }

        let mut h = hue;
        if h < curr.hue && i == len - 1 {
            h += 360.0;
        }

        if h >= curr.hue && h < next_hue {
            return Some((i, (h - curr.hue) / (next_hue - curr.hue)));
        }
    }
    None
}

/// Circular piecewise-linear lookup over `anchors`, in any order.
///
/// Falls back to the lowest-hue anchor's value when no segment matches. With
/// anchors spread around the full circle that branch is not reached for any
/// hue in `[0, 360)`.
///
/// # Panics
///
/// Panics if `anchors` is empty.
pub fn lerp_anchors(anchors: &[Anchor], hue: f32) -> f32 {
    let sorted = sorted_by_hue(anchors);

    match locate(&sorted, hue) {
        Some((i, t)) => {
            let next = sorted[(i + 1) % sorted.len()];
            lerp(sorted[i].value, next.value, t)
        }
        None => sorted[0].value,
    }
}

/// Borrow `anchors` when already ascending, otherwise sort a copy.
fn sorted_by_hue(anchors: &[Anchor]) -> Cow<'_, [Anchor]> {
    if anchors.windows(2).all(|w| w[0].hue <= w[1].hue) {
        return Cow::Borrowed(anchors);
    }
    let mut sorted = anchors.to_vec();
    sorted.sort_by(|a, b| a.hue.total_cmp(&b.hue));
    Cow::Owned(sorted)
}
