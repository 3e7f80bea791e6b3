use num_traits::Signed;

/// Score types [`find_segments`] can sum. Integer sums saturate at the type's
/// bounds instead of wrapping.
pub trait SegmentScore: Signed + Copy + PartialOrd {
    fn add_score(self, rhs: Self) -> Self;
    fn sub_score(self, rhs: Self) -> Self;
}

macro_rules! impl_segment_score_int {
    ($($t:ty),*) => {$(
        impl SegmentScore for $t {
            #[inline]
            fn add_score(self, rhs: Self) -> Self {
                self.saturating_add(rhs)
            }

            #[inline]
            fn sub_score(self, rhs: Self) -> Self {
                self.saturating_sub(rhs)
            }
        }
    )*};
}

macro_rules! impl_segment_score_float {
    ($($t:ty),*) => {$(
        impl SegmentScore for $t {
            #[inline]
            fn add_score(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn sub_score(self, rhs: Self) -> Self {
                self - rhs
            }
        }
    )*};
}

impl_segment_score_int!(i8, i16, i32, i64, i128, isize);
impl_segment_score_float!(f32, f64);

/// Find high scoring segments of `scores` in a single X-drop pass.
///
/// Returns half-open `(start, end)` index ranges. Each segment reaches a
/// cumulative score of at least `threshold` and is cut off once the running
/// score turns negative or falls more than `max_dropoff` below its maximum.
/// A segment ends just after the position where that maximum was reached.
/// Empty ranges are never returned.
pub fn find_segments<S: SegmentScore>(scores: &[S], threshold: S, max_dropoff: S) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();

    let mut start = 0;
    let mut end = 0;
    let mut max_score = S::zero();
    let mut cur_score = S::zero();

    for (i, &score) in scores.iter().enumerate() {
        cur_score = cur_score.add_score(score);
        if cur_score >= max_score {
            max_score = cur_score;
            end = i + 1;
        }

        if cur_score < S::zero() || cur_score < max_score.sub_score(max_dropoff) {
            if max_score >= threshold && end > start {
                segments.push((start, end));
            }

            max_score = S::zero();
            cur_score = S::zero();
            start = i + 1;
            end = i + 1;
        }
    }

    // last segment may still be open
    if max_score >= threshold && end > start {
        segments.push((start, end));
    }

    segments
}

/// Cumulative score of one segment, saturating like [`find_segments`].
pub fn segment_score<S: SegmentScore>(scores: &[S], segment: (usize, usize)) -> S {
    scores[segment.0..segment.1]
        .iter()
        .fold(S::zero(), |acc, &s| acc.add_score(s))
}
