//! Percentage marks and pixel-depth bucketing.
//!
//! Marks are derived from the current document height on every scroll check,
//! never cached: dynamic content can grow or shrink the document between
//! checks.

/// Size of the pixel-depth label bucket.
///
/// Pixel-depth events carry the scroll distance rounded down to the nearest
/// multiple of this, keeping label cardinality bounded downstream.
pub const PIXEL_DEPTH_BUCKET: u64 = 250;

/// Cushion subtracted from the document height for the 100% mark.
///
/// Some mobile browsers report sub-pixel scroll positions that never quite
/// reach the true document bottom, so the final mark triggers a few pixels
/// early.
pub const FULL_MARK_CUSHION: u64 = 5;

/// The four standard percentage marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PercentMark {
    /// 25% of document height.
    Quarter,
    /// 50% of document height.
    Half,
    /// 75% of document height.
    ThreeQuarters,
    /// Document bottom (height minus [`FULL_MARK_CUSHION`]).
    Full,
}

impl PercentMark {
    /// All marks in ascending order.
    pub const ALL: [PercentMark; 4] = [
        PercentMark::Quarter,
        PercentMark::Half,
        PercentMark::ThreeQuarters,
        PercentMark::Full,
    ];

    /// Label used in emitted events.
    pub fn label(&self) -> &'static str {
        match self {
            PercentMark::Quarter => "25%",
            PercentMark::Half => "50%",
            PercentMark::ThreeQuarters => "75%",
            PercentMark::Full => "100%",
        }
    }

    /// Scroll distance at which this mark triggers for the given document
    /// height.
    pub fn threshold(&self, doc_height: u64) -> u64 {
        match self {
            PercentMark::Quarter => doc_height / 4,
            PercentMark::Half => doc_height / 2,
            PercentMark::ThreeQuarters => doc_height.saturating_mul(3) / 4,
            PercentMark::Full => doc_height.saturating_sub(FULL_MARK_CUSHION),
        }
    }
}

/// Compute all four marks for the given document height.
pub fn percentage_marks(doc_height: u64) -> [(PercentMark, u64); 4] {
    PercentMark::ALL.map(|mark| (mark, mark.threshold(doc_height)))
}

/// Round a scroll distance down to the nearest bucket boundary.
pub fn bucketed(distance: u64) -> u64 {
    (distance / PIXEL_DEPTH_BUCKET) * PIXEL_DEPTH_BUCKET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_labels() {
        assert_eq!(PercentMark::Quarter.label(), "25%");
        assert_eq!(PercentMark::Half.label(), "50%");
        assert_eq!(PercentMark::ThreeQuarters.label(), "75%");
        assert_eq!(PercentMark::Full.label(), "100%");
    }

    #[test]
    fn test_thresholds_for_even_height() {
        let marks = percentage_marks(2000);
        assert_eq!(marks[0], (PercentMark::Quarter, 500));
        assert_eq!(marks[1], (PercentMark::Half, 1000));
        assert_eq!(marks[2], (PercentMark::ThreeQuarters, 1500));
        // 100% mark sits 5px above the true bottom.
        assert_eq!(marks[3], (PercentMark::Full, 1995));
    }

    #[test]
    fn test_thresholds_truncate_like_the_reference() {
        // 1003 * 0.25 = 250.75 -> 250, 1003 * 0.75 = 752.25 -> 752
        assert_eq!(PercentMark::Quarter.threshold(1003), 250);
        assert_eq!(PercentMark::Half.threshold(1003), 501);
        assert_eq!(PercentMark::ThreeQuarters.threshold(1003), 752);
    }

    #[test]
    fn test_full_mark_never_underflows() {
        assert_eq!(PercentMark::Full.threshold(3), 0);
        assert_eq!(PercentMark::Full.threshold(0), 0);
    }

    #[test]
    fn test_bucketed_floors_to_250() {
        assert_eq!(bucketed(0), 0);
        assert_eq!(bucketed(100), 0);
        assert_eq!(bucketed(249), 0);
        assert_eq!(bucketed(250), 250);
        assert_eq!(bucketed(400), 250);
        assert_eq!(bucketed(900), 750);
        assert_eq!(bucketed(1000), 1000);
    }
}
