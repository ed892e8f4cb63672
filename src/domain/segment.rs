// ============================================================
// Layer 3 — Age Segment
// ============================================================
// Applicants are priced by one of two models depending on
// their age. The boundary is inclusive: an applicant exactly
// at the threshold belongs to the young segment.

use std::fmt;

use serde::Serialize;

pub const DEFAULT_AGE_THRESHOLD: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeSegment {
    Young,
    Rest,
}

impl AgeSegment {
    pub fn for_age(age: u32, threshold: u32) -> Self {
        if age <= threshold {
            AgeSegment::Young
        } else {
            AgeSegment::Rest
        }
    }

    /// Stable label used in artifact file names and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeSegment::Young => "young",
            AgeSegment::Rest  => "rest",
        }
    }
}

impl fmt::Display for AgeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(AgeSegment::for_age(25, 25), AgeSegment::Young);
        assert_eq!(AgeSegment::for_age(26, 25), AgeSegment::Rest);
        assert_eq!(AgeSegment::for_age(0, 25), AgeSegment::Young);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AgeSegment::Young.to_string(), "young");
        assert_eq!(AgeSegment::Rest.as_str(), "rest");
    }
}
