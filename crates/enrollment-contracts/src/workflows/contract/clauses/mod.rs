mod segmenter;
mod size;

pub use segmenter::{ClauseSegmentation, HeadingSegmenter};
pub use size::{estimate_size, strip_markup};

use serde::{Deserialize, Serialize};

/// One segmented unit of clause markup with its printable-size estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ClauseParts")]
pub struct ClauseBlock {
    raw_markup: String,
    estimated_size: usize,
}

#[derive(Deserialize)]
struct ClauseParts {
    raw_markup: String,
}

impl From<ClauseParts> for ClauseBlock {
    fn from(parts: ClauseParts) -> Self {
        ClauseBlock::new(parts.raw_markup)
    }
}

impl ClauseBlock {
    pub fn new(raw_markup: impl Into<String>) -> Self {
        let raw_markup = raw_markup.into();
        let estimated_size = estimate_size(&raw_markup);
        Self {
            raw_markup,
            estimated_size,
        }
    }

    pub fn raw_markup(&self) -> &str {
        &self.raw_markup
    }

    pub fn estimated_size(&self) -> usize {
        self.estimated_size
    }
}
