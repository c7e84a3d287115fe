//! The five named steps of the simulated processing sequence.

/// One step of the processing simulation.
///
/// Stages are ordered and only ever advance one at a time; see
/// [`crate::sequencer::Sequencer::advance_stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Fetching,
    Processing,
    Embedding,
    Building,
    Complete,
}

impl Stage {
    /// All stages in sequence order.
    pub const ALL: [Stage; 5] = [
        Stage::Fetching,
        Stage::Processing,
        Stage::Embedding,
        Stage::Building,
        Stage::Complete,
    ];

    /// Index of the last stage.
    pub const FINAL_INDEX: usize = Self::ALL.len() - 1;

    /// Stable identifier, e.g. `"embedding"`.
    pub fn id(self) -> &'static str {
        match self {
            Stage::Fetching => "fetching",
            Stage::Processing => "processing",
            Stage::Embedding => "embedding",
            Stage::Building => "building",
            Stage::Complete => "complete",
        }
    }

    /// Human-readable label shown on the stage card.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Fetching => "Fetching repository files",
            Stage::Processing => "Processing code structure",
            Stage::Embedding => "Generating embeddings",
            Stage::Building => "Building knowledge base",
            Stage::Complete => "Repo is ready Let's chat!",
        }
    }

    /// Single-glyph icon for the stage card.
    pub fn icon(self) -> &'static str {
        match self {
            Stage::Fetching => "⎇",
            Stage::Processing => "❮❯",
            Stage::Embedding => "⛁",
            Stage::Building => "▤",
            Stage::Complete => "✔",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the stage at `index`, or `None` past the final stage.
    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    pub fn is_final(self) -> bool {
        self == Stage::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_sequence_order() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index(), i);
            assert_eq!(Stage::from_index(i), Some(*stage));
        }
        assert_eq!(Stage::from_index(5), None);
        assert_eq!(Stage::FINAL_INDEX, 4);
    }

    #[test]
    fn only_complete_is_final() {
        let finals: Vec<_> = Stage::ALL.iter().filter(|s| s.is_final()).collect();
        assert_eq!(finals, vec![&Stage::Complete]);
        assert_eq!(Stage::Complete.id(), "complete");
    }
}
