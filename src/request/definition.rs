//! Pipeline stages of a request definition.

use std::fmt;

/// Stage of the builder pipeline at which a builder runs.
///
/// All `Start` builders run before any `Complete` builder, so the method and
/// base path are settled before query, headers and body are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefinitionStage {
    Start,
    Complete,
}

impl DefinitionStage {
    /// Stages in execution order.
    pub const ALL: [DefinitionStage; 2] = [DefinitionStage::Start, DefinitionStage::Complete];
}

impl fmt::Display for DefinitionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionStage::Start => write!(f, "start"),
            DefinitionStage::Complete => write!(f, "complete"),
        }
    }
}
