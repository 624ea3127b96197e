//! AI backend response types

use serde::{Deserialize, Serialize};

/// Number of suggestions requested from the model
pub const SUGGESTION_COUNT: usize = 3;

/// Budget suggestions as returned by the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionList {
    pub suggestions: Vec<String>,
}
