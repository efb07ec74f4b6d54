use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of prompts in the catalog. Valid ids are `1..=PROMPT_COUNT`.
pub const PROMPT_COUNT: u32 = 108;

/// Identifier of a prompt, always within `1..=PROMPT_COUNT`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PromptId(u32);

/// Rejected prompt id input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PromptIdError {
    #[error("prompt number is empty")]
    Empty,

    #[error("prompt number is not a number: {0:?}")]
    NotANumber(String),

    #[error("prompt number {0} is outside 1..=108")]
    OutOfRange(i64),
}

impl PromptId {
    pub const FIRST: PromptId = PromptId(1);
    pub const LAST: PromptId = PromptId(PROMPT_COUNT);

    /// Creates a `PromptId`, rejecting values outside `1..=PROMPT_COUNT`.
    ///
    /// # Errors
    ///
    /// Returns `PromptIdError::OutOfRange` for values outside the catalog range.
    pub fn new(id: u32) -> Result<Self, PromptIdError> {
        if (1..=PROMPT_COUNT).contains(&id) {
            Ok(Self(id))
        } else {
            Err(PromptIdError::OutOfRange(i64::from(id)))
        }
    }

    /// Parses user input (the id field or a `q` query value).
    ///
    /// Surrounding whitespace is ignored; anything else that is not a
    /// base-10 integer is rejected.
    ///
    /// # Errors
    ///
    /// Returns `PromptIdError` when the input is empty, non-numeric, or out of range.
    pub fn parse_input(input: &str) -> Result<Self, PromptIdError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PromptIdError::Empty);
        }
        let value: i64 = trimmed
            .parse()
            .map_err(|_| PromptIdError::NotANumber(trimmed.to_string()))?;
        u32::try_from(value)
            .map_err(|_| PromptIdError::OutOfRange(value))
            .and_then(Self::new)
    }

    /// Picks an id uniformly from `1..=PROMPT_COUNT`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(1..=PROMPT_COUNT))
    }

    /// The following id, wrapping from the last prompt back to the first.
    #[must_use]
    pub fn next_wrapping(self) -> Self {
        Self(self.0 % PROMPT_COUNT + 1)
    }

    /// Returns the underlying value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PromptId {
    type Error = PromptIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PromptId> for u32 {
    fn from(id: PromptId) -> Self {
        id.0
    }
}

impl fmt::Debug for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PromptId({})", self.0)
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PromptId {
    type Err = PromptIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_input(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
