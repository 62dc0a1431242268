use anyhow::Result;
use inquire::{InquireError, Select};

use crate::error::Error;

/// A menu entry: what the user sees, and the value it stands for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    #[must_use]
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl Choice<String> {
    /// An entry whose label is also its value (branch names).
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Trait for providing interactive selection functionality
/// This allows us to abstract away the interactive prompts for testing
pub trait SelectionProvider {
    /// Present a selection menu and return the index of the user's choice
    ///
    /// # Errors
    /// Returns [`Error::SelectionCancelled`] if the user aborts, or another
    /// error if the prompt cannot be shown
    fn select(&self, prompt: &str, labels: Vec<String>) -> Result<usize>;
}

/// Real implementation using inquire::Select for production use
pub struct RealSelectionProvider;

impl SelectionProvider for RealSelectionProvider {
    fn select(&self, prompt: &str, labels: Vec<String>) -> Result<usize> {
        let selection = Select::new(prompt, labels)
            .with_page_size(10)
            .with_vim_mode(true)
            .raw_prompt()
            .map_err(|e| match e {
                InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                    anyhow::Error::from(Error::SelectionCancelled)
                }
                InquireError::NotTTY => anyhow::Error::from(Error::NotInteractive),
                other => anyhow::Error::from(other).context("Interactive selection failed"),
            })?;
        Ok(selection.index)
    }
}

/// Mock implementation for testing that returns a predetermined value
pub struct MockSelectionProvider {
    response: Option<String>,
}

impl MockSelectionProvider {
    /// Picks the entry whose label equals `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    /// Behaves like a user pressing Esc.
    #[must_use]
    pub fn cancelled() -> Self {
        Self { response: None }
    }
}

impl SelectionProvider for MockSelectionProvider {
    fn select(&self, _prompt: &str, labels: Vec<String>) -> Result<usize> {
        let Some(response) = &self.response else {
            return Err(Error::SelectionCancelled.into());
        };

        // Validate that the response is actually in the options
        labels
            .iter()
            .position(|label| label == response)
            .ok_or_else(|| anyhow::anyhow!("Mock response '{}' not found in options", response))
    }
}

/// Shows `choices` and returns the value of the one picked.
///
/// An empty list fails with [`Error::NothingToSelect`] carrying
/// `empty_message`, without showing a menu.
///
/// # Errors
/// Returns an error if the list is empty, the user cancels, or the prompt
/// fails
pub fn choose<T>(
    provider: &dyn SelectionProvider,
    prompt: &str,
    empty_message: &'static str,
    choices: Vec<Choice<T>>,
) -> Result<T> {
    if choices.is_empty() {
        return Err(Error::NothingToSelect(empty_message).into());
    }

    let labels = choices.iter().map(|c| c.label.clone()).collect();
    let index = provider.select(prompt, labels)?;

    choices
        .into_iter()
        .nth(index)
        .map(|choice| choice.value)
        .ok_or_else(|| anyhow::anyhow!("Selection index {} out of range", index))
}
