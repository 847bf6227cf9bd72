//! Content-generation assistant for MarkTeX documents.
//!
//! A [`ContentGenerator`] turns the current document and an author
//! instruction into replacement text. [`improve_document`] applies the result
//! all-or-nothing: the buffer is either wholly replaced or left untouched.
//! A [`RequestSlot`] held by the caller keeps at most one request outstanding
//! per editor.
//!
//! # Example
//!
//! ```
//! use marktex_assist::{AssistError, ContentGenerator, RequestSlot, improve_document};
//!
//! struct Shout;
//!
//! impl ContentGenerator for Shout {
//!     fn improve(&self, current: &str, _instruction: &str) -> Result<String, AssistError> {
//!         Ok(current.to_uppercase())
//!     }
//! }
//!
//! let slot = RequestSlot::new();
//! let mut buffer = "hello".to_owned();
//! improve_document(&Shout, &slot, &mut buffer, "shout").unwrap();
//! assert_eq!(buffer, "HELLO");
//! ```

mod client;
mod error;
mod prompt;

use std::sync::atomic::{AtomicBool, Ordering};

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, GeminiClient};
pub use error::AssistError;
pub use prompt::{DEFAULT_CONTEXT_LIMIT, build_prompt, truncate_context};

/// Produces replacement document text from an instruction.
pub trait ContentGenerator {
    /// Return the new document text for `instruction` applied to `current`.
    ///
    /// Implementations return `current` unchanged when the model produced no
    /// text.
    fn improve(&self, current: &str, instruction: &str) -> Result<String, AssistError>;
}

/// Failed content generation, as shown to the author.
#[derive(Debug, thiserror::Error)]
#[error("Failed to generate content. Please check your API key or try again.")]
pub struct ImproveFailure(#[source] pub AssistError);

/// Replace `buffer` with generated text for `instruction`.
///
/// The request holds `slot` until it completes. On error `buffer` is not
/// modified.
///
/// # Errors
///
/// Returns [`ImproveFailure`] wrapping the underlying [`AssistError`], which
/// is [`AssistError::Busy`] when `slot` already has a request in flight.
pub fn improve_document(
    generator: &dyn ContentGenerator,
    slot: &RequestSlot,
    buffer: &mut String,
    instruction: &str,
) -> Result<(), ImproveFailure> {
    let Some(_in_flight) = slot.try_acquire() else {
        tracing::warn!("Content generation already in progress");
        return Err(ImproveFailure(AssistError::Busy));
    };
    match generator.improve(buffer, instruction) {
        Ok(text) => {
            *buffer = text;
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Content generation failed");
            Err(ImproveFailure(err))
        }
    }
}

/// Single slot for an outstanding generation request.
#[derive(Debug, Default)]
pub struct RequestSlot {
    busy: AtomicBool,
}

impl RequestSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` if a request is already in flight.
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard { slot: self })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Marks a request as in flight until dropped.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    slot: &'a RequestSlot,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.busy.store(false, Ordering::Release);
    }
}
