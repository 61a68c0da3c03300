//! Simulation error taxonomy.
//!
//! A run either fully succeeds or aborts with exactly one of these three
//! reasons. None of them is retried inside the kernel:
//! - `UnsortedIntents` is a data-quality bug at the caller (fatal),
//! - `FillBufferExhausted` is a capacity-planning bug (caller raises
//!   `max_fills` and retries the whole run),
//! - `InvalidCode` is encoding corruption (fatal, never coerced).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// Intents violate the `(activate_bar, order_id)` ascending precondition.
    /// `index` is the position of the first out-of-order intent.
    #[error("intents not sorted by (activate_bar, order_id): violation at index {index}")]
    UnsortedIntents { index: usize },

    /// The preallocated fill buffer filled up before the bar loop finished.
    #[error("fill buffer exhausted at capacity {capacity}; raise max_fills and rerun")]
    FillBufferExhausted { capacity: usize },

    /// A role/kind/side byte was outside its two valid codes.
    #[error("invalid {field} code {value}: valid codes are 0 and 1")]
    InvalidCode { field: &'static str, value: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failure() {
        let e = SimError::UnsortedIntents { index: 7 };
        assert!(e.to_string().contains("index 7"));

        let e = SimError::FillBufferExhausted { capacity: 128 };
        assert!(e.to_string().contains("128"));

        let e = SimError::InvalidCode {
            field: "role",
            value: 9,
        };
        assert!(e.to_string().contains("role"));
        assert!(e.to_string().contains('9'));
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(
            SimError::FillBufferExhausted { capacity: 4 },
            SimError::FillBufferExhausted { capacity: 4 }
        );
        assert_ne!(
            SimError::UnsortedIntents { index: 0 },
            SimError::UnsortedIntents { index: 1 }
        );
    }
}
