//! Hunt requests and input validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of artworks in a hunt
pub const DEFAULT_ITEM_COUNT: u32 = 5;

/// Smallest item count the form offers
pub const MIN_FORM_ITEMS: u32 = 5;

/// Largest item count the form offers
pub const MAX_FORM_ITEMS: u32 = 30;

/// Item count granularity on the form
pub const FORM_ITEM_STEP: u32 = 5;

/// A request to generate one scavenger hunt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntRequest {
    /// Museum to build the hunt for
    pub museum_name: String,

    /// Number of artworks to include
    pub num_items: u32,
}

impl HuntRequest {
    /// Build a request the orchestrator accepts: a non-empty museum name
    /// and a positive item count.
    pub fn new(museum_name: impl Into<String>, num_items: u32) -> Result<Self, RequestError> {
        let museum_name = museum_name.into().trim().to_string();

        if museum_name.is_empty() {
            return Err(RequestError::EmptyMuseumName);
        }
        if num_items == 0 {
            return Err(RequestError::ZeroItems);
        }

        Ok(Self {
            museum_name,
            num_items,
        })
    }

    /// Build a request from user-facing input, which additionally limits
    /// the item count to 5..=30 in steps of 5.
    pub fn from_form(museum_name: impl Into<String>, num_items: u32) -> Result<Self, RequestError> {
        if !(MIN_FORM_ITEMS..=MAX_FORM_ITEMS).contains(&num_items) || num_items % FORM_ITEM_STEP != 0 {
            return Err(RequestError::ItemCountOutOfRange { actual: num_items });
        }

        Self::new(museum_name, num_items)
    }
}

/// Invalid hunt input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Museum name cannot be empty")]
    EmptyMuseumName,

    #[error("Number of items must be positive")]
    ZeroItems,

    #[error("Number of items must be between 5 and 30 in steps of 5, got {actual}")]
    ItemCountOutOfRange { actual: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_museum_name() {
        let request = HuntRequest::new("  El Prado ", 5).unwrap();
        assert_eq!(request.museum_name, "El Prado");
        assert_eq!(request.num_items, 5);
    }

    #[test]
    fn test_new_rejects_empty_input() {
        assert_eq!(HuntRequest::new("   ", 5), Err(RequestError::EmptyMuseumName));
        assert_eq!(HuntRequest::new("Louvre Museum", 0), Err(RequestError::ZeroItems));
    }

    #[test]
    fn test_orchestrator_accepts_any_positive_count() {
        assert!(HuntRequest::new("Louvre Museum", 3).is_ok());
        assert!(HuntRequest::new("Louvre Museum", 42).is_ok());
    }

    #[test]
    fn test_form_range() {
        for n in [5, 10, 15, 20, 25, 30] {
            assert!(HuntRequest::from_form("National Gallery, London", n).is_ok());
        }

        for n in [0, 4, 7, 35] {
            assert_eq!(
                HuntRequest::from_form("National Gallery, London", n),
                Err(RequestError::ItemCountOutOfRange { actual: n })
            );
        }
    }

    #[test]
    fn test_form_still_requires_museum_name() {
        assert_eq!(HuntRequest::from_form("", 10), Err(RequestError::EmptyMuseumName));
    }
}
