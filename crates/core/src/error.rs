use thiserror::Error;

use crate::resolver::ResolvedLocation;

pub type Result<T> = std::result::Result<T, InventoryError>;

/// Failure reported by the Homebox backend or the transport underneath it.
/// Never retried; surfaced to the caller with whatever detail the backend
/// provided.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Homebox API returned HTTP {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Homebox request failed: {0}")]
    Transport(String),
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Quantity must be a positive integer")]
    InvalidQuantity { quantity: i64 },

    #[error("Location path must include at least one non-empty segment")]
    EmptyReference,

    #[error("An item named \"{name}\" already exists. Choose a different name.")]
    DuplicateName { name: String, existing_id: String },

    #[error("Location '{reference}' was not found")]
    LocationNotFound { reference: String },

    #[error("Location '{reference}' is ambiguous; candidates: {}", candidate_paths(.candidates))]
    AmbiguousLocation {
        reference: String,
        candidates: Vec<ResolvedLocation>,
    },

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

fn candidate_paths(candidates: &[ResolvedLocation]) -> String {
    candidates
        .iter()
        .map(|candidate| candidate.full_path())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_location_message_lists_every_candidate() {
        let err = InventoryError::AmbiguousLocation {
            reference: "garage".to_string(),
            candidates: vec![
                ResolvedLocation {
                    id: "a".to_string(),
                    path: vec!["Home".to_string(), "Garage".to_string()],
                },
                ResolvedLocation {
                    id: "b".to_string(),
                    path: vec!["Workshop".to_string(), "Garage".to_string()],
                },
            ],
        };

        let message = err.to_string();
        assert!(message.contains("Home / Garage"));
        assert!(message.contains("Workshop / Garage"));
    }
}
