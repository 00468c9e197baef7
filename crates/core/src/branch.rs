//! Nearest pickup branch selection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::BranchId;

/// A fixed physical pickup location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    /// Display label ("Deliver to : Home", "Office", ...).
    pub title: String,
    /// Neighborhood / area line shown under the title.
    pub detail: String,
    pub lat: f64,
    pub lon: f64,
}

/// Errors from branch selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BranchError {
    /// The candidate list was empty. Callers must always configure at least
    /// one branch; this is surfaced, never defaulted.
    #[error("no pickup branches configured")]
    NoBranches,
}

/// Pick the branch closest to the shopper.
///
/// Distance is planar Euclidean over raw latitude/longitude degrees, not
/// great-circle. All branches sit inside a single metro area, where the
/// flat-earth approximation is fine; the asymmetry between degree lengths is
/// deliberate and documented, not an oversight. Ties go to the first
/// minimal branch in input order (the scan uses strictly-less).
///
/// # Errors
///
/// Returns [`BranchError::NoBranches`] when `branches` is empty.
pub fn closest_branch(
    user_lat: f64,
    user_lon: f64,
    branches: &[Branch],
) -> Result<&Branch, BranchError> {
    let mut best: Option<(&Branch, f64)> = None;

    for branch in branches {
        let distance = ((user_lat - branch.lat).powi(2) + (user_lon - branch.lon).powi(2)).sqrt();
        match best {
            Some((_, min)) if distance >= min => {}
            _ => best = Some((branch, distance)),
        }
    }

    best.map(|(branch, _)| branch).ok_or(BranchError::NoBranches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(id: &str, lat: f64, lon: f64) -> Branch {
        Branch {
            id: BranchId::new(id),
            title: format!("Branch {id}"),
            detail: "Cairo".to_owned(),
            lat,
            lon,
        }
    }

    #[test]
    fn picks_the_nearest_branch() {
        let branches = vec![branch("1", 30.05, 31.23), branch("2", 30.06, 31.33)];

        let closest = closest_branch(30.05, 31.24, &branches).expect("non-empty");
        assert_eq!(closest.id.as_str(), "1");
    }

    #[test]
    fn ties_go_to_the_first_in_input_order() {
        let branches = vec![branch("a", 30.0, 31.0), branch("b", 30.0, 31.0)];

        let closest = closest_branch(30.05, 31.05, &branches).expect("non-empty");
        assert_eq!(closest.id.as_str(), "a");
    }

    #[test]
    fn empty_list_is_an_error() {
        assert_eq!(
            closest_branch(30.0, 31.0, &[]).unwrap_err(),
            BranchError::NoBranches
        );
    }

    #[test]
    fn user_sitting_on_a_branch_gets_that_branch() {
        let branches = vec![
            branch("1", 30.0508, 31.2336),
            branch("2", 30.0561, 31.33),
            branch("3", 29.9626, 31.2591),
        ];

        let closest = closest_branch(29.9626, 31.2591, &branches).expect("non-empty");
        assert_eq!(closest.id.as_str(), "3");
    }
}
