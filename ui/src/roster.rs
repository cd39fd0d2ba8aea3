//! Progress of a per-course fetch that a screen keys on its course selector.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterState {
    /// No course is selected.
    Unselected,
    /// Waiting on the fetch for the selected course.
    Loading,
    /// The fetch for the selected course failed.
    Failed(String),
    Ready,
}

/// Where the roster of `selected` stands, given the latest fetch result.
///
/// A fetch tags its result with the course it was made for, so a result left
/// over from a previous selection reads as still loading.
pub fn roster_state<T, E: Display>(
    selected: Option<&str>,
    fetched: Option<&(String, Result<T, E>)>,
) -> RosterState {
    let Some(selected) = selected else {
        return RosterState::Unselected;
    };
    match fetched {
        Some((course, result)) if course == selected => match result {
            Ok(_) => RosterState::Ready,
            Err(e) => RosterState::Failed(e.to_string()),
        },
        _ => RosterState::Loading,
    }
}
