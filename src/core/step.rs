//! Path steps and reconstructed action paths.
//!
//! A found path always starts with [`Step::Stay`], the no-op that "reaches"
//! the initial state, followed by the real actions in execution order. An
//! empty path means the search failed.

use serde::{Deserialize, Serialize};

/// One step of a path: either the distinguished no-op or a real action.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step<A> {
    /// No action taken. Applying it leaves the state unchanged.
    Stay,
    /// A problem action.
    Act(A),
}

impl<A> Step<A> {
    /// The wrapped action, if any.
    #[must_use]
    pub fn action(&self) -> Option<&A> {
        match self {
            Step::Stay => None,
            Step::Act(a) => Some(a),
        }
    }

    #[must_use]
    pub fn is_stay(&self) -> bool {
        matches!(self, Step::Stay)
    }
}

impl<A> From<A> for Step<A> {
    fn from(action: A) -> Self {
        Step::Act(action)
    }
}

/// An ordered action path returned by frontier search.
///
/// ## Example
///
/// ```
/// use sealgo::core::{Path, Step};
///
/// let path = Path::found(vec![Step::Stay, Step::Act('a'), Step::Act('b')], 2.0);
/// assert!(path.is_found());
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.actions().copied().collect::<Vec<_>>(), vec!['a', 'b']);
///
/// let failed: Path<char> = Path::not_found();
/// assert!(failed.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path<A> {
    steps: Vec<Step<A>>,
    cost: f64,
}

impl<A> Path<A> {
    /// A successful path. `steps` must start with `Step::Stay`.
    #[must_use]
    pub fn found(steps: Vec<Step<A>>, cost: f64) -> Self {
        debug_assert!(matches!(steps.first(), Some(Step::Stay)));
        Self { steps, cost }
    }

    /// The empty path reported when a search is exhausted.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            steps: Vec::new(),
            cost: 0.0,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.steps.is_empty()
    }

    /// True when the search failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of real actions (the leading `Stay` is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Accumulated action cost along the path.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// All steps including the leading `Stay`.
    #[must_use]
    pub fn steps(&self) -> &[Step<A>] {
        &self.steps
    }

    /// The real actions in execution order.
    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.steps.iter().filter_map(Step::action)
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<Step<A>> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_action() {
        let stay: Step<u8> = Step::Stay;
        assert!(stay.is_stay());
        assert_eq!(stay.action(), None);

        let act: Step<u8> = 3.into();
        assert!(!act.is_stay());
        assert_eq!(act.action(), Some(&3));
    }

    #[test]
    fn test_path_trivial_goal() {
        let path: Path<u8> = Path::found(vec![Step::Stay], 0.0);
        assert!(path.is_found());
        assert_eq!(path.len(), 0);
        assert_eq!(path.actions().count(), 0);
    }

    #[test]
    fn test_path_not_found() {
        let path: Path<u8> = Path::not_found();
        assert!(!path.is_found());
        assert_eq!(path.len(), 0);
        assert!(path.steps().is_empty());
    }

    #[test]
    fn test_path_serialization() {
        let path = Path::found(vec![Step::Stay, Step::Act(1u8), Step::Act(2)], 2.0);
        let json = serde_json::to_string(&path).unwrap();
        let back: Path<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
