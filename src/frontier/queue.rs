//! Frontier containers: FIFO queue, LIFO stack, or priority queue.
//!
//! The priority queue pops the lowest score first and breaks ties by
//! insertion order, so a search over a fixed problem always expands states in
//! the same order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::SearchError;

/// Order in which discovered states leave the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Oldest first (breadth-first).
    Fifo,
    /// Newest first (depth-first).
    Lifo,
    /// Lowest evaluation score first.
    Priority,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Discipline::Fifo => "fifo",
            Discipline::Lifo => "lifo",
            Discipline::Priority => "priority",
        };
        f.write_str(name)
    }
}

impl FromStr for Discipline {
    type Err = SearchError;

    /// Parse a discipline name.
    ///
    /// ```
    /// use sealgo::frontier::Discipline;
    ///
    /// assert_eq!("queue".parse::<Discipline>().unwrap(), Discipline::Fifo);
    /// assert_eq!("LIFO".parse::<Discipline>().unwrap(), Discipline::Lifo);
    /// assert!("heap-of-bricks".parse::<Discipline>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "queue" => Ok(Discipline::Fifo),
            "lifo" | "stack" => Ok(Discipline::Lifo),
            "priority" | "pq" => Ok(Discipline::Priority),
            _ => Err(SearchError::UnknownDiscipline(s.to_string())),
        }
    }
}

/// A state waiting in the frontier, with the path cost and depth it was
/// queued with.
#[derive(Clone, Debug)]
pub struct Queued<S> {
    pub state: S,
    pub path_cost: f64,
    pub depth: usize,
}

/// Priority queue entry. `BinaryHeap` is a max-heap, so the ordering is
/// reversed: lower score, then lower sequence number, compares greater.
#[derive(Debug)]
struct Ranked<S> {
    score: f64,
    seq: u64,
    item: Queued<S>,
}

impl<S> PartialEq for Ranked<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Ranked<S> {}

impl<S> PartialOrd for Ranked<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Ranked<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
enum Slots<S> {
    Fifo(VecDeque<Queued<S>>),
    Lifo(Vec<Queued<S>>),
    Priority(BinaryHeap<Ranked<S>>),
}

/// Per-search frontier.
///
/// ```
/// use sealgo::frontier::{Discipline, Frontier};
///
/// let mut frontier = Frontier::new(Discipline::Priority);
/// frontier.push('b', 2.0, 0.0, 0);
/// frontier.push('a', 1.0, 0.0, 0);
/// frontier.push('c', 1.0, 0.0, 0);
///
/// let order: Vec<char> = std::iter::from_fn(|| frontier.pop().map(|q| q.state)).collect();
/// assert_eq!(order, vec!['a', 'c', 'b']);
/// ```
#[derive(Debug)]
pub struct Frontier<S> {
    slots: Slots<S>,
    next_seq: u64,
}

impl<S> Frontier<S> {
    /// Create an empty frontier with the given discipline.
    #[must_use]
    pub fn new(discipline: Discipline) -> Self {
        let slots = match discipline {
            Discipline::Fifo => Slots::Fifo(VecDeque::new()),
            Discipline::Lifo => Slots::Lifo(Vec::new()),
            Discipline::Priority => Slots::Priority(BinaryHeap::new()),
        };
        Self { slots, next_seq: 0 }
    }

    #[must_use]
    pub fn discipline(&self) -> Discipline {
        match self.slots {
            Slots::Fifo(_) => Discipline::Fifo,
            Slots::Lifo(_) => Discipline::Lifo,
            Slots::Priority(_) => Discipline::Priority,
        }
    }

    /// Queue a state. `score` is only used by the priority discipline.
    pub fn push(&mut self, state: S, score: f64, path_cost: f64, depth: usize) {
        let item = Queued {
            state,
            path_cost,
            depth,
        };
        match &mut self.slots {
            Slots::Fifo(queue) => queue.push_back(item),
            Slots::Lifo(stack) => stack.push(item),
            Slots::Priority(heap) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                heap.push(Ranked { score, seq, item });
            }
        }
    }

    /// Remove the next state according to the discipline.
    pub fn pop(&mut self) -> Option<Queued<S>> {
        match &mut self.slots {
            Slots::Fifo(queue) => queue.pop_front(),
            Slots::Lifo(stack) => stack.pop(),
            Slots::Priority(heap) => heap.pop().map(|r| r.item),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.slots {
            Slots::Fifo(queue) => queue.len(),
            Slots::Lifo(stack) => stack.len(),
            Slots::Priority(heap) => heap.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
