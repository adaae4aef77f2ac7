//! Bounded position history

use std::collections::VecDeque;

use labsim_math::Vec2;
use serde::{Deserialize, Serialize};

/// Default number of positions kept for path drawing
pub const DEFAULT_TRAIL_CAPACITY: usize = 100;

/// Ordered history of past positions, oldest first
///
/// Append-only; once full, each push evicts the oldest point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRAIL_CAPACITY)
    }
}

impl Trail {
    /// A capacity of zero is bumped to one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained point
    pub fn first(&self) -> Option<Vec2> {
        self.points.front().copied()
    }

    /// Most recent point
    pub fn last(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
