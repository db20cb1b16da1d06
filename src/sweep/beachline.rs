use slotmap::SlotMap;

use super::event_queue::CircleToken;
use crate::math::{predicates_2d::break_point_x, Point2, TOLERANCE};
use crate::topology::{EdgeId, SiteId};

slotmap::new_key_type! {
    /// Unique identifier for an arc on the beachline.
    pub struct ArcId;
}

/// A circle event currently scheduled for an arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCircle {
    pub token: CircleToken,
    pub center: Point2,
}

/// One parabolic arc of the beachline.
#[derive(Debug, Clone)]
pub struct Arc {
    pub site: SiteId,
    /// Cached site position.
    pub focus: Point2,
    /// Edge traced by the break-point on this arc's left; `None` for the leftmost arc.
    pub edge: Option<EdgeId>,
    /// The circle event that would remove this arc, if any.
    pub circle: Option<PendingCircle>,
}

impl Arc {
    #[must_use]
    pub fn new(site: SiteId, focus: Point2) -> Self {
        Self {
            site,
            focus,
            edge: None,
            circle: None,
        }
    }
}

/// Where a new site lands on the beachline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// The beachline is empty.
    Empty,
    /// Strictly inside the arc at this index.
    Inside(usize),
    /// Exactly on the break-point between the arcs at `index` and `index + 1`.
    BreakPoint(usize),
    /// Right of every arc; only happens while all arcs sit on the sweep line.
    After(usize),
}

/// Ordered sequence of arcs, left to right.
///
/// Break-point positions depend on the sweep coordinate, so they are computed
/// on demand and never stored.
#[derive(Debug, Default)]
pub struct Beachline {
    arcs: SlotMap<ArcId, Arc>,
    order: Vec<ArcId>,
}

impl Beachline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// ID of the arc at `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<ArcId> {
        self.order.get(index).copied()
    }

    /// Arc at `index`.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Arc> {
        self.id_at(index).and_then(|id| self.arcs.get(id))
    }

    /// Mutable arc at `index`.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Arc> {
        let id = self.id_at(index)?;
        self.arcs.get_mut(id)
    }

    #[must_use]
    pub fn get(&self, id: ArcId) -> Option<&Arc> {
        self.arcs.get(id)
    }

    /// Current position of an arc in the left-to-right order.
    #[must_use]
    pub fn index_of(&self, id: ArcId) -> Option<usize> {
        self.order.iter().position(|&a| a == id)
    }

    /// Inserts `arc` so that it ends up at `index`.
    pub fn insert(&mut self, index: usize, arc: Arc) -> ArcId {
        let id = self.arcs.insert(arc);
        self.order.insert(index, id);
        id
    }

    /// Removes the arc at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Option<Arc> {
        if index >= self.order.len() {
            return None;
        }
        let id = self.order.remove(index);
        self.arcs.remove(id)
    }

    /// X of the break-point on the left of the arc at `index`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn left_break_point(&self, index: usize, directrix: f64) -> f64 {
        let Some(arc) = self.at(index) else {
            return f64::NEG_INFINITY;
        };
        if arc.focus.y == directrix {
            return arc.focus.x;
        }
        match index.checked_sub(1).and_then(|i| self.at(i)) {
            Some(left) => break_point_x(&left.focus, &arc.focus, directrix),
            None => f64::NEG_INFINITY,
        }
    }

    /// X of the break-point on the right of the arc at `index`.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn right_break_point(&self, index: usize, directrix: f64) -> f64 {
        if index + 1 < self.order.len() {
            return self.left_break_point(index + 1, directrix);
        }
        match self.at(index) {
            Some(arc) if arc.focus.y == directrix => arc.focus.x,
            _ => f64::INFINITY,
        }
    }

    /// Finds where a site at `x` lands when the sweep line is at `directrix`.
    #[must_use]
    pub fn locate(&self, x: f64, directrix: f64) -> Landing {
        if self.order.is_empty() {
            return Landing::Empty;
        }

        let mut lo = 0;
        let mut hi = self.order.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let dxl = self.left_break_point(mid, directrix) - x;
            if dxl > TOLERANCE {
                hi = mid;
                continue;
            }
            let dxr = x - self.right_break_point(mid, directrix);
            if dxr > TOLERANCE {
                lo = mid + 1;
                continue;
            }
            if dxl > -TOLERANCE {
                return match mid.checked_sub(1) {
                    Some(left) => Landing::BreakPoint(left),
                    None => Landing::Inside(0),
                };
            }
            if dxr > -TOLERANCE {
                return if mid + 1 < self.order.len() {
                    Landing::BreakPoint(mid)
                } else {
                    Landing::After(mid)
                };
            }
            return Landing::Inside(mid);
        }
        Landing::After(self.order.len() - 1)
    }
}
