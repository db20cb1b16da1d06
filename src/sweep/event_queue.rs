use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use super::beachline::ArcId;
use crate::math::Point2;
use crate::topology::SiteId;

/// Identifies one scheduled circle event so it can be invalidated lazily.
pub type CircleToken = u64;

/// What happens when the sweep line reaches an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// A new site touches the sweep line.
    Site(SiteId),
    /// The arc `arc` shrinks to a point at `center`, creating a Voronoi vertex.
    Circle {
        arc: ArcId,
        center: Point2,
        token: CircleToken,
    },
}

/// A pending sweep event located at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub x: f64,
    pub y: f64,
    pub kind: EventKind,
}

impl Event {
    /// Circle events win exact ties against site events at the same position.
    fn kind_rank(&self) -> u8 {
        match self.kind {
            EventKind::Circle { .. } => 0,
            EventKind::Site(_) => 1,
        }
    }
}

#[derive(Debug)]
struct Queued {
    event: Event,
    seq: u64,
}

impl Queued {
    /// Total order: y, then x, then kind, then insertion sequence.
    fn sweep_order(&self, other: &Self) -> Ordering {
        self.event
            .y
            .total_cmp(&other.event.y)
            .then_with(|| self.event.x.total_cmp(&other.event.x))
            .then_with(|| self.event.kind_rank().cmp(&other.event.kind_rank()))
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.sweep_order(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    // Reversed so that `BinaryHeap` pops the smallest sweep coordinate first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.sweep_order(self)
    }
}

/// Priority queue of site and circle events in ascending sweep order.
///
/// Circle events are never removed eagerly: [`EventQueue::invalidate`] marks
/// their token dead and [`EventQueue::pop`] skips them when they surface.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Queued>,
    dead: HashSet<CircleToken>,
    next_seq: u64,
    next_token: CircleToken,
    skipped: usize,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a site event at the site's own position.
    pub fn push_site(&mut self, site: SiteId, position: Point2) {
        self.push(Event {
            x: position.x,
            y: position.y,
            kind: EventKind::Site(site),
        });
    }

    /// Schedules a circle event for `arc`, firing when the sweep reaches `sweep_y`.
    ///
    /// Returns the token that later identifies the event for invalidation.
    pub fn push_circle(&mut self, arc: ArcId, center: Point2, sweep_y: f64) -> CircleToken {
        let token = self.next_token;
        self.next_token += 1;
        self.push(Event {
            x: center.x,
            y: sweep_y,
            kind: EventKind::Circle { arc, center, token },
        });
        token
    }

    fn push(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Queued { event, seq });
    }

    /// Marks a scheduled circle event as superseded.
    pub fn invalidate(&mut self, token: CircleToken) {
        self.dead.insert(token);
    }

    /// Pops the next live event, silently discarding invalidated ones.
    pub fn pop(&mut self) -> Option<Event> {
        while let Some(Queued { event, .. }) = self.heap.pop() {
            if let EventKind::Circle { token, .. } = event.kind {
                if self.dead.remove(&token) {
                    self.skipped += 1;
                    tracing::trace!(token, "skipping invalidated circle event");
                    continue;
                }
            }
            return Some(event);
        }
        None
    }

    /// Number of invalidated events discarded so far.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
