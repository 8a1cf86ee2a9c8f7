//! R-tree over boundary ring bounding boxes.
//!
//! Each entry is an [`IndexedRing`]: the ring, its lon/lat bounding box and
//! the owning country. The tree only answers "which ring boxes overlap this
//! window"; exact distances are left to the resolver.
//!
//! ## Determinism
//!
//! `rstar` makes no promise about the order in which intersecting entries are
//! visited, and the order differs between `insert` and `bulk_load`. Every ring
//! carries its insertion sequence number and query results are sorted by it,
//! so two indexes built from the same input always answer identically.

use std::sync::Arc;

use geo::Point;
use rstar::{RTree, RTreeObject, AABB};

use crate::identifiers::CountryId;
use crate::models::types::BoundaryRing;
use crate::spatial::bbox::BoundingBox;

/// A boundary ring ready for lookup. Immutable once built.
#[derive(Clone, Debug)]
pub struct IndexedRing {
    pub country_id: CountryId,
    pub ring: BoundaryRing,
    pub bbox: BoundingBox,
    /// Position in insertion order.
    pub seq: usize,
}

// ============================================================================
// Ring Spatial Node
// ============================================================================

#[derive(Clone)]
pub struct RingNode {
    pub ring: Arc<IndexedRing>,
    aabb: AABB<[f64; 2]>,
}

impl RingNode {
    fn new(ring: Arc<IndexedRing>) -> Self {
        let aabb = ring.bbox.to_aabb();
        Self { ring, aabb }
    }
}

impl RTreeObject for RingNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

// ============================================================================
// Spatial Index
// ============================================================================

/// Ring index for one dataset load.
///
/// Built once and then only queried; a new dataset or radius means a new
/// index. Cheap to clone since entries live in `Arc`s.
#[derive(Clone, Default)]
pub struct SpatialIndex {
    tree: RTree<RingNode>,
    next_seq: usize,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(ring, owner)` pairs in one pass.
    ///
    /// Rings with fewer than two points are skipped. Sequence numbers follow
    /// the order of `rings`, counting only accepted rings.
    pub fn bulk_load(rings: impl IntoIterator<Item = (BoundaryRing, CountryId)>) -> Self {
        let mut next_seq = 0;
        let mut skipped = 0usize;
        let nodes: Vec<RingNode> = rings
            .into_iter()
            .filter_map(|(ring, country_id)| {
                let indexed = index_ring(ring, country_id, next_seq);
                match indexed {
                    Some(r) => {
                        next_seq += 1;
                        Some(RingNode::new(Arc::new(r)))
                    }
                    None => {
                        skipped += 1;
                        None
                    }
                }
            })
            .collect();

        if skipped > 0 {
            tracing::debug!(skipped, "skipped degenerate rings");
        }

        Self {
            tree: RTree::bulk_load(nodes),
            next_seq,
        }
    }

    /// Index one ring. Returns `false` (and stores nothing) when the ring has
    /// fewer than two points.
    pub fn insert(&mut self, ring: BoundaryRing, country_id: CountryId) -> bool {
        let Some(indexed) = index_ring(ring, country_id, self.next_seq) else {
            return false;
        };
        self.next_seq += 1;
        self.tree.insert(RingNode::new(Arc::new(indexed)));
        true
    }

    /// Rings whose bounding box intersects `bbox`, in insertion order.
    ///
    /// An empty or invalid box matches nothing.
    pub fn query(&self, bbox: &BoundingBox) -> Vec<Arc<IndexedRing>> {
        if !bbox.is_valid() {
            return Vec::new();
        }

        let mut hits: Vec<Arc<IndexedRing>> = self
            .tree
            .locate_in_envelope_intersecting(&bbox.to_aabb())
            .map(|node| node.ring.clone())
            .collect();
        hits.sort_by_key(|r| r.seq);
        hits
    }

    /// Rings whose bounding box comes within `tolerance` degrees of `point`.
    pub fn query_around(&self, point: Point, tolerance: f64) -> Vec<Arc<IndexedRing>> {
        if tolerance < 0.0 || !tolerance.is_finite() {
            return Vec::new();
        }
        self.query(&BoundingBox::around(point, tolerance))
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in insertion order.
    pub fn rings(&self) -> Vec<Arc<IndexedRing>> {
        let mut all: Vec<_> = self.tree.iter().map(|node| node.ring.clone()).collect();
        all.sort_by_key(|r| r.seq);
        all
    }
}

fn index_ring(ring: BoundaryRing, country_id: CountryId, seq: usize) -> Option<IndexedRing> {
    if ring.0.len() < 2 {
        return None;
    }
    // min/max skip NaN, so the box alone would not catch it
    if ring.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return None;
    }
    let bbox = BoundingBox::of(&ring.0);
    if !bbox.is_valid() {
        return None;
    }
    Some(IndexedRing {
        country_id,
        ring,
        bbox,
        seq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, LineString};

    fn square(x: f64, y: f64, size: f64) -> BoundaryRing {
        line_string![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ]
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::new();
        assert!(index.is_empty());
        assert!(index.query_around(Point::new(0.0, 0.0), 10.0).is_empty());
    }

    #[test]
    fn test_insert_and_query() {
        let mut index = SpatialIndex::new();
        assert!(index.insert(square(0.0, 0.0, 1.0), CountryId::new("alpha")));
        assert!(index.insert(square(10.0, 10.0, 1.0), CountryId::new("beta")));
        assert_eq!(index.len(), 2);

        let hits = index.query_around(Point::new(0.5, 0.5), 0.5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].country_id, CountryId::new("alpha"));
        assert_eq!(hits[0].bbox, BoundingBox::new(0.0, 0.0, 1.0, 1.0));

        assert!(index.query_around(Point::new(5.0, 5.0), 0.5).is_empty());
        assert_eq!(index.query(&BoundingBox::new(-1.0, -1.0, 20.0, 20.0)).len(), 2);
    }

    #[test]
    fn test_degenerate_rings_are_skipped() {
        let mut index = SpatialIndex::new();
        let lonely = LineString::from(vec![(3.0, 3.0)]);
        assert!(!index.insert(lonely, CountryId::new("dot")));
        assert!(!index.insert(LineString::new(vec![]), CountryId::new("nothing")));
        assert!(index.is_empty());
        assert!(index.query_around(Point::new(3.0, 3.0), 1.0).is_empty());

        let bulk = SpatialIndex::bulk_load(vec![
            (LineString::from(vec![(3.0, 3.0)]), CountryId::new("dot")),
            (square(2.0, 2.0, 0.5), CountryId::new("gamma")),
        ]);
        assert_eq!(bulk.len(), 1);
        let hits = bulk.query_around(Point::new(3.0, 3.0), 1.0);
        assert!(hits.iter().all(|r| r.country_id != CountryId::new("dot")));
        assert_eq!(hits[0].seq, 0);
    }

    #[test]
    fn test_non_finite_ring_is_skipped() {
        let mut index = SpatialIndex::new();
        let ring = LineString::from(vec![(0.0, 0.0), (f64::NAN, 1.0)]);
        assert!(!index.insert(ring, CountryId::new("nan")));
        let ring = LineString::from(vec![(0.0, f64::NAN), (1.0, 1.0), (0.0, 0.0)]);
        assert!(!index.insert(ring, CountryId::new("nan-lat")));
        let ring = LineString::from(vec![(0.0, 0.0), (f64::INFINITY, 1.0)]);
        assert!(!index.insert(ring, CountryId::new("inf")));
        assert!(index.is_empty());

        let bulk = SpatialIndex::bulk_load(vec![
            (LineString::from(vec![(0.0, 0.0), (f64::NAN, 1.0)]), CountryId::new("nan")),
            (square(0.0, 0.0, 1.0), CountryId::new("ok")),
        ]);
        assert_eq!(bulk.len(), 1);
        // Every indexed box holds all of its ring's points
        assert!(bulk
            .rings()
            .iter()
            .all(|r| r.ring.0.iter().all(|c| r.bbox.contains(*c))));
        assert_eq!(bulk.rings()[0].country_id, CountryId::new("ok"));
    }

    #[test]
    fn test_invalid_query_box() {
        let index = SpatialIndex::bulk_load(vec![(square(0.0, 0.0, 1.0), CountryId::new("a"))]);
        assert!(index.query(&BoundingBox::EMPTY).is_empty());
        assert!(index.query(&BoundingBox::new(1.0, 1.0, 0.0, 0.0)).is_empty());
        assert!(index.query_around(Point::new(0.5, 0.5), -1.0).is_empty());
        assert!(index.query_around(Point::new(0.5, 0.5), f64::NAN).is_empty());
    }

    #[test]
    fn test_results_in_insertion_order() {
        let rings: Vec<_> = (0..50)
            .map(|i| (square(i as f64 * 0.1, 0.0, 1.0), CountryId::new(format!("c{i}"))))
            .collect();

        let bulk = SpatialIndex::bulk_load(rings.clone());
        let mut incremental = SpatialIndex::new();
        for (ring, id) in rings {
            incremental.insert(ring, id);
        }

        let window = BoundingBox::new(2.0, 0.0, 3.0, 1.0);
        let a: Vec<_> = bulk.query(&window).iter().map(|r| r.country_id.clone()).collect();
        let b: Vec<_> = incremental.query(&window).iter().map(|r| r.country_id.clone()).collect();
        assert_eq!(a, b);
        assert!(bulk.query(&window).windows(2).all(|w| w[0].seq < w[1].seq));
        assert_eq!(bulk.rings().len(), 50);
    }
}
