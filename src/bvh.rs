//! Bounding Volume Hierarchy

use std::{cmp::Ordering, fmt::Debug, sync::Arc};

use rand::Rng;

use crate::{
    bounds::BoundingBox,
    hittables::{HitRecord, Hittable, HittableList},
    interval::Interval,
    ray::Ray,
};

/// How a [BvhNode] picks the axis to split its span along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SplitAxis {
    /// A uniformly random axis per node
    #[default]
    Random,
    /// The axis along which the span's bounding box is widest
    Longest,
}

/// A node in the BVH.
///
/// Holds the bounding box that contains the two [Hittable] children
pub struct BvhNode {
    /// left portion of the subhierarchy
    left: Arc<dyn Hittable>,
    /// right portion of the subhierarchy
    right: Arc<dyn Hittable>,
    /// AABB of the current hierarchy
    bbox: BoundingBox,
}

/// Compares two bounding boxes by their lower bound along the given axis
pub fn box_cmp(a: &BoundingBox, b: &BoundingBox, axis_idx: usize) -> Ordering {
    a.axis_interval(axis_idx)
        .min
        .total_cmp(&b.axis_interval(axis_idx).min)
}

/// Counters gathered while building a hierarchy
#[derive(Debug, Default, Clone, Copy)]
struct BuildStats {
    nodes: usize,
    max_depth: usize,
}

impl BvhNode {
    /// Creates a new BvhNode, splitting along random axes drawn from `rng`
    ///
    /// # Panics
    ///
    /// Panics if `hitlist` is empty.
    pub fn new(hitlist: HittableList, rng: &mut impl Rng) -> Self {
        Self::with_split(hitlist, SplitAxis::Random, rng)
    }

    /// Creates a new BvhNode using the given axis selection
    ///
    /// # Panics
    ///
    /// Panics if `hitlist` is empty.
    pub fn with_split(hitlist: HittableList, split: SplitAxis, rng: &mut impl Rng) -> Self {
        let mut objects = hitlist.into_objects();
        let mut stats = BuildStats::default();
        let node = Self::new_node(&mut objects, split, 0, &mut stats, rng);

        log::debug!(
            "built BVH over {} objects: {} nodes, max depth {}",
            objects.len(),
            stats.nodes,
            stats.max_depth
        );
        node
    }

    /// Implementation of `new`, over the span `objects`
    fn new_node(
        objects: &mut [Arc<dyn Hittable>],
        split: SplitAxis,
        depth: usize,
        stats: &mut BuildStats,
        rng: &mut impl Rng,
    ) -> Self {
        assert!(!objects.is_empty(), "Given empty scene!");

        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(depth);

        let axis_idx = match split {
            SplitAxis::Random => rng.gen_range(0..3),
            SplitAxis::Longest => objects
                .iter()
                .fold(BoundingBox::default(), |acc, o| {
                    BoundingBox::union(&acc, &o.bounding_box())
                })
                .longest_axis(),
        };

        let span = objects.len();
        let (left, right) = match span {
            1 => (Arc::clone(&objects[0]), Arc::clone(&objects[0])),
            2 => (Arc::clone(&objects[0]), Arc::clone(&objects[1])),
            _ => {
                objects.sort_by(|a, b| box_cmp(&a.bounding_box(), &b.bounding_box(), axis_idx));

                let (half0, half1) = objects.split_at_mut(span / 2);

                let left: Arc<dyn Hittable> =
                    Arc::new(Self::new_node(half0, split, depth + 1, stats, rng));
                let right: Arc<dyn Hittable> =
                    Arc::new(Self::new_node(half1, split, depth + 1, stats, rng));
                (left, right)
            }
        };

        let bbox = BoundingBox::union(&left.bounding_box(), &right.bounding_box());

        Self { left, right, bbox }
    }
}

impl Debug for BvhNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BvhNode {{{:?}}}", self.bbox)
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        self.bbox.hit(ray, ray_t)?;

        let left_hit = self.left.hit(ray, ray_t);

        // a right hit inside the narrowed window is closer than any left hit
        let t_max = match &left_hit {
            Some(rec) => rec.t,
            None => ray_t.max,
        };

        let right_hit = self.right.hit(ray, Interval::new(ray_t.min, t_max));
        right_hit.or(left_hit)
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}
