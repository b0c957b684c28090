//! Box-plane contour extraction for volume slicing
//!
//! Slicing a unit box with a plane yields a convex polygon with 3 to 6
//! vertices. The slice vertex shader computes that polygon per invocation;
//! this module holds the edge tables it indexes and a CPU implementation of
//! the same algorithm, used to validate the tables and by the volume-slice
//! compiler's tests.
//!
//! The tables are tied to the corner order of
//! [`BOX_CORNERS`](visgpu_core::BOX_CORNERS): corners 0-3 lie on the +x
//! face, corners 4-7 on the -x face.

use visgpu_core::BOX_CORNERS;
use visgpu_math::{Plane, Vec3};

/// The 12 box edges as corner-index pairs
///
/// Edges 0-3 bound the +x face, 4-7 the -x face, 8-11 run along x.
pub const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 2],
    [2, 3],
    [1, 3],
    [0, 1],
    [4, 6],
    [6, 7],
    [5, 7],
    [4, 5],
    [0, 5],
    [1, 4],
    [2, 7],
    [3, 6],
];

/// The two faces adjacent to each edge in [`BOX_EDGES`]
///
/// Faces are numbered 0 = +x, 1 = -x, 2 = -z, 3 = +z, 4 = +y, 5 = -y.
/// The contour walk steps from edge to edge through a shared face.
pub const EDGE_FACES: [[usize; 2]; 12] = [
    [0, 4],
    [0, 3],
    [0, 5],
    [0, 2],
    [1, 5],
    [1, 3],
    [1, 4],
    [1, 2],
    [2, 4],
    [2, 5],
    [3, 4],
    [3, 5],
];

/// Triangle-fan indices into the 6 contour slots
///
/// Four triangles rooted at slot 0 cover any contour up to a hexagon; slots
/// beyond the actual vertex count repeat slot 0, so the extra triangles are
/// degenerate and rasterize to nothing. One slice draw is always exactly 12
/// vertex invocations.
pub const FAN_INDICES: [usize; 12] = [0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 5];

/// Intersect the unit box with a plane, returning the 6 contour slots
///
/// Each edge is intersected at `t = d1 / (d1 - d2)` where `d1`, `d2` are the
/// signed plane distances of its endpoints; an edge counts as hit only for
/// `0 < t < 1` strictly, so a plane through a corner or along a face never
/// double-counts. Hits are then ordered by walking from face to adjacent
/// face, which yields the polygon's perimeter. Unused slots repeat slot 0;
/// if the plane misses the box entirely, every slot is the origin.
pub fn extract_contour(plane: Plane) -> [Vec3; 6] {
    let distances: [f32; 8] = std::array::from_fn(|i| plane.signed_distance(BOX_CORNERS[i]));

    let mut hit = [false; 12];
    let mut point = [Vec3::ZERO; 12];
    for (i, &[a, b]) in BOX_EDGES.iter().enumerate() {
        let d1 = distances[a];
        let d2 = distances[b];
        let denom = d1 - d2;
        if denom == 0.0 {
            continue;
        }
        let t = d1 / denom;
        if t > 0.0 && t < 1.0 {
            hit[i] = true;
            point[i] = BOX_CORNERS[a].lerp(BOX_CORNERS[b], t);
        }
    }

    let mut out = [Vec3::ZERO; 6];
    let Some(start) = (0..12).find(|&i| hit[i]) else {
        return out;
    };

    let mut used = [false; 12];
    used[start] = true;
    out[0] = point[start];
    let mut count = 1;
    let mut face = EDGE_FACES[start][0];

    for _ in 0..5 {
        let next = (0..12)
            .find(|&j| hit[j] && !used[j] && (EDGE_FACES[j][0] == face || EDGE_FACES[j][1] == face));
        let Some(j) = next else { break };
        used[j] = true;
        out[count] = point[j];
        count += 1;
        // Leave through the face we did not enter from
        face = if EDGE_FACES[j][0] == face {
            EDGE_FACES[j][1]
        } else {
            EDGE_FACES[j][0]
        };
    }

    // Fewer than 3 hits cannot form a polygon; collapse everything to slot 0
    if count < 3 {
        count = 1;
    }
    let first = out[0];
    for slot in out.iter_mut().skip(count) {
        *slot = first;
    }
    out
}

/// Number of distinct vertices among the 6 contour slots
pub fn distinct_count(slots: &[Vec3; 6]) -> usize {
    let mut n = 0;
    for (i, p) in slots.iter().enumerate() {
        if !slots[..i].iter().any(|q| q == p) {
            n += 1;
        }
    }
    n
}
