use std::f64::consts::SQRT_2;

use gridnav_core::Node;

/// Octile distance: the exact cost of an obstacle-free 8-way walk with
/// unit orthogonal and √2 diagonal steps.
#[inline]
pub fn octile(a: Node, b: Node) -> f64 {
    let dr = (a.row - b.row).abs() as f64;
    let dc = (a.col - b.col).abs() as f64;
    (dr + dc) + (SQRT_2 - 2.0) * dr.min(dc)
}

/// Straight-line (L2) distance between two nodes.
#[inline]
pub fn euclidean(a: Node, b: Node) -> f64 {
    let dr = (a.row - b.row) as f64;
    let dc = (a.col - b.col) as f64;
    dr.hypot(dc)
}
