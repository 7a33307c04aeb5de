//! Composite complexity score.
//!
//! Edge density weighs 10 per edge-per-node, each hotspot adds 5 and each
//! reported cycle adds 10. Because the cycle list is capped, the cycle term is
//! capped with it.

pub const EDGE_DENSITY_WEIGHT: f64 = 10.0;
pub const HOTSPOT_WEIGHT: f64 = 5.0;
pub const CYCLE_WEIGHT: f64 = 10.0;

pub fn complexity_score(
    total_nodes: usize,
    total_edges: usize,
    hotspot_count: usize,
    cycle_count: usize,
) -> u64 {
    if total_nodes == 0 {
        return 0;
    }

    let density = total_edges as f64 / total_nodes as f64;
    let raw = density * EDGE_DENSITY_WEIGHT
        + hotspot_count as f64 * HOTSPOT_WEIGHT
        + cycle_count as f64 * CYCLE_WEIGHT;

    // Inputs are non-negative, so half-away-from-zero is plain half-up.
    raw.round() as u64
}
