//! Pure sort/group engine for the catalog.
//!
//! [`arrange`] turns the flat production list plus a sort mode into the
//! ordered, phase-grouped structure the dashboard renders. It has no side
//! effects; the orchestrator calls it only when the list or sort mode
//! changes and keeps the result.

use crate::models::{Production, SortBy};

/// Reference display order for known phases. Labels absent from this list
/// sort after all known phases, in first-seen order.
pub const PHASE_ORDER: [&str; 6] = [
    "Phase 1", "Phase 2", "Phase 3", "Phase 4", "Phase 5", "Phase 6",
];

/// One phase section of the dashboard, items already in display order
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseGroup {
    pub phase: String,
    pub productions: Vec<Production>,
}

/// Sorts the catalog by the selected order field, partitions it by phase
/// preserving that order within each group, and orders the groups by
/// [`PHASE_ORDER`].
///
/// The concatenation of the returned groups is a permutation of the input.
/// Equal order values keep their input relative order (stable sort).
pub fn arrange(productions: &[Production], sort_by: SortBy) -> Vec<PhaseGroup> {
    let mut sorted: Vec<Production> = productions.to_vec();
    sorted.sort_by_key(|p| p.order_key(sort_by));

    let mut groups: Vec<PhaseGroup> = Vec::new();
    for production in sorted {
        match groups.iter_mut().find(|g| g.phase == production.phase) {
            Some(group) => group.productions.push(production),
            None => groups.push(PhaseGroup {
                phase: production.phase.clone(),
                productions: vec![production],
            }),
        }
    }

    groups.sort_by_key(|g| phase_rank(&g.phase));
    groups
}

fn phase_rank(phase: &str) -> usize {
    PHASE_ORDER
        .iter()
        .position(|known| *known == phase)
        .unwrap_or(PHASE_ORDER.len())
}
