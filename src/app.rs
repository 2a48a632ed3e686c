use std::collections::HashSet;

use crate::arrange::{arrange, PhaseGroup};
use crate::models::{Production, SortBy};
use crate::store::WatchedStore;

/// Load state of the dashboard
///
/// `Failed` is terminal within a session; recovery is a full restart of the
/// app loop, not a transition back to `Loading`. Everything that happens in
/// `Ready` is a stateless re-render, not a state-machine transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Aggregate watch-progress numbers shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub watched: usize,
    pub percent: u32,
}

/// Rounded watched percentage; zero when the catalog is empty
pub fn watched_percentage(watched: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        (watched as f64 / total as f64 * 100.0).round() as u32
    }
}

/// Dashboard orchestrator state
///
/// Holds the fetched catalog and ephemeral UI state; sorting/grouping is
/// delegated to [`arrange`] and watched marks to [`WatchedStore`]. The
/// arranged groups are recomputed only when the catalog or the sort mode
/// changes, never per render.
pub struct App {
    pub load: LoadState,
    pub sort_by: SortBy,
    pub watched: WatchedStore,
    /// Transient footer message (e.g. a failed persistence write)
    pub notice: Option<String>,
    productions: Vec<Production>,
    groups: Vec<PhaseGroup>,
    selected: usize,
    expanded: HashSet<String>,
}

impl App {
    pub fn new(watched: WatchedStore, sort_by: SortBy) -> Self {
        Self {
            load: LoadState::Loading,
            sort_by,
            watched,
            notice: None,
            productions: Vec::new(),
            groups: Vec::new(),
            selected: 0,
            expanded: HashSet::new(),
        }
    }

    /// Stores the fetched catalog verbatim and enters `Ready`
    pub fn on_loaded(&mut self, productions: Vec<Production>) {
        self.productions = productions;
        self.rearrange();
        self.load = LoadState::Ready;
    }

    /// Records the fetch failure; the session stays on the failed screen
    pub fn on_failed(&mut self, message: String) {
        self.load = LoadState::Failed(message);
    }

    /// Switches the sort mode, regrouping only when it actually changes
    pub fn set_sort(&mut self, sort_by: SortBy) {
        if self.sort_by != sort_by {
            self.sort_by = sort_by;
            self.rearrange();
        }
    }

    fn rearrange(&mut self) {
        self.groups = arrange(&self.productions, self.sort_by);
    }

    /// Phase groups in display order
    pub fn groups(&self) -> &[PhaseGroup] {
        &self.groups
    }

    pub fn stats(&self) -> Stats {
        let total = self.productions.len();
        let watched = self
            .productions
            .iter()
            .filter(|p| self.watched.is_watched(&p.title))
            .count();
        Stats {
            total,
            watched,
            percent: watched_percentage(watched, total),
        }
    }

    /// Index of the selected card within the arranged order
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.productions.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// The production under the cursor, in arranged order
    pub fn selected_production(&self) -> Option<&Production> {
        self.groups
            .iter()
            .flat_map(|g| g.productions.iter())
            .nth(self.selected)
    }

    /// Flips watched state for the selected card, persisting through the store
    pub fn toggle_selected(&mut self) {
        let Some(title) = self.selected_production().map(|p| p.title.clone()) else {
            return;
        };
        if let Err(e) = self.watched.toggle(&title) {
            tracing::error!(error = %e, title = %title, "failed to persist watched state");
            self.notice = Some(format!("Could not save watched state: {e}"));
        }
    }

    pub fn is_expanded(&self, title: &str) -> bool {
        self.expanded.contains(title)
    }

    /// Expands or collapses the selected card's synopsis
    ///
    /// Per-card, ephemeral, never persisted; the set dies with the session.
    pub fn toggle_expanded(&mut self) {
        let Some(title) = self.selected_production().map(|p| p.title.clone()) else {
            return;
        };
        if !self.expanded.remove(&title) {
            self.expanded.insert(title);
        }
    }
}
