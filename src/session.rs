use crate::nav::{Intent, NavConfig, Navigator, Outcome};
use crate::store::{EntityStore, LoadReport, SnapshotDelivery};
use crate::view::{self, ViewDescriptor};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One browsing session: the loaded snapshot plus where the user is in it.
pub struct Session {
    id: String,
    store: EntityStore,
    nav: Navigator,
    revision: u64,
}

impl Session {
    pub fn new(config: NavConfig) -> Self {
        let id = Uuid::new_v4().to_string();
        info!(
            session = %id,
            layout = ?config.layout,
            roster_drill = config.roster_drill_enabled(),
            "session opened"
        );
        Self {
            id,
            store: EntityStore::default(),
            nav: Navigator::new(config),
            revision: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn nav(&self) -> &Navigator {
        &self.nav
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Swaps in the store produced by `delivery`. Navigation is left as is.
    pub fn load(&mut self, delivery: SnapshotDelivery) -> LoadReport {
        let next = self.store.with_delivery(delivery);
        let report = next.report();
        for dup in &report.duplicates {
            warn!(
                session = %self.id,
                set = dup.set,
                id = %dup.id,
                "duplicate id in snapshot; first record wins"
            );
        }
        self.store = next;
        self.revision += 1;
        info!(
            session = %self.id,
            students = report.counts.students,
            classes = report.counts.classes,
            scores = report.counts.scores,
            revision = self.revision,
            "snapshot loaded"
        );
        report
    }

    pub fn open(&mut self, intent: &Intent) -> Outcome {
        let outcome = self.nav.open(intent);
        debug!(session = %self.id, ?intent, "intent");
        self.accept(outcome, "open");
        outcome
    }

    pub fn back(&mut self) -> Outcome {
        let outcome = self.nav.back();
        self.accept(outcome, "back");
        outcome
    }

    pub fn reset(&mut self) -> Outcome {
        let outcome = self.nav.reset();
        self.accept(outcome, "reset");
        outcome
    }

    fn accept(&mut self, outcome: Outcome, what: &str) {
        if outcome.handled() {
            self.revision += 1;
        }
        debug!(
            session = %self.id,
            what,
            ?outcome,
            view = ?self.nav.view(),
            depth = self.nav.depth(),
            "navigation"
        );
    }

    pub fn view(&self) -> ViewDescriptor {
        let context = self.nav.context().clone();
        ViewDescriptor {
            revision: self.revision,
            can_go_back: self.nav.can_go_back(),
            body: view::resolve(&self.store, self.nav.view(), &context),
            context,
        }
    }
}
