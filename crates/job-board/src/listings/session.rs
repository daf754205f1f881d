use super::criteria::{CriterionUpdate, FilterCriteria};
use super::domain::JobRecord;
use super::filter::visible_set;
use super::store::{ListingSink, ListingStore};
use tracing::debug;

/// Callback run after every recompute with the new revision and visible set.
pub trait VisibleSetListener: Send {
    fn on_recompute(&mut self, revision: u64, visible: &[JobRecord]);
}

impl<F> VisibleSetListener for F
where
    F: FnMut(u64, &[JobRecord]) + Send,
{
    fn on_recompute(&mut self, revision: u64, visible: &[JobRecord]) {
        self(revision, visible)
    }
}

/// Current criteria plus the visible set derived from them.
///
/// The visible set is rebuilt from the full listing on every change; only the
/// final result is kept between changes.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    criteria: FilterCriteria,
    visible: Vec<JobRecord>,
    revision: u64,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible(&self) -> &[JobRecord] {
        &self.visible
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_criterion(&mut self, update: CriterionUpdate, listing: &[JobRecord]) {
        self.criteria.apply(update);
        self.recompute(listing);
    }

    pub fn recompute(&mut self, listing: &[JobRecord]) {
        self.visible = visible_set(listing, &self.criteria);
        self.revision += 1;
    }
}

/// The explicit state of one viewing session: the listing store, the filter
/// engine over it, and whoever wants to hear about recomputes.
///
/// All mutation goes through `&mut self`, so each change and its recompute
/// finish before anything can observe [`JobBoardSession::visible`].
#[derive(Default)]
pub struct JobBoardSession {
    store: ListingStore,
    engine: FilterEngine,
    listeners: Vec<Box<dyn VisibleSetListener>>,
}

impl JobBoardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            engine: FilterEngine::with_criteria(criteria),
            ..Self::default()
        }
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.engine.criteria()
    }

    pub fn visible(&self) -> &[JobRecord] {
        self.engine.visible()
    }

    pub fn revision(&self) -> u64 {
        self.engine.revision()
    }

    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: VisibleSetListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_criterion(&mut self, update: CriterionUpdate) {
        let name = update.name();
        self.engine.set_criterion(update, self.store.current());
        debug!(criterion = name.key(), "filter criterion updated");
        self.notify();
    }

    fn notify(&mut self) {
        let revision = self.engine.revision();
        let visible = self.engine.visible();
        debug!(
            revision,
            listed = self.store.len(),
            visible = visible.len(),
            "visible set recomputed"
        );
        for listener in &mut self.listeners {
            listener.on_recompute(revision, visible);
        }
    }
}

impl ListingSink for JobBoardSession {
    fn load(&mut self, records: Vec<JobRecord>) {
        self.store.load(records);
        self.engine.recompute(self.store.current());
        self.notify();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::RemoteOption;
    use std::sync::{Arc, Mutex};

    fn posting(id: &str, location: &str, years: u32) -> JobRecord {
        JobRecord {
            company_name: Some(format!("{id} Inc")),
            job_role: Some("backend".to_string()),
            location: Some(location.to_string()),
            min_experience_years: Some(years),
            min_base_salary: Some(10.0),
            ..JobRecord::new(id)
        }
    }

    #[test]
    fn empty_session_has_empty_visible_set() {
        let session = JobBoardSession::new();
        assert!(session.visible().is_empty());
        assert!(session.criteria().is_unconstrained());
    }

    #[test]
    fn criteria_set_before_load_apply_once_records_arrive() {
        let mut session = JobBoardSession::new();
        session.set_criterion(CriterionUpdate::RemoteOption(Some(RemoteOption::Onsite)));
        assert!(session.visible().is_empty());

        session.load(vec![posting("a", "remote", 1), posting("b", "onsite", 1)]);
        let ids: Vec<&str> = session.visible().iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn reload_recomputes_against_new_listing() {
        let mut session = JobBoardSession::new();
        session.set_criterion(CriterionUpdate::MinExperience(Some(2)));
        session.load(vec![posting("a", "remote", 3)]);
        assert_eq!(session.visible().len(), 1);

        session.load(vec![posting("b", "remote", 1)]);
        assert!(session.visible().is_empty());
    }

    #[test]
    fn initial_criteria_filter_the_first_load() {
        let criteria = FilterCriteria {
            min_experience: Some(3),
            ..FilterCriteria::default()
        };
        let mut session = JobBoardSession::with_criteria(criteria.clone());
        assert_eq!(session.criteria(), &criteria);
        assert_eq!(session.revision(), 0);

        session.load(vec![posting("a", "remote", 1), posting("b", "remote", 4)]);
        let ids: Vec<&str> = session.visible().iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        assert_eq!(session.revision(), 1);
    }

    #[test]
    fn listeners_see_every_recompute() {
        let seen: Arc<Mutex<Vec<(u64, usize)>>> = Arc::default();
        let sink = seen.clone();

        let mut session = JobBoardSession::new();
        session.subscribe(move |revision: u64, visible: &[JobRecord]| {
            sink.lock()
                .expect("listener mutex poisoned")
                .push((revision, visible.len()));
        });

        session.load(vec![posting("a", "remote", 1), posting("b", "remote", 4)]);
        session.set_criterion(CriterionUpdate::MinExperience(Some(3)));
        session.set_criterion(CriterionUpdate::MinExperience(None));

        let seen = seen.lock().expect("listener mutex poisoned");
        assert_eq!(*seen, vec![(1, 2), (2, 1), (3, 2)]);
    }

    #[test]
    fn repeating_a_criterion_keeps_the_result() {
        let mut session = JobBoardSession::new();
        session.load(vec![posting("a", "remote", 1), posting("b", "onsite", 4)]);

        session.set_criterion(CriterionUpdate::SearchText("B Inc".to_string()));
        let first = session.visible().to_vec();
        session.set_criterion(CriterionUpdate::SearchText("B Inc".to_string()));

        assert_eq!(session.visible(), first.as_slice());
        assert_eq!(first.len(), 1);
    }
}
