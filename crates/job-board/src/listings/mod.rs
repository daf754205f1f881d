//! Job listing store, filter engine, feed client, and card views.

pub mod card;
pub mod criteria;
pub mod domain;
pub mod feed;
pub mod filter;
pub mod options;
pub mod session;
pub mod store;

pub use card::{cards, render_text, salary_line, write_csv, JobCard};
pub use criteria::{CriteriaError, CriterionName, CriterionUpdate, FilterCriteria};
pub use domain::{JobId, JobRecord, RemoteOption};
pub use feed::{
    decode_batch, fetch_listing, load_listing, FeedBatch, FeedError, HttpJobFeed, JobFeed,
    JsonFileJobFeed,
};
pub use filter::{visible_refs, visible_set};
pub use options::{control_options, Choice, ControlOptions};
pub use session::{FilterEngine, JobBoardSession, VisibleSetListener};
pub use store::{ListingSink, ListingStore};
