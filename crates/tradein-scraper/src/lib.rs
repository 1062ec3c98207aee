pub mod error;
pub mod landing;
pub mod navigator;
pub mod run;
pub mod session;
pub mod traverse;

pub use error::{NavError, ScrapeError};
pub use landing::reset_to_root;
pub use navigator::{wait_and_click, Navigator};
pub use run::{plan_for, scrape_all, scrape_brand, ScrapeReport};
pub use session::{with_session, WebDriverSession};
pub use traverse::{enumerate, Timeouts, TraversalPlan};
