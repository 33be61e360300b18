//! In-process navigation history.

mod history;

pub use history::HistoryRouter;
