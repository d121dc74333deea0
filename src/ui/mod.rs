pub mod month;
pub mod summary;
pub mod week;

pub use month::MonthView;
pub use summary::SummaryView;
pub use week::WeekView;
