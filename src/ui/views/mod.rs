// Board view exports

pub mod month_view;
pub mod week_view;

pub use month_view::MonthView;
pub use week_view::WeekView;
