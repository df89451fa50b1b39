pub mod budget;
pub mod day_info;
pub mod day_time;
pub mod schedule;
pub mod trip;

pub use budget::{BudgetReport, CategoryTotal, StayLine};
pub use day_info::DayInfo;
pub use day_time::DayTime;
pub use schedule::{Category, CategoryDetails, ScheduleItem};
pub use trip::Trip;
