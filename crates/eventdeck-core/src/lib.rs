//! Core types: event windows, date parsing, carousel state, site content

pub mod carousel;
pub mod catalog;
pub mod clock;
pub mod content;
pub mod date;
pub mod event;
pub mod time;
pub mod tracing;

pub use carousel::{CarouselController, CarouselSnapshot, Direction, SubscriptionId};
pub use catalog::{ALL_CATEGORIES, EventCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use content::{Member, Photo, Roster};
pub use date::{DateParseError, DatePattern, parse_end_date, parse_start_date, parse_time_of_day};
pub use event::{Event, EventStatus, EventView, Schedule};
pub use time::LiveWindow;
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
