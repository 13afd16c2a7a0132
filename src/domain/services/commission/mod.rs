pub mod commission;

pub use self::commission::{CommissionSchedule, MAX_COMMISSION, MIN_COMMISSION};
