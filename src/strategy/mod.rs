pub mod hedge;
pub mod lock_in;
pub mod params;
pub mod recovery;
pub mod wheel;

pub use hedge::HedgeReport;
pub use lock_in::LockInReport;
pub use params::{CoveredCallPlan, HedgeParams, LockInParams, PremiumQuote, WheelParams};
pub use recovery::{RecoveryInputs, RecoveryPath, RecoveryPlan};
pub use wheel::WheelReport;
