pub mod country;
pub mod money;
pub mod percent;

pub use country::Country;
pub use money::round2;
pub use percent::Percentage;
