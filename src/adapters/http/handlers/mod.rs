pub mod bills;
pub mod challans;
pub mod parties;
