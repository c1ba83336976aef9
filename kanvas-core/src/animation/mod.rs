pub mod animated;
pub mod ease;
pub mod timing;
