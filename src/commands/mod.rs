pub mod rank;
pub mod show;
