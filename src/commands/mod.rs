pub mod digest;
pub mod outline;
pub mod status;
