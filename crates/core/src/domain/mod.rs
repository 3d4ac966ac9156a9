pub mod approval;
pub mod deliverable;
pub mod digest;
pub mod opportunity;
