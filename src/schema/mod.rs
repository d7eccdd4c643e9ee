pub mod auth;
pub mod budget;
pub mod common;
pub mod dashboard;
pub mod destination;
pub mod guest;
pub mod inquiry;
pub mod profile;
pub mod review;
pub mod shortlist;
pub mod task;
pub mod vendor;
pub mod venue;
pub mod wedding;
