pub mod auth;
#[cfg(test)]
mod auth_test;
pub mod budget;
#[cfg(test)]
mod budget_test;
pub mod dashboard;
#[cfg(test)]
mod dashboard_test;
pub mod destination;
pub mod guest;
#[cfg(test)]
mod guest_test;
pub mod inquiry;
pub mod profile;
pub mod review;
pub mod shortlist;
#[cfg(test)]
mod shortlist_test;
pub mod task;
#[cfg(test)]
mod task_test;
pub mod vendor;
#[cfg(test)]
mod vendor_test;
pub mod venue;
pub mod wedding;
#[cfg(test)]
mod wedding_test;
