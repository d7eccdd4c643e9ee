pub mod budget_item;
pub mod destination;
pub mod guest;
pub mod inquiry;
pub mod profile;
pub mod review;
pub mod shortlist;
pub mod task;
pub mod venue;
pub mod wedding;
