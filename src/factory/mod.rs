pub mod budget_item;
pub mod destination;
pub mod guest;
pub mod inquiry;
pub mod review;
pub mod task;
pub mod venue;
pub mod wedding;
