pub mod gcal;
pub use gcal::GcalClient;
