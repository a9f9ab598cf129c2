pub mod itinerary;
pub mod structured;

pub use itinerary::{DayPlan, Period, PlanItem, TravelPlan, TripDetails};
pub use structured::{Scalar, StructuredPlan};
