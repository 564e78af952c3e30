pub mod activity_filter;
pub mod catalog;
pub mod catalog_service;
pub mod day_allocator;
pub mod interest_classifier;
pub mod itinerary_generation_service;
pub mod itinerary_service;
pub mod time_slot;
