pub mod activity;
pub mod city;
pub mod itinerary;
pub mod pagination;
