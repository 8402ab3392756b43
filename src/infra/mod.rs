pub mod mapbox;
pub mod openaq;
