pub mod air_quality_api;
