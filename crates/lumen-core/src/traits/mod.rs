pub mod prediction_api;

pub use prediction_api::PredictionApi;
