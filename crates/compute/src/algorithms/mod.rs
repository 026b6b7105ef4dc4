pub mod covariance;
pub mod distance;
pub mod matrix;
pub mod reference;
