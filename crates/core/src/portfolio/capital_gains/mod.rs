mod capital_gains_service;


pub use capital_gains_service::{CapitalGainsService, CapitalGainsServiceTrait};
