pub mod aggregate;

pub use aggregate::{FleetVehicle, FleetVehicleDto, FleetVehicleId};
