pub mod aggregate;

pub use aggregate::{Incident, IncidentDto, IncidentId};
