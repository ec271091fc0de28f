pub mod aggregate;

pub use aggregate::{Certification, CertificationDto, CertificationId};
