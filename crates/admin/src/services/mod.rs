//! Business logic services for the admin console.

pub mod recovery;
