//! Use-Cases der Application-Layer-Orchestrierung.

pub mod camera;
pub mod file_io;
pub mod viewport;
