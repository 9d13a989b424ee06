//! Multi-step operations that sit between handlers and repositories.

pub mod case_number;
