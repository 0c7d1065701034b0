//! Public library API for filling tagged struct fields from named sources.

/// Field inspection, value coercion, and source orchestration.
pub mod fill;
