/// Schema-driven fill command.
pub mod fill;
/// Descriptor table inspection command.
pub mod inspect;

pub(crate) mod util;
