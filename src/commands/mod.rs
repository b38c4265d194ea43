pub mod simulate_command;

pub use self::simulate_command::*;
