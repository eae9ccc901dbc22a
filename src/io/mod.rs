// Purpose - platform audio output

pub mod output;

pub use output::{ContextState, OutputContext, OutputError};
