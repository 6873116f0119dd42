pub mod cli_args;
pub mod loading;
pub mod logging;
