//! JSON configuration for the command line tools.

pub mod fit;
