pub mod bisulfite;
pub mod cli;
pub mod commands;
pub mod design;
pub mod oracle;
pub mod utils;
pub mod writers;
