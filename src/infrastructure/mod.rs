// Infrastructure layer module
// Database adapters implementing the domain repository contracts

pub mod repositories;
