// HTTP handlers

pub mod members;
