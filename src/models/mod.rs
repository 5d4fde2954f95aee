pub mod class;
pub mod class_client;
pub mod client;
pub mod company;
pub mod consult;
pub mod partner;
pub mod service;
