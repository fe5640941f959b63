pub mod generator;
pub mod handlers;
pub mod hasher;
pub mod periods;
pub mod store;
pub mod submission;
pub mod work_order;
