//! Business logic orchestration between the Discord event layer and the data layer.

pub mod confession;
