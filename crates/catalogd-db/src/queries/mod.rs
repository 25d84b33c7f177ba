//! Query modules, one per entity.

pub mod items;
