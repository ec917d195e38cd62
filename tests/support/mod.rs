#![allow(dead_code)]

pub mod postgres_container;
pub mod redis_container;
