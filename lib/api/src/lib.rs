//! JSON HTTP surface over a shared [`foodans_recommend::Engine`]

pub mod rest;

pub use rest::RestApi;
