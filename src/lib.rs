//! MindHarbor - Therapy Session Scheduling Core
//!
//! This crate implements the session/availability lifecycle for the
//! MindHarbor mental-health platform: published time slots, session
//! requests, professional approval, payment gating, and completion.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
