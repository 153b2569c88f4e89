//! Core interfaces and types shared by every layer.

pub mod content;
pub mod controller;
pub mod geometry;
pub mod input_event;
pub mod output;
pub mod services;
pub mod style;
pub mod terminal;
pub mod text;
