//! Camera and viewport engine for the interactive floor map.
//!
//! This crate owns how the floor map is viewed: the world/screen transform,
//! pan and pinch gestures, wheel zoom, the clamp that keeps the floor in
//! view, eased "focus on component" transitions, tap hit-testing, and the
//! single-slot redraw scheduler. Drawing itself stays with the host, which
//! reads the live [`camera::Camera`] each frame and carries out the
//! [`engine::Action`]s returned by every handler.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Command surface and owner of all viewport state ([`engine::EngineCore`]) |
//! | [`camera`] | Camera, viewport, and screen/world conversion |
//! | [`view`] | Camera + viewport + bounds bundle with the clamp |
//! | [`bounds`] | Floor extent and per-axis camera clamp |
//! | [`input`] | Pointer/wheel input types and the gesture state machine |
//! | [`animate`] | Eased, cancellable camera transitions |
//! | [`hit`] | Nearest-entity tap picking |
//! | [`schedule`] | Redraw coalescing (one frame per burst) |
//! | [`entity`] | Floor components and dataset parsing |
//! | [`search`] | Id search for search-driven navigation |
//! | [`config`] | Tunable limits, overridable from the environment |
//! | [`trace`] | Recorded input traces and headless replay |
//! | [`consts`] | Shared numeric defaults |
//! | `web` | `wasm-bindgen` browser binding (feature `web`) |

pub mod animate;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod entity;
pub mod hit;
pub mod input;
pub mod schedule;
pub mod search;
pub mod trace;
pub mod view;
#[cfg(feature = "web")]
pub mod web;
