//! Procedural creature kinematics for games and generative art.
//!
//! `wriggle` animates articulated creatures that chase a target point: a tree of
//! angle-constrained segments, limb chains dragged toward targets with a
//! length-preserving IK pass, and legs that plant and step on a desynchronized
//! gait, feeding back into how fast the body can accelerate.
//!
//! # Features
//!
//! - **Segment trees**: Index arena of rigid links with rest angles, ranges and stiffness
//! - **Limb IK**: Single-pass backward chain solve with exact link lengths
//! - **Gait**: Planted/stepping legs with arcing steps and phase-offset triggers
//! - **Locomotion**: Forward and rotational integrators gated by grounded legs
//! - **Organic motion**: Breathing sway and micro-tremor from a drifting ambient field
//! - **Deterministic**: All randomness is injected; seed it and runs repeat exactly
//! - **Observable**: Watch frame phases and gait transitions via the `FrameObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod rng;
pub mod noise;
pub mod frame;
pub mod segment;
pub mod gait;
pub mod limb;
pub mod creature;
pub mod simulation;
pub mod body_plan;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::{Float, wrap_angle, wrap_near};
pub use vec::Vec2;
pub use rng::{SimRng, DefaultRng, seeded};
pub use noise::AmbientField;
pub use frame::Frame;
pub use segment::{Segment, SegmentId, Parent, Joint, Skeleton};
pub use gait::{Gait, GaitState, GaitEvent};
pub use limb::{Limb, LimbId};
pub use creature::Creature;
pub use simulation::Simulation;
pub use body_plan::BodyPlan;
pub use config::{SegmentDef, LimbConfig, GaitConfig, LocomotionConfig};
pub use observer::{FrameObserver, NoOpFrameObserver};
pub use error::RigError;
