//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned box collider and the overlap test
//! - [`car`] – player and traffic cars, lanes and vehicle kinds
//! - [`mapposition`] – world-space position (centre) of an entity
//! - [`menu`] – title screen menu
//! - [`particle`] – short-lived cosmetic particles and score popups
//! - [`powerup`] – nitro and shield pickups
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`sprite`] – which image to draw and at what size
//! - [`ttl`] – time to live for transient entities
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod boxcollider;
pub mod car;
pub mod mapposition;
pub mod menu;
pub mod particle;
pub mod powerup;
pub mod rigidbody;
pub mod sprite;
pub mod ttl;
pub mod zindex;
