//! Parametric enclosure for the **Estonian Swearing Machine** (ESM), modelled
//! with a small, optionally multithreaded **Constructive Solid Geometry (CSG)**
//! kernel built on [BSP](mesh::bsp) trees.
//!
//! The case is a `width x height` rectangle extruded to `depth`, shelled
//! inward with its top left open, then cut with a speaker hole, a button
//! hole, a potentiometer hole and a row of vent slots through the floor.
//!
//! # Features
//! #### Default
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export and the `esm-case` binary
//!
//! #### Optional
//! - **parallel**: use rayon for multithreading
//!
//! # Example
//! ```
//! use esm_case::app::{Application, ConsoleUi, run};
//! use esm_case::case::CaseParams;
//!
//! let mut app = Application::new(ConsoleUi);
//! let report = run(&mut app, &CaseParams::default()).unwrap();
//! assert_eq!(report.name, "ESM_Case");
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod app;
pub mod case;
pub mod construction;
pub mod design;
pub mod errors;
pub mod features;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod sketch;
pub mod traits;
pub mod triangulated;

pub use case::{CaseParams, CaseReport, build_case};
pub use design::Design;
pub use mesh::Mesh;
pub use traits::CSGOps;
