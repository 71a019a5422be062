//! Data model shared by the analysis pipeline.
//!
//! # Design Principles
//!
//! 1. **Typed coordinate spaces**: bounding boxes carry a marker type so that
//!    pixel and normalized boxes cannot be mixed up.
//!
//! 2. **Permissive input**: a [`Detection`] can hold anything the detector
//!    emitted (unknown class names, inverted boxes). Problems are reported by
//!    [`validation`](crate::validation) instead of failing deserialization.
//!
//! 3. **Invariants by construction**: [`BodyPartState`] stores the tail
//!    position and angle as a single [`TailPose`].
//!
//! # Example
//!
//! ```
//! use catmood::model::{BodyPart, Detection};
//!
//! let eye = Detection::of(BodyPart::Eye, 0.9, 10.0, 10.0, 50.0, 50.0);
//! assert_eq!(eye.part(), Ok(BodyPart::Eye));
//! assert_eq!(eye.bbox.area(), 1600.0);
//! ```

mod bbox;
mod coord;
mod detection;
pub mod io_json;
mod space;
mod state;

pub use bbox::BBoxXYXY;
pub use coord::Coord;
pub use detection::{BodyPart, Detection, UnknownBodyPart};
pub use space::{Normalized, Pixel};
pub use state::{BodyPartState, EyeState, MouthState, TailPose, TailPosition};
