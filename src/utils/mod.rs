//! Vector operations shared by the hull, decomposition and strip pipelines.

pub use self::ccw_face_normal::{ccw_face_normal, normalize_or_zero};
pub use self::lexicographic::{lex_cmp, sorted_unique};
pub use self::scale::{homogeneous, plane_with_scaled_offset};
pub use self::weld::weld_points;

mod ccw_face_normal;
mod lexicographic;
mod scale;
mod weld;
