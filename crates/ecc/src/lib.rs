//! BN254 curve types and field conversions.
//!
//! Curve and field arithmetic come from arkworks; this crate fixes the type
//! names the rest of the workspace uses and provides the limb conversions
//! between the base field `Fq` and the native scalar field `Fr`.

pub mod curves;
pub mod fields;
