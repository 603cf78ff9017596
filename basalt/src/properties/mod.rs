//! Physical properties of relational operators.
//!
//! Currently the only property is data distribution, described by [`DistributionSpec`]. The
//! enforcement phase asks whether what a plan delivers satisfies what its parent requires, and
//! inserts an exchange when it doesn't.

mod distribution;
pub use distribution::*;
mod hash_distribution;
pub use hash_distribution::*;
mod property_info;
pub use property_info::*;

use std::fmt::Debug;
use std::hash::Hash;

pub trait PhysicalProp: Debug + Hash {
    /// Tests whether self satisfies the requirement `other`.
    fn satisfies(&self, other: &Self) -> bool;
}
