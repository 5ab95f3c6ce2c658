//! Combat resolution: crit, dodge and defense absorption

mod resolution;
mod result;

pub use resolution::{
    basic_attack, basic_attack_with_rng, strike_with_rng, take_damage, take_damage_with_rng,
};
pub use result::HitResult;
