use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point scale shared by [`Chance`] and [`Multiplier`]: 1.0 == 10_000
pub const BASIS_POINTS: u32 = 10_000;

/// Weapon categories, used for archetype match-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    #[default]
    Normal,
    Sharp,
    Heavy,
    Gun,
}

impl WeaponType {
    /// Get all weapon type variants
    pub fn all() -> &'static [WeaponType] {
        &[
            WeaponType::Normal,
            WeaponType::Sharp,
            WeaponType::Heavy,
            WeaponType::Gun,
        ]
    }
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponType::Normal => write!(f, "normal"),
            WeaponType::Sharp => write!(f, "sharp"),
            WeaponType::Heavy => write!(f, "heavy"),
            WeaponType::Gun => write!(f, "gun"),
        }
    }
}

/// A probability in `[0, 1]`, stored in basis points.
///
/// Equipment adds and removes chances repeatedly over a run, so they are kept
/// as integers to make every add/remove pair exact. Serialized as a plain
/// float (`crit_chance = 0.15`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "f64", into = "f64")]
pub struct Chance(u32);

impl Chance {
    pub const ZERO: Chance = Chance(0);
    pub const CERTAIN: Chance = Chance(BASIS_POINTS);

    /// Build from a fraction, clamping into `[0, 1]` (NaN becomes zero)
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Chance::ZERO;
        }
        Chance((value.clamp(0.0, 1.0) * BASIS_POINTS as f64).round() as u32)
    }

    pub const fn from_basis_points(points: u32) -> Self {
        if points > BASIS_POINTS {
            Chance(BASIS_POINTS)
        } else {
            Chance(points)
        }
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f64 {
        self.0 as f64 / BASIS_POINTS as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Add, saturating at certainty
    pub fn saturating_add(self, other: Chance) -> Chance {
        Chance::from_basis_points(self.0.saturating_add(other.0))
    }

    /// Subtract, saturating at zero
    pub fn saturating_sub(self, other: Chance) -> Chance {
        Chance(self.0.saturating_sub(other.0))
    }

    /// Roll once: succeeds when a uniform draw from `[0, 1)` falls below this chance.
    ///
    /// A zero chance never consumes randomness.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        if self.0 == 0 {
            return false;
        }
        rng.gen::<f64>() < self.value()
    }
}

impl From<f64> for Chance {
    fn from(value: f64) -> Self {
        Chance::new(value)
    }
}

impl From<Chance> for f64 {
    fn from(chance: Chance) -> Self {
        chance.value()
    }
}

impl fmt::Display for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let hundredths = self.0 % 100;
        if hundredths == 0 {
            write!(f, "{}%", whole)
        } else {
            write!(f, "{}.{:02}%", whole, hundredths)
        }
    }
}

/// A non-negative scale factor, stored in basis points (`1.5` == 15_000).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "f64", into = "f64")]
pub struct Multiplier(u32);

impl Multiplier {
    pub const ZERO: Multiplier = Multiplier(0);
    pub const ONE: Multiplier = Multiplier(BASIS_POINTS);

    /// Build from a factor; negative and NaN factors become zero
    pub fn new(value: f64) -> Self {
        if value.is_nan() || value <= 0.0 {
            return Multiplier::ZERO;
        }
        Multiplier((value * BASIS_POINTS as f64).round().min(u32::MAX as f64) as u32)
    }

    pub const fn from_basis_points(points: u32) -> Self {
        Multiplier(points)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f64 {
        self.0 as f64 / BASIS_POINTS as f64
    }

    pub fn saturating_add(self, other: Multiplier) -> Multiplier {
        Multiplier(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Multiplier) -> Multiplier {
        Multiplier(self.0.saturating_sub(other.0))
    }

    /// Scale `amount`, rounding half up
    pub fn apply(self, amount: u32) -> u32 {
        let half = u64::from(BASIS_POINTS / 2);
        let scaled = (u64::from(amount) * u64::from(self.0) + half) / u64::from(BASIS_POINTS);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }

    /// Scale `amount`, rounding down
    pub fn apply_floor(self, amount: u32) -> u32 {
        let scaled = u64::from(amount) * u64::from(self.0) / u64::from(BASIS_POINTS);
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }

    /// Whether `value` is strictly below this fraction of `whole`
    pub fn is_below(self, value: u32, whole: u32) -> bool {
        u64::from(value) * u64::from(BASIS_POINTS) < u64::from(whole) * u64::from(self.0)
    }

    /// Whether `value` is at or below this fraction of `whole`
    pub fn is_at_or_below(self, value: u32, whole: u32) -> bool {
        u64::from(value) * u64::from(BASIS_POINTS) <= u64::from(whole) * u64::from(self.0)
    }
}

impl From<f64> for Multiplier {
    fn from(value: f64) -> Self {
        Multiplier::new(value)
    }
}

impl From<Multiplier> for f64 {
    fn from(multiplier: Multiplier) -> Self {
        multiplier.value()
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_chance_clamps() {
        assert_eq!(Chance::new(1.7), Chance::CERTAIN);
        assert_eq!(Chance::new(-0.3), Chance::ZERO);
        assert_eq!(Chance::new(f64::NAN), Chance::ZERO);
        assert_eq!(Chance::new(0.15).basis_points(), 1_500);
        assert_eq!(Chance::from_basis_points(12_000), Chance::CERTAIN);
    }

    #[test]
    fn test_chance_add_sub_is_exact() {
        let base = Chance::new(0.10);
        let bonus = Chance::new(0.05);
        let boosted = base.saturating_add(bonus);
        assert_eq!(boosted.basis_points(), 1_500);
        assert_eq!(boosted.saturating_sub(bonus), base);
        assert_eq!(Chance::new(0.03).saturating_sub(bonus), Chance::ZERO);
        assert_eq!(Chance::new(0.98).saturating_add(bonus), Chance::CERTAIN);
    }

    #[test]
    fn test_chance_roll_extremes() {
        // StepRng(0, 0) yields 0.0 for every f64 draw; u64::MAX yields the largest draw below 1.0
        let mut low = StepRng::new(0, 0);
        let mut high = StepRng::new(u64::MAX, 0);

        assert!(Chance::new(0.01).roll(&mut low));
        assert!(!Chance::ZERO.roll(&mut low));
        assert!(!Chance::new(0.99).roll(&mut high));
        assert!(Chance::CERTAIN.roll(&mut high));
    }

    #[test]
    fn test_chance_display() {
        assert_eq!(Chance::new(0.15).to_string(), "15%");
        assert_eq!(Chance::new(0.125).to_string(), "12.50%");
        assert_eq!(Chance::ZERO.to_string(), "0%");
    }

    #[test]
    fn test_multiplier_apply_rounds_half_up() {
        let half = Multiplier::new(0.5);
        assert_eq!(half.apply(25), 13);
        assert_eq!(half.apply(24), 12);
        assert_eq!(Multiplier::new(1.5).apply(25), 38);
        assert_eq!(Multiplier::new(1.75).apply(30), 53);
        assert_eq!(Multiplier::new(0.3).apply_floor(125), 37);
        assert_eq!(Multiplier::ONE.apply(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_multiplier_thresholds() {
        let half = Multiplier::new(0.5);
        assert!(half.is_below(49, 100));
        assert!(!half.is_below(50, 100));
        assert!(half.is_at_or_below(50, 100));
        assert!(!half.is_at_or_below(51, 100));
    }

    #[test]
    fn test_serde_as_float() {
        #[derive(Debug, Deserialize, Serialize, PartialEq)]
        struct Row {
            crit_chance: Chance,
            crit_damage: Multiplier,
        }

        let row: Row = toml::from_str("crit_chance = 0.3\ncrit_damage = 2.0").unwrap();
        assert_eq!(row.crit_chance.basis_points(), 3_000);
        assert_eq!(row.crit_damage, Multiplier::new(2.0));

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"crit_chance":0.3,"crit_damage":2.0}"#);
    }
}
