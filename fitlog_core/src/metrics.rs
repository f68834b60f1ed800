//! Derived-metric formulas: BMI, BMR and MET-based calorie estimates.

use crate::Gender;

/// Effective weight used for calorie estimates when no profile is saved
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Round to two decimal places (the precision stored on the profile)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Body Mass Index: weight over height squared, height in metres.
/// Rounded to two decimal places.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round2(weight_kg / (height_m * height_m))
}

/// Basal Metabolic Rate (Mifflin-St Jeor), rounded to two decimal places.
///
/// The male constant is +5; every other gender value uses -161.
pub fn bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let adjusted = match gender {
        Gender::M => base + 5.0,
        Gender::F => base - 161.0,
    };
    round2(adjusted)
}

/// MET-based calorie estimate for a workout of the given duration.
///
/// `calories = MET * 3.5 * weight_kg / 200 * duration_minutes`
pub fn calories_burned(met: f64, weight_kg: f64, duration_minutes: u32) -> f64 {
    met * 3.5 * weight_kg / 200.0 * f64::from(duration_minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_two_decimal_places() {
        // 60 kg at 165 cm
        assert_eq!(bmi(60.0, 165.0), 22.04);
        // 70 kg at 175 cm
        assert_eq!(bmi(70.0, 175.0), 22.86);
    }

    #[test]
    fn test_bmr_male_constant() {
        // 10*70 + 6.25*175 - 5*30 + 5 = 1648.75
        assert_eq!(bmr(Gender::M, 70.0, 175.0, 30), 1648.75);
    }

    #[test]
    fn test_bmr_female_constant() {
        // 10*60 + 6.25*165 - 5*25 - 161 = 1345.25
        assert_eq!(bmr(Gender::F, 60.0, 165.0, 25), 1345.25);
    }

    #[test]
    fn test_calorie_determinism_warm_up() {
        // MET 3.0, 60 kg, 5 minutes
        assert_eq!(round2(calories_burned(3.0, 60.0, 5)), 15.75);
    }

    #[test]
    fn test_calorie_default_weight_workout() {
        // MET 6.0, default 70 kg, 10 minutes
        assert_eq!(round2(calories_burned(6.0, DEFAULT_WEIGHT_KG, 10)), 73.5);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(22.038567), 22.04);
        assert_eq!(round2(15.754999), 15.75);
        assert_eq!(round2(73.5), 73.5);
    }
}
