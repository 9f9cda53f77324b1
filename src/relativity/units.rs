/// Kilograms per avoirdupois pound.
pub const KG_PER_LB: f64 = 0.45359237;

/// Pounds per kilogram, rounded the way the readouts display it.
pub const LBS_PER_KG: f64 = 2.20462;

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * KG_PER_LB
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}
