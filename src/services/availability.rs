use chrono::{Datelike, NaiveDate};

// Linear-congruential generator parameters matching the mock booking
// backend. The modulus fits in 35 bits, so state * MULTIPLIER stays well
// below u64::MAX and the multiplication cannot overflow.
const MODULUS: u64 = (1 << 35) - 31;
const MULTIPLIER: u64 = 185_852;

// Restaurant service hours: slots are offered from 17:00 through 23:30.
pub const FIRST_HOUR: u32 = 17;
pub const LAST_HOUR: u32 = 23;

/// Seeded pseudo-random generator used to derive mock availability.
///
/// Each caller constructs its own generator, so interleaved availability
/// requests never share mutable generator state.
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Advance the generator and return the next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

/// Derive the available time slots from an already-seeded generator.
///
/// For each service hour, one draw decides the on-the-hour slot and a second
/// draw decides the half-hour slot, each with probability 0.5. The result is
/// ordered by time of day; an empty result is a valid outcome.
pub fn generate_slots(random: &mut SeededRandom) -> Vec<String> {
    let mut slots = Vec::new();

    for hour in FIRST_HOUR..=LAST_HOUR {
        if random.next_f64() < 0.5 {
            slots.push(format!("{}:00", hour));
        }
        if random.next_f64() < 0.5 {
            slots.push(format!("{}:30", hour));
        }
    }

    slots
}

/// Available slots for a date: deterministic, seeded by the day of month.
///
/// Two calls with the same date always yield the identical sequence. Past
/// dates are permitted here; rejecting them is a form-level concern.
pub fn slots_for_date(date: NaiveDate) -> Vec<String> {
    let mut random = SeededRandom::new(u64::from(date.day()));
    generate_slots(&mut random)
}
