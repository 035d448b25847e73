// Tract-space ranges and interaction tuning constants shared by every driver.

/// Number of tract segments; tongue index lives in `[0, TRACT_LENGTH]`.
pub const TRACT_LENGTH: f32 = 44.0;

/// Maximum constriction diameter; tongue diameter lives in `[0, MAX_DIAMETER]`.
pub const MAX_DIAMETER: f32 = 4.0;

// Vowel anchor table scaling (legacy units: radius = openness * scale + offset)
pub const VOWEL_RADIUS_SCALE: f32 = 1.5;
pub const VOWEL_RADIUS_OFFSET: f32 = 2.0;

/// Softmax sharpness for distance-to-weight conversion.
pub const SOFTMAX_SHARPNESS: f32 = 20.0;

/// Below this anchor distance the tongue snaps to the blended vowel average.
pub const SNAP_DISTANCE_THRESHOLD: f32 = 0.1;

/// Contact-down within this anchor distance grabs the tongue instead of
/// opening a new constriction. Looser than the snap gate on purpose.
pub const TONGUE_CAPTURE_DISTANCE: f32 = 0.3;

// Gamepad
pub const STICK_DEADZONE: f32 = 0.11;
pub const STICK_VELOCITY_FACTOR: f32 = 0.01; // fraction of full range per poll per unit deflection
pub const GAMEPAD_UPDATE_INTERVAL_MS: f64 = 16.0; // ~60 Hz

// Draw-time wobble (never fed back into tract-space state)
pub const WOBBLE_AMPLITUDE: f32 = 0.03;
pub const WOBBLE_TIME_RATE: f32 = 50.0;
pub const WOBBLE_RADIUS_GAIN: f32 = 100.0;
