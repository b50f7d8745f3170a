// Tuning constants shared by the clock and the generators.
//
// The per-frame increments below were tuned against a 60 Hz display; under
// `TimeStep::Measured` they are scaled by `delta / REFERENCE_FRAME_SECS`.

// Frame timing
pub const REFERENCE_FRAME_SECS: f32 = 1.0 / 60.0;
pub const MAX_FRAME_DELTA_SECS: f32 = 0.1; // clamp after a backgrounded tab resumes

// Particle field
pub const PARTICLE_HOVER_RADIUS: f32 = 100.0; // surface px
pub const PARTICLE_HOVER_PULL: f32 = 0.01; // fraction of the pointer vector per frame
pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
pub const PARTICLE_MAX_SPIN: f32 = 0.01; // radians per frame, either direction
pub const PARTICLE_ALPHA_MIN: f32 = 0.3;
pub const PARTICLE_ALPHA_SPAN: f32 = 0.5;
pub const PARTICLE_BASE_SIZE_UNIT: f32 = 100.0; // baseSize at which radii are unscaled
pub const MAX_PARTICLE_COUNT: usize = 10_000;

// Ripple grid
pub const RIPPLE_TIME_PER_FRAME: f32 = 0.016;
pub const RIPPLE_WAVE_SPEED: f32 = 50.0;
pub const RIPPLE_WAVE_NUMBER: f32 = 0.1;
pub const RIPPLE_AMBIENT_FREQ: f32 = 0.05;
pub const RIPPLE_AMPLITUDE_SCALE: f32 = 100.0;
pub const RIPPLE_REACH_SCALE: f32 = 10.0; // reach = cell * radius multiplier * this
pub const RIPPLE_THICKNESS_DIVISOR: f32 = 10.0;
pub const RAINBOW_HUE_SPEED: f32 = 50.0;
pub const RAINBOW_SATURATION: f32 = 0.70;
pub const RAINBOW_LIGHTNESS: f32 = 0.60;

// Gradient blinds
pub const BLIND_BASE_ALPHA: f32 = 0.3;
pub const BLIND_PROXIMITY_ALPHA: f32 = 0.7;
pub const BLIND_NOISE_SCALE: f32 = 20.0;
pub const MAX_BLIND_COUNT: u32 = 1_024;
pub const SPOTLIGHT_CORE_ALPHA: f32 = 0.3;

// Wireframe
pub const WIREFRAME_ROTATION_PER_FRAME: f32 = 0.005;
pub const WIREFRAME_SIZE: f32 = 200.0;
pub const WIREFRAME_DEPTH_OFFSET: f32 = 50.0;
pub const WIREFRAME_LINE_WIDTH: f32 = 2.0;
pub const WIREFRAME_COLOR: [u8; 3] = [138, 43, 226];
pub const WIREFRAME_LAYER_OPACITY: f32 = 0.5;
