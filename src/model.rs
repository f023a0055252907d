//! Baked-in model constants for the feature extractor and HMM decoder.
//!
//! Every table here is a trained constant carried over from the reference
//! detector; none of it is fitted or adjusted at runtime (see `config` for
//! the two knobs that *are* runtime-selectable).

/// Number of HMM states: Silence, Impulse, Tail, Noise.
pub const NUM_STATES: usize = 4;

/// Number of Goertzel feature bands: 350 Hz, 1300 Hz, 3500 Hz.
pub const NUM_FEATURES: usize = 3;

/// Frames per classification window (32 000 samples / 128 samples per frame).
pub const WINDOW_COUNT: usize = 250;

/// Samples per Goertzel frame.
pub const FRAME_LENGTH: usize = 128;

/// Samples per input buffer half (two halves make one 32 000-sample window).
pub const BUFFER_SIZE: usize = 16_000;

/// State index: silence / background.
pub const STATE_SILENCE: u8 = 0;
/// State index: impulse onset (the "gunshot" states are Impulse and Tail).
pub const STATE_IMPULSE: u8 = 1;
/// State index: decaying tail following an impulse.
pub const STATE_TAIL: u8 = 2;
/// State index: sustained non-impulsive noise.
pub const STATE_NOISE: u8 = 3;

/// Goertzel coefficients `2 * cos(2*pi*f/8000)` for 350 Hz, 1300 Hz, 3500 Hz.
pub const GOERTZEL_COEFFS: [f32; NUM_FEATURES] = [1.924911, 1.044997, -1.847759];

/// Hamming window divided by 2^14, one entry per sample position in a frame.
pub const SCALED_HAMMING_FACTORS: [f32; FRAME_LENGTH] = [
    1.7789363971e-05,
    1.6648398702e-05,
    1.55467270626e-05,
    1.44870030762e-05,
    1.34717797107e-05,
    1.25035027281e-05,
    1.15845047925e-05,
    1.07169998503e-05,
    9.90307779708e-06,
    9.14469944225e-06,
    8.4436917857e-06,
    7.80174361628e-06,
    7.22040144337e-06,
    6.70106577117e-06,
    6.24498772481e-06,
    5.85326603625e-06,
    5.52684439735e-06,
    5.26650918643e-06,
    5.07288757381e-06,
    4.94644601092e-06,
    4.88748910656e-06,
    4.89615889307e-06,
    4.97243448418e-06,
    5.11613212531e-06,
    5.32690563625e-06,
    5.60424724516e-06,
    5.94748881181e-06,
    6.3558034372e-06,
    6.82820745563e-06,
    7.36356280444e-06,
    7.96057976572e-06,
    8.61782007329e-06,
    9.33370037771e-06,
    1.01064960606e-05,
    1.09343453895e-05,
    1.18152540028e-05,
    1.27470997146e-05,
    1.37276376269e-05,
    1.47545055379e-05,
    1.5825229633e-05,
    1.6937230444e-05,
    1.80878290636e-05,
    1.92742535989e-05,
    2.04936458492e-05,
    2.17430681919e-05,
    2.30195106591e-05,
    2.4319898189e-05,
    2.56410980343e-05,
    2.69799273088e-05,
    2.83331606554e-05,
    2.96975380165e-05,
    3.10697724876e-05,
    3.24465582356e-05,
    3.3824578463e-05,
    3.52005133985e-05,
    3.65710482942e-05,
    3.79328814115e-05,
    3.92827319753e-05,
    4.06173480771e-05,
    4.19335145101e-05,
    4.32280605138e-05,
    4.44978674137e-05,
    4.57398761336e-05,
    4.69510945658e-05,
    4.8128604779e-05,
    4.9269570048e-05,
    5.03712416874e-05,
    5.14309656738e-05,
    5.24461890393e-05,
    5.34144660219e-05,
    5.43334639575e-05,
    5.52009688997e-05,
    5.60148909529e-05,
    5.67732693078e-05,
    5.74742769643e-05,
    5.81162251337e-05,
    5.86975673066e-05,
    5.92169029788e-05,
    5.96729810252e-05,
    6.00647027137e-05,
    6.03911243526e-05,
    6.06514595636e-05,
    6.08450811762e-05,
    6.09715227391e-05,
    6.10304796434e-05,
    6.10218098569e-05,
    6.09455342658e-05,
    6.08018366247e-05,
    6.05910631137e-05,
    6.03137215048e-05,
    5.99704799382e-05,
    5.95621653128e-05,
    5.90897612944e-05,
    5.85544059456e-05,
    5.79573889843e-05,
    5.73001486767e-05,
    5.65842683723e-05,
    5.58114726894e-05,
    5.49836233605e-05,
    5.41027147472e-05,
    5.31708690354e-05,
    5.21903311231e-05,
    5.11634632121e-05,
    5.0092739117e-05,
    4.8980738306e-05,
    4.78301396864e-05,
    4.66437151511e-05,
    4.54243229008e-05,
    4.41749005581e-05,
    4.28984580909e-05,
    4.1598070561e-05,
    4.02768707157e-05,
    3.89380414412e-05,
    3.75848080946e-05,
    3.62204307335e-05,
    3.48481962624e-05,
    3.34714105144e-05,
    3.2093390287e-05,
    3.07174553515e-05,
    2.93469204558e-05,
    2.79850873385e-05,
    2.66352367747e-05,
    2.53006206729e-05,
    2.39844542399e-05,
    2.26899082362e-05,
    2.14201013363e-05,
    2.01780926164e-05,
    1.89668741842e-05,
];

/// Log-space emission mean `mu[state][feature]`.
pub const EMISSION_MEAN: [[f32; NUM_FEATURES]; NUM_STATES] = [
    [-3.254631, -4.244978, -4.455339],
    [-0.314364, -0.511267, -1.409444],
    [-2.002476, -2.556155, -3.690385],
    [-3.109867, -3.689082, -3.476363],
];

/// `1 / variance[state][feature]` in log-space.
pub const ONE_OVER_EMISSION_VARIANCE: [[f32; NUM_FEATURES]; NUM_STATES] = [
    [2.607228, 1.108950, 1.083559],
    [0.227855, 0.218091, 0.140690],
    [0.534408, 0.632945, 0.722583],
    [1.886675, 1.096767, 0.771746],
];

/// `(2*pi)^(-1/2) * sigma^(-1)`, precomputed per state/feature.
pub const NORMALISATION_FACTORS: [[f32; NUM_FEATURES]; NUM_STATES] = [
    [0.644169, 0.420113, 0.415276],
    [0.190432, 0.186307, 0.149638],
    [0.291640, 0.317390, 0.339120],
    [0.547972, 0.417799, 0.350467],
];

/// Row-stochastic state transition matrix `P(to | from)`.
pub const TRANSITION_MATRIX: [[f32; NUM_STATES]; NUM_STATES] = [
    [0.98, 0.01, 0.00, 0.01],
    [0.00, 0.69, 0.31, 0.00],
    [0.07, 0.00, 0.92, 0.01],
    [0.01, 0.01, 0.00, 0.98],
];

/// Starting state distribution.
pub const INITIAL: [f32; NUM_STATES] = [0.86, 0.07, 0.00, 0.07];

/// Fraction of `max_emit` used as the emission floor.
pub const EMISSION_FLOOR_FRACTION: f32 = 0.05;

/// Default detection ceiling: 1.5 s of gunshot duration at 8000 Hz / 128 samples per frame.
pub const DEFAULT_DETECTION_MAX: usize = 93;

/// A gunshot-bearing state is Impulse or Tail.
#[inline]
pub fn is_gunshot_state(state: u8) -> bool {
    state == STATE_IMPULSE || state == STATE_TAIL
}
