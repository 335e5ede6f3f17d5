//! Tone synthesis for the buzzer
//!
//! Sounds are described declaratively as [`ToneStep`]s, expanded into a flat list of
//! [`Sound`]s, then played against a [`Clock`]. Expanding first means a bad step is caught
//! before anything is heard.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Internal
use super::TonePlayer;
use crate::clock::Clock;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Note frequencies in Hz.
pub mod note {
    pub const E5: f64 = 659.26;
    pub const A5: f64 = 880.0;
    pub const B5: f64 = 987.77;
    pub const C6: f64 = 1046.5;
    pub const D6: f64 = 1174.66;
    pub const E6: f64 = 1318.51;
    pub const G6: f64 = 1567.98;
    pub const A6: f64 = 1760.0;
    pub const D7: f64 = 2349.32;
}

/// Shortest silence after a tone.
pub const MIN_SILENCE_MS: u64 = 1;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A declarative sound instruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ToneStep {
    /// A single tone followed by a silence.
    Tone {
        freq_hz: f64,
        duration_ms: u64,
        silence_ms: u64,
    },

    /// A glide from one frequency to another, each intermediate tone `ratio` times the last.
    Bend {
        from_hz: f64,
        to_hz: f64,
        ratio: f64,
        duration_ms: u64,
        silence_ms: u64,
    },

    /// The same tone repeated `times` times.
    Repeat {
        freq_hz: f64,
        duration_ms: u64,
        silence_ms: u64,
        times: usize,
    },

    /// Silence.
    Pause(u64),
}

/// One expanded sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sound {
    Tone { freq_hz: f64, duration_ms: u64 },
    Rest(u64),
}

/// The built-in songs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Song {
    Connection,
    Disconnection,
    ButtonPushed,
    Mode1,
    Mode2,
    Mode3,
    Surprise,
    OhOoh,
    OhOoh2,
    Cuddly,
    Sleeping,
    Happy,
    SuperHappy,
    HappyShort,
    Sad,
    Confused,
    Fart1,
    Fart2,
    Fart3,
}

#[derive(Debug, Error)]
pub enum ToneError {
    #[error("Bend ratio must be greater than 1, got {0}")]
    InvalidRatio(f64),

    #[error("Frequency must be finite and between 0 and {max} Hz, got {0}", max = u32::MAX)]
    InvalidFrequency(f64),

    #[error("Unknown song \"{0}\"")]
    UnknownSong(String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ToneStep {

    pub fn tone(freq_hz: f64, duration_ms: u64, silence_ms: u64) -> Self {
        ToneStep::Tone { freq_hz, duration_ms, silence_ms }
    }

    pub fn bend(from_hz: f64, to_hz: f64, ratio: f64, duration_ms: u64, silence_ms: u64) -> Self {
        ToneStep::Bend { from_hz, to_hz, ratio, duration_ms, silence_ms }
    }

    /// Expand into individual sounds, appending to `out`.
    pub fn expand_into(&self, out: &mut Vec<Sound>) -> Result<(), ToneError> {
        match *self {
            ToneStep::Tone { freq_hz, duration_ms, silence_ms } => {
                check_freq(freq_hz)?;
                push_tone(out, freq_hz, duration_ms, silence_ms);
            }
            ToneStep::Bend { from_hz, to_hz, ratio, duration_ms, silence_ms } => {
                for freq in bend_frequencies(from_hz, to_hz, ratio)? {
                    push_tone(out, freq as f64, duration_ms, silence_ms);
                }
            }
            ToneStep::Repeat { freq_hz, duration_ms, silence_ms, times } => {
                check_freq(freq_hz)?;
                for _ in 0..times {
                    push_tone(out, freq_hz, duration_ms, silence_ms);
                }
            }
            ToneStep::Pause(ms) => out.push(Sound::Rest(ms)),
        }

        Ok(())
    }
}

impl Sound {
    pub fn duration_ms(&self) -> u64 {
        match *self {
            Sound::Tone { duration_ms, .. } => duration_ms,
            Sound::Rest(ms) => ms,
        }
    }
}

impl Song {
    pub const ALL: [Song; 19] = [
        Song::Connection,
        Song::Disconnection,
        Song::ButtonPushed,
        Song::Mode1,
        Song::Mode2,
        Song::Mode3,
        Song::Surprise,
        Song::OhOoh,
        Song::OhOoh2,
        Song::Cuddly,
        Song::Sleeping,
        Song::Happy,
        Song::SuperHappy,
        Song::HappyShort,
        Song::Sad,
        Song::Confused,
        Song::Fart1,
        Song::Fart2,
        Song::Fart3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Song::Connection => "connection",
            Song::Disconnection => "disconnection",
            Song::ButtonPushed => "button-pushed",
            Song::Mode1 => "mode1",
            Song::Mode2 => "mode2",
            Song::Mode3 => "mode3",
            Song::Surprise => "surprise",
            Song::OhOoh => "oh-ooh",
            Song::OhOoh2 => "oh-ooh2",
            Song::Cuddly => "cuddly",
            Song::Sleeping => "sleeping",
            Song::Happy => "happy",
            Song::SuperHappy => "super-happy",
            Song::HappyShort => "happy-short",
            Song::Sad => "sad",
            Song::Confused => "confused",
            Song::Fart1 => "fart1",
            Song::Fart2 => "fart2",
            Song::Fart3 => "fart3",
        }
    }

    pub fn steps(self) -> Vec<ToneStep> {
        use self::note::*;
        use self::ToneStep as S;

        match self {
            Song::Connection => vec![
                S::tone(E5, 50, 30),
                S::tone(E6, 55, 25),
                S::tone(A6, 60, 10),
            ],
            Song::Disconnection => vec![
                S::tone(E5, 50, 30),
                S::tone(A6, 55, 25),
                S::tone(E6, 50, 10),
            ],
            Song::ButtonPushed => vec![
                S::bend(E6, G6, 1.03, 20, 2),
                S::Pause(30),
                S::bend(E6, D7, 1.04, 10, 2),
            ],
            Song::Mode1 => vec![S::bend(E6, A6, 1.02, 30, 10)],
            Song::Mode2 => vec![S::bend(G6, D7, 1.03, 30, 10)],
            Song::Mode3 => vec![
                S::tone(E6, 50, 100),
                S::tone(G6, 50, 80),
                S::tone(D7, 300, 0),
            ],
            Song::Surprise => vec![
                S::bend(800.0, 2150.0, 1.02, 10, 1),
                S::bend(2149.0, 800.0, 1.03, 7, 1),
            ],
            Song::OhOoh => vec![
                S::bend(880.0, 2000.0, 1.04, 8, 3),
                S::Pause(200),
                S::Repeat {
                    freq_hz: B5,
                    duration_ms: 5,
                    silence_ms: 10,
                    times: glide_len(880.0, 2000.0, 1.04),
                },
            ],
            Song::OhOoh2 => vec![
                S::bend(1880.0, 3000.0, 1.03, 8, 3),
                S::Pause(200),
                S::Repeat {
                    freq_hz: C6,
                    duration_ms: 10,
                    silence_ms: 10,
                    times: glide_len(1880.0, 3000.0, 1.03),
                },
            ],
            Song::Cuddly => vec![
                S::bend(700.0, 900.0, 1.03, 16, 4),
                S::bend(899.0, 650.0, 1.01, 18, 7),
            ],
            Song::Sleeping => vec![
                S::bend(100.0, 500.0, 1.04, 10, 10),
                S::Pause(500),
                S::bend(400.0, 100.0, 1.04, 10, 1),
            ],
            Song::Happy => vec![
                S::bend(1500.0, 2500.0, 1.05, 20, 8),
                S::bend(2499.0, 1500.0, 1.05, 25, 8),
            ],
            Song::SuperHappy => vec![
                S::bend(2000.0, 6000.0, 1.05, 8, 3),
                S::Pause(50),
                S::bend(5999.0, 2000.0, 1.05, 13, 2),
            ],
            Song::HappyShort => vec![
                S::bend(1500.0, 2000.0, 1.05, 15, 8),
                S::Pause(100),
                S::bend(1900.0, 2500.0, 1.05, 10, 8),
            ],
            Song::Sad => vec![S::bend(880.0, 669.0, 1.02, 20, 200)],
            Song::Confused => vec![
                S::bend(1000.0, 1700.0, 1.03, 8, 2),
                S::bend(1699.0, 500.0, 1.04, 8, 3),
                S::bend(1000.0, 1700.0, 1.05, 9, 10),
            ],
            Song::Fart1 => vec![S::bend(1600.0, 3000.0, 1.02, 2, 15)],
            Song::Fart2 => vec![S::bend(2000.0, 6000.0, 1.02, 2, 20)],
            Song::Fart3 => vec![
                S::bend(1600.0, 4000.0, 1.02, 2, 20),
                S::bend(4000.0, 3000.0, 1.02, 2, 20),
            ],
        }
    }
}

impl FromStr for Song {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Song::ALL
            .iter()
            .find(|song| song.name() == s)
            .copied()
            .ok_or_else(|| ToneError::UnknownSong(s.into()))
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Frequencies of a glide from `from_hz` towards `to_hz`.
///
/// Frequencies are whole Hz, truncated at every step, so the sequence starts at the truncated
/// start frequency and stops before reaching or passing `to_hz`. Rising glides always advance by
/// at least 1 Hz.
pub fn bend_frequencies(from_hz: f64, to_hz: f64, ratio: f64) -> Result<Vec<u32>, ToneError> {
    // Written this way round so a NaN ratio is rejected too
    if !(ratio > 1.0) {
        return Err(ToneError::InvalidRatio(ratio))
    }
    check_freq(from_hz)?;
    check_freq(to_hz)?;

    let mut freqs = Vec::new();
    let mut f = from_hz as u32;

    if from_hz < to_hz {
        while (f as f64) < to_hz {
            freqs.push(f);
            f = ((f as f64 * ratio) as u32).max(f + 1);
        }
    }
    else {
        while (f as f64) > to_hz {
            freqs.push(f);
            f = (f as f64 / ratio) as u32;
        }
    }

    Ok(freqs)
}

/// Expand a list of steps into sounds.
pub fn expand(steps: &[ToneStep]) -> Result<Vec<Sound>, ToneError> {
    let mut sounds = Vec::new();
    for step in steps.iter() {
        step.expand_into(&mut sounds)?;
    }
    Ok(sounds)
}

/// Play sounds in order, blocking until the last one has finished.
pub fn play<T: TonePlayer, C: Clock>(player: &mut T, clock: &mut C, sounds: &[Sound]) {
    for sound in sounds.iter() {
        match *sound {
            Sound::Tone { freq_hz, duration_ms } => {
                trace!("Tone {:.0} Hz for {} ms", freq_hz, duration_ms);
                player.tone_on(freq_hz);
                clock.sleep_ms(duration_ms);
                player.tone_off();
            }
            Sound::Rest(ms) => clock.sleep_ms(ms),
        }
    }
}

fn push_tone(out: &mut Vec<Sound>, freq_hz: f64, duration_ms: u64, silence_ms: u64) {
    out.push(Sound::Tone { freq_hz, duration_ms });
    out.push(Sound::Rest(silence_ms.max(MIN_SILENCE_MS)));
}

/// Frequencies must fit the whole-Hz steps of a glide.
fn check_freq(freq_hz: f64) -> Result<(), ToneError> {
    if freq_hz.is_finite() && freq_hz >= 0.0 && freq_hz <= u32::MAX as f64 {
        Ok(())
    }
    else {
        Err(ToneError::InvalidFrequency(freq_hz))
    }
}

/// Number of steps in a glide with constant, known-good arguments.
fn glide_len(from_hz: f64, to_hz: f64, ratio: f64) -> usize {
    bend_frequencies(from_hz, to_hz, ratio)
        .map(|f| f.len())
        .unwrap_or(0)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::{SimBuzzer, SimClock, ToneRecord};

    #[test]
    fn test_bend_rising() {
        assert_eq!(
            bend_frequencies(100.0, 200.0, 1.04).unwrap(),
            vec![
                100, 104, 108, 112, 116, 120, 124, 128, 133, 138,
                143, 148, 153, 159, 165, 171, 177, 184, 191, 198
            ]
        );
    }

    #[test]
    fn test_bend_falling() {
        assert_eq!(
            bend_frequencies(880.0, 669.0, 1.02).unwrap(),
            vec![880, 862, 845, 828, 811, 795, 779, 763, 748, 733, 718, 703, 689, 675]
        );
    }

    #[test]
    fn test_bend_small_ratio_still_rises() {
        let freqs = bend_frequencies(10.0, 20.0, 1.001).unwrap();
        assert_eq!(freqs, (10..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_bend_rejects_frequency_beyond_whole_hz() {
        assert!(matches!(
            bend_frequencies(100.0, 1e10, 2.0),
            Err(ToneError::InvalidFrequency(_))
        ));
        assert!(matches!(
            expand(&[ToneStep::tone(f64::INFINITY, 10, 0)]),
            Err(ToneError::InvalidFrequency(_))
        ));

        // Glides right up to the top of the range still finish
        let top = u32::MAX as f64;
        let freqs = bend_frequencies(top - 3.0, top, 1.000_000_000_1).unwrap();
        assert_eq!(freqs, vec![u32::MAX - 3, u32::MAX - 2, u32::MAX - 1]);
    }

    #[test]
    fn test_bend_bad_ratio() {
        assert!(matches!(bend_frequencies(100.0, 200.0, 1.0), Err(ToneError::InvalidRatio(_))));
        assert!(matches!(bend_frequencies(200.0, 100.0, 0.9), Err(ToneError::InvalidRatio(_))));
        assert!(matches!(
            bend_frequencies(200.0, 100.0, std::f64::NAN),
            Err(ToneError::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_zero_silence_becomes_one_ms() {
        let sounds = expand(&[ToneStep::tone(note::D7, 300, 0)]).unwrap();
        assert_eq!(
            sounds,
            vec![Sound::Tone { freq_hz: note::D7, duration_ms: 300 }, Sound::Rest(1)]
        );
    }

    #[test]
    fn test_all_songs_expand() {
        for song in Song::ALL.iter() {
            let sounds = expand(&song.steps()).unwrap();
            assert!(!sounds.is_empty(), "{:?} is silent", song);
            assert_eq!(song.name().parse::<Song>().unwrap(), *song);
        }
    }

    #[test]
    fn test_oh_ooh_repeats_match_glide() {
        let steps = Song::OhOoh.steps();
        match steps[2] {
            ToneStep::Repeat { times, .. } => assert_eq!(times, 22),
            _ => panic!("Expected a repeat"),
        }
    }

    #[test]
    fn test_play_connection() {
        let mut clock = SimClock::new();
        let mut buzzer = SimBuzzer::new(clock.clone());

        let sounds = expand(&Song::Connection.steps()).unwrap();
        play(&mut buzzer, &mut clock, &sounds);

        assert_eq!(clock.now_ms(), 50 + 30 + 55 + 25 + 60 + 10);
        assert_eq!(
            buzzer.tones(),
            &[
                ToneRecord { start_ms: 0, freq_hz: note::E5, duration_ms: 50 },
                ToneRecord { start_ms: 80, freq_hz: note::E6, duration_ms: 55 },
                ToneRecord { start_ms: 160, freq_hz: note::A6, duration_ms: 60 },
            ]
        );
    }
}
