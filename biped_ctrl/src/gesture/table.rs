//! Step lists for the built-in gestures.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::tone::{note, Song, ToneStep};
use super::{Animation, Gesture, GestureStep, Mouth};
use crate::gait_lib::{GaitCmd, Side};
use crate::pose::Pose;

use super::GestureStep as G;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn pose(angles: [i32; 6], duration_ms: u64) -> GestureStep {
    G::Move {
        pose: Pose::from_degrees(angles),
        duration_ms,
    }
}

fn bend(from_hz: f64, to_hz: f64, ratio: f64, duration_ms: u64, silence_ms: u64) -> GestureStep {
    G::Sound(ToneStep::bend(from_hz, to_hz, ratio, duration_ms, silence_ms))
}

fn tone(freq_hz: f64, duration_ms: u64, silence_ms: u64) -> GestureStep {
    G::Sound(ToneStep::tone(freq_hz, duration_ms, silence_ms))
}

fn tiptoe_swing() -> GestureStep {
    G::Gait(GaitCmd::TiptoeSwing { steps: 1.0, period_ms: 500, height_deg: 20.0 })
}

pub(super) fn steps(gesture: Gesture) -> Vec<GestureStep> {
    match gesture {
        Gesture::Happy => vec![
            tone(note::E5, 50, 30),
            G::Mouth(Mouth::Smile),
            G::Song(Song::HappyShort),
            G::Gait(GaitCmd::Swing { steps: 1.0, period_ms: 800, height_deg: 20.0 }),
            G::Song(Song::HappyShort),
            G::Home,
            G::Mouth(Mouth::HappyOpen),
        ],

        Gesture::SuperHappy => vec![
            G::Mouth(Mouth::HappyOpen),
            G::Song(Song::Happy),
            G::Mouth(Mouth::HappyClosed),
            tiptoe_swing(),
            G::Mouth(Mouth::HappyOpen),
            G::Song(Song::SuperHappy),
            G::Mouth(Mouth::HappyClosed),
            tiptoe_swing(),
            G::Home,
            G::Mouth(Mouth::HappyOpen),
        ],

        Gesture::Sad => vec![
            G::Mouth(Mouth::Sad),
            pose([110, 70, 20, 160, 90, 90], 700),
            bend(880.0, 830.0, 1.02, 20, 200),
            G::Mouth(Mouth::SadClosed),
            bend(830.0, 790.0, 1.02, 20, 200),
            G::Mouth(Mouth::SadOpen),
            bend(790.0, 740.0, 1.02, 20, 200),
            G::Mouth(Mouth::SadClosed),
            bend(740.0, 700.0, 1.02, 20, 200),
            G::Mouth(Mouth::SadOpen),
            bend(700.0, 669.0, 1.02, 20, 200),
            G::Mouth(Mouth::Sad),
            G::Pause(500),
            G::Home,
            G::Pause(300),
            G::Mouth(Mouth::HappyOpen),
        ],

        Gesture::Sleeping => {
            let mut seq = vec![pose([100, 80, 60, 120, 90, 90], 700)];
            for _ in 0..4 {
                seq.extend_from_slice(&[
                    G::Frame(Animation::DreamMouth, 0),
                    bend(100.0, 200.0, 1.04, 10, 10),
                    G::Frame(Animation::DreamMouth, 1),
                    bend(200.0, 300.0, 1.04, 10, 10),
                    G::Frame(Animation::DreamMouth, 2),
                    bend(300.0, 500.0, 1.04, 10, 10),
                    G::Pause(500),
                    G::Frame(Animation::DreamMouth, 1),
                    bend(400.0, 250.0, 1.04, 10, 1),
                    G::Frame(Animation::DreamMouth, 0),
                    bend(250.0, 100.0, 1.04, 10, 1),
                    G::Pause(500),
                ]);
            }
            seq.extend_from_slice(&[
                G::Mouth(Mouth::LineMouth),
                G::Song(Song::Cuddly),
                G::Home,
                G::Mouth(Mouth::HappyOpen),
            ]);
            seq
        }

        Gesture::Fart => {
            let mut seq = Vec::new();
            let puffs = [
                ([90, 90, 145, 122, 90, 90], Song::Fart1, 250),
                ([90, 90, 80, 122, 90, 90], Song::Fart2, 250),
                ([90, 90, 145, 80, 90, 90], Song::Fart3, 300),
            ];
            for (angles, song, hold_ms) in puffs.iter() {
                seq.extend_from_slice(&[
                    pose(*angles, 500),
                    G::Pause(300),
                    G::Mouth(Mouth::LineMouth),
                    G::Song(*song),
                    G::Mouth(Mouth::TongueOut),
                    G::Pause(*hold_ms),
                ]);
            }
            seq.extend_from_slice(&[G::Home, G::Pause(500), G::Mouth(Mouth::HappyOpen)]);
            seq
        }

        Gesture::Confused => vec![
            pose([110, 70, 90, 90, 90, 90], 300),
            G::Mouth(Mouth::Confused),
            G::Song(Song::Confused),
            G::Pause(500),
            G::Home,
            G::Mouth(Mouth::HappyOpen),
        ],

        Gesture::Love => vec![
            G::Mouth(Mouth::Heart),
            G::Song(Song::Cuddly),
            G::Gait(GaitCmd::Crusaito {
                steps: 2.0,
                period_ms: 1500,
                height_deg: 15.0,
                side: Side::Left,
            }),
            G::Home,
            G::Song(Song::HappyShort),
            G::Mouth(Mouth::HappyOpen),
        ],

        Gesture::Angry => vec![
            pose([90, 90, 70, 110, 90, 90], 300),
            G::Mouth(Mouth::Angry),
            tone(note::A5, 100, 30),
            bend(note::A5, note::D6, 1.02, 7, 4),
            bend(note::D6, note::G6, 1.02, 10, 1),
            bend(note::G6, note::A5, 1.02, 10, 1),
            G::Pause(15),
            bend(note::A5, note::E5, 1.02, 20, 4),
            G::Pause(400),
            pose([110, 110, 90, 90, 90, 90], 200),
            bend(note::A5, note::D6, 1.02, 20, 4),
            pose([70, 70, 90, 90, 90, 90], 200),
            bend(note::A5, note::E5, 1.02, 20, 4),
            G::Home,
            G::Mouth(Mouth::HappyOpen),
        ],

        Gesture::Fretful => {
            let mut seq = vec![
                G::Mouth(Mouth::Angry),
                bend(note::A5, note::D6, 1.02, 20, 4),
                bend(note::A5, note::E5, 1.02, 20, 4),
                G::Pause(300),
                G::Mouth(Mouth::LineMouth),
            ];
            for _ in 0..4 {
                seq.push(pose([90, 90, 90, 110, 90, 90], 100));
                seq.push(G::Home);
            }
            seq.extend_from_slice(&[
                G::Mouth(Mouth::Angry),
                G::Pause(500),
                G::Home,
                G::Mouth(Mouth::HappyOpen),
            ]);
            seq
        }

        Gesture::Magic => {
            let mut seq = Vec::new();
            for _ in 0..4 {
                let mut note_hz = 400.0;
                for frame in 0..6 {
                    seq.push(G::Frame(Animation::Adivinawi, frame));
                    seq.push(bend(note_hz, note_hz + 100.0, 1.04, 10, 10));
                    note_hz += 100.0;
                }

                seq.push(G::ClearMouth);
                seq.push(bend(note_hz - 100.0, note_hz + 100.0, 1.04, 10, 10));

                for frame in 0..6 {
                    seq.push(G::Frame(Animation::Adivinawi, frame));
                    seq.push(bend(note_hz, note_hz + 100.0, 1.04, 10, 10));
                    note_hz -= 100.0;
                }
            }
            seq.push(G::Pause(300));
            seq.push(G::Mouth(Mouth::HappyOpen));
            seq
        }

        Gesture::Wave => {
            let mut seq = Vec::new();
            for _ in 0..2 {
                let mut note_hz = 500.0;
                // Two sweeps up, then two back down
                for sweep in 0..4 {
                    let rising = sweep < 2;
                    for frame in 0..Animation::Wave.num_frames() {
                        seq.push(G::Frame(Animation::Wave, frame));
                        if rising {
                            seq.push(bend(note_hz, note_hz + 100.0, 1.02, 10, 10));
                            note_hz += 101.0;
                        }
                        else {
                            seq.push(bend(note_hz, note_hz - 100.0, 1.02, 10, 10));
                            note_hz -= 101.0;
                        }
                    }
                }
            }
            seq.extend_from_slice(&[G::ClearMouth, G::Pause(100), G::Mouth(Mouth::HappyOpen)]);
            seq
        }

        Gesture::Victory => {
            let mut seq = vec![G::Mouth(Mouth::SmallSurprise)];
            for i in 0..60 {
                seq.push(pose([90, 90, 90 + i, 90 - i, 90, 90], 10));
                seq.push(tone(1600.0 + i as f64 * 20.0, 15, 1));
            }

            seq.push(G::Mouth(Mouth::BigSurprise));
            for i in 0..60 {
                seq.push(pose([90, 90, 150 - i, 30 + i, 90, 90], 10));
                seq.push(tone(2800.0 + i as f64 * 20.0, 15, 1));
            }

            seq.extend_from_slice(&[
                G::Mouth(Mouth::HappyOpen),
                tiptoe_swing(),
                G::Song(Song::SuperHappy),
                G::Mouth(Mouth::HappyClosed),
                tiptoe_swing(),
                G::Home,
                G::ClearMouth,
                G::Mouth(Mouth::HappyOpen),
            ]);
            seq
        }

        Gesture::Fail => vec![
            G::Mouth(Mouth::SadOpen),
            pose([90, 90, 70, 35, 90, 90], 300),
            tone(900.0, 200, 1),
            G::Mouth(Mouth::SadClosed),
            pose([90, 90, 55, 35, 90, 90], 300),
            tone(600.0, 200, 1),
            G::Mouth(Mouth::Confused),
            pose([90, 90, 42, 35, 90, 90], 300),
            tone(300.0, 200, 1),
            pose([90, 90, 34, 35, 90, 90], 300),
            G::Mouth(Mouth::XMouth),
            G::Detach,
            tone(150.0, 2200, 1),
            G::Pause(600),
            G::ClearMouth,
            G::Mouth(Mouth::HappyOpen),
            G::Home,
        ],
    }
}
