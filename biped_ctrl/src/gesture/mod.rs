//! # Gestures
//!
//! Short emotive performances combining body motion with a mouth display and a buzzer. Each
//! gesture is a declarative list of [`GestureStep`]s, run in order by a [`GestureRunner`] which
//! borrows the motion controller for the duration of the gesture.
//!
//! Rendering mouths and driving the buzzer are the job of the [`ExpressionDisplay`] and
//! [`TonePlayer`] collaborators.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod table;
pub mod tone;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// Internal
use crate::actuator::JointDriver;
use crate::clock::Clock;
use crate::gait_lib::GaitCmd;
use crate::motion_ctrl::{MotionCtrl, MotionError};
use crate::pose::Pose;
pub use tone::{Song, Sound, ToneError, ToneStep};

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Something that can show a mouth.
pub trait ExpressionDisplay {
    fn show_mouth(&mut self, mouth: Mouth);

    /// Show one frame of an animation.
    fn show_frame(&mut self, animation: Animation, frame: usize);

    fn clear(&mut self);
}

/// A buzzer.
///
/// Tones are played until stopped, timing is handled by the caller.
pub trait TonePlayer {
    fn tone_on(&mut self, freq_hz: f64);

    fn tone_off(&mut self);
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mouth {
    Smile,
    HappyOpen,
    HappyClosed,
    Sad,
    SadOpen,
    SadClosed,
    Heart,
    Angry,
    Confused,
    LineMouth,
    TongueOut,
    SmallSurprise,
    BigSurprise,
    XMouth,
}

/// Multi-frame mouth animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    DreamMouth,
    Adivinawi,
    Wave,
}

/// The built-in gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Happy,
    SuperHappy,
    Sad,
    Sleeping,
    Fart,
    Confused,
    Love,
    Angry,
    Fretful,
    Magic,
    Wave,
    Victory,
    Fail,
}

/// One step of a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    /// Interpolate to a pose.
    Move { pose: Pose, duration_ms: u64 },

    /// Run a gait preset.
    Gait(GaitCmd),

    /// Park the robot.
    Home,

    /// Cut drive to every joint without changing the rest state.
    Detach,

    Mouth(Mouth),

    Frame(Animation, usize),

    ClearMouth,

    Sound(ToneStep),

    Song(Song),

    Pause(u64),
}

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("Motion failed: {0}")]
    Motion(#[from] MotionError),

    #[error(transparent)]
    Tone(#[from] ToneError),

    #[error("{animation:?} has no frame {frame}")]
    FrameOutOfRange { animation: Animation, frame: usize },

    #[error("Unknown gesture \"{0}\"")]
    UnknownGesture(String),
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Runs gestures against a controller, display and buzzer.
pub struct GestureRunner<'a, D: JointDriver, C: Clock, X: ExpressionDisplay, T: TonePlayer> {
    ctrl: &'a mut MotionCtrl<D, C>,
    display: &'a mut X,
    buzzer: &'a mut T,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Animation {
    pub fn num_frames(self) -> usize {
        match self {
            Animation::DreamMouth => 3,
            Animation::Adivinawi => 6,
            Animation::Wave => 10,
        }
    }
}

impl Gesture {
    pub const ALL: [Gesture; 13] = [
        Gesture::Happy,
        Gesture::SuperHappy,
        Gesture::Sad,
        Gesture::Sleeping,
        Gesture::Fart,
        Gesture::Confused,
        Gesture::Love,
        Gesture::Angry,
        Gesture::Fretful,
        Gesture::Magic,
        Gesture::Wave,
        Gesture::Victory,
        Gesture::Fail,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Gesture::Happy => "happy",
            Gesture::SuperHappy => "super-happy",
            Gesture::Sad => "sad",
            Gesture::Sleeping => "sleeping",
            Gesture::Fart => "fart",
            Gesture::Confused => "confused",
            Gesture::Love => "love",
            Gesture::Angry => "angry",
            Gesture::Fretful => "fretful",
            Gesture::Magic => "magic",
            Gesture::Wave => "wave",
            Gesture::Victory => "victory",
            Gesture::Fail => "fail",
        }
    }

    pub fn steps(self) -> Vec<GestureStep> {
        table::steps(self)
    }
}

impl FromStr for Gesture {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gesture::ALL
            .iter()
            .find(|g| g.name() == s)
            .copied()
            .ok_or_else(|| GestureError::UnknownGesture(s.into()))
    }
}

impl<'a, D, C, X, T> GestureRunner<'a, D, C, X, T>
where
    D: JointDriver,
    C: Clock,
    X: ExpressionDisplay,
    T: TonePlayer,
{
    pub fn new(ctrl: &'a mut MotionCtrl<D, C>, display: &'a mut X, buzzer: &'a mut T) -> Self {
        Self {
            ctrl,
            display,
            buzzer,
        }
    }

    /// Play a built-in gesture.
    pub fn play(&mut self, gesture: Gesture) -> Result<(), GestureError> {
        info!("Playing gesture {}", gesture.name());
        self.run(&gesture.steps())
    }

    /// Play a built-in song.
    pub fn sing(&mut self, song: Song) -> Result<(), GestureError> {
        debug!("Singing {}", song.name());
        let sounds = tone::expand(&song.steps())?;
        tone::play(self.buzzer, self.ctrl.clock_mut(), &sounds);
        Ok(())
    }

    /// Run a list of steps.
    ///
    /// Frames and sounds are checked before the first step, so a malformed list does nothing.
    /// Gait steps are validated as they are reached, as with [`MotionCtrl::perform`].
    pub fn run(&mut self, steps: &[GestureStep]) -> Result<(), GestureError> {
        for step in steps.iter() {
            check_step(step)?;
        }

        for step in steps.iter() {
            match step {
                GestureStep::Move { pose, duration_ms } => self.ctrl.move_to(pose, *duration_ms)?,
                GestureStep::Gait(cmd) => self.ctrl.perform(cmd)?,
                GestureStep::Home => self.ctrl.home()?,
                GestureStep::Detach => self.ctrl.detach_all().map_err(MotionError::from)?,
                GestureStep::Mouth(mouth) => self.display.show_mouth(*mouth),
                GestureStep::Frame(animation, frame) => self.display.show_frame(*animation, *frame),
                GestureStep::ClearMouth => self.display.clear(),
                GestureStep::Sound(tone_step) => {
                    let sounds = tone::expand(&[*tone_step])?;
                    tone::play(self.buzzer, self.ctrl.clock_mut(), &sounds);
                }
                GestureStep::Song(song) => self.sing(*song)?,
                GestureStep::Pause(ms) => self.ctrl.pause(*ms),
            }
        }

        Ok(())
    }
}

fn check_step(step: &GestureStep) -> Result<(), GestureError> {
    match step {
        GestureStep::Frame(animation, frame) if *frame >= animation.num_frames() => {
            Err(GestureError::FrameOutOfRange {
                animation: *animation,
                frame: *frame,
            })
        }
        GestureStep::Sound(tone_step) => {
            tone_step.expand_into(&mut Vec::new())?;
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::actuator::JointId;
    use crate::motion_ctrl::{Params, RestState};
    use crate::sim::{ExpressionEvent, SimBuzzer, SimClock, SimDisplay, SimDriver};

    struct Rig {
        ctrl: MotionCtrl<SimDriver, SimClock>,
        display: SimDisplay,
        buzzer: SimBuzzer,
    }

    fn rig() -> Rig {
        let clock = SimClock::new();
        Rig {
            ctrl: MotionCtrl::new(Params::default(), SimDriver::new(clock.clone()), clock.clone())
                .unwrap(),
            display: SimDisplay::new(clock.clone()),
            buzzer: SimBuzzer::new(clock),
        }
    }

    impl Rig {
        fn runner(&mut self) -> GestureRunner<SimDriver, SimClock, SimDisplay, SimBuzzer> {
            GestureRunner::new(&mut self.ctrl, &mut self.display, &mut self.buzzer)
        }
    }

    #[test]
    fn test_all_gestures_play_and_park() {
        for gesture in Gesture::ALL.iter() {
            let mut rig = rig();
            rig.runner().play(*gesture).unwrap();

            // Every gesture leaves a happy face
            let last_mouth = rig
                .display
                .events()
                .iter()
                .rev()
                .find_map(|(_, e)| match e {
                    ExpressionEvent::Mouth(m) => Some(*m),
                    _ => None,
                });
            assert_eq!(last_mouth, Some(Mouth::HappyOpen), "{:?}", gesture);

            assert_eq!(gesture.name().parse::<Gesture>().unwrap(), *gesture);
        }
    }

    #[test]
    fn test_confused_sequence() {
        let mut rig = rig();
        rig.runner().play(Gesture::Confused).unwrap();

        // Head turned over 300 ms before the face changes
        let events = rig.display.events();
        assert_eq!(events[0], (300, ExpressionEvent::Mouth(Mouth::Confused)));

        let yaw: Vec<_> = rig.ctrl.bank().driver().joint_commands(JointId::HipYawL).collect();
        assert_eq!(yaw.iter().find(|c| c.t_ms == 300).map(|c| c.angle_deg), Some(110.0));

        assert_eq!(rig.ctrl.rest_state(), RestState::Resting);
        assert_eq!(rig.ctrl.bank().current_pose(), Pose::REST);
    }

    #[test]
    fn test_fail_detaches_then_homes() {
        let mut rig = rig();
        rig.runner().play(Gesture::Fail).unwrap();

        // Long slump tone while detached
        assert!(rig
            .buzzer
            .tones()
            .iter()
            .any(|t| t.freq_hz == 150.0 && t.duration_ms == 2200));
        assert!(rig.ctrl.bank().driver().detach_count() >= 2 * 6);
        assert!(rig.ctrl.is_resting());
    }

    #[test]
    fn test_bad_frame_rejected_before_motion() {
        let mut rig = rig();
        let steps = [
            GestureStep::Move { pose: Pose::from_degrees([100, 80, 90, 90, 90, 90]), duration_ms: 100 },
            GestureStep::Frame(Animation::DreamMouth, 3),
        ];

        assert!(matches!(
            rig.runner().run(&steps),
            Err(GestureError::FrameOutOfRange { frame: 3, .. })
        ));
        assert!(rig.ctrl.bank().driver().commands().is_empty());
    }

    #[test]
    fn test_bad_ratio_rejected_before_motion() {
        let mut rig = rig();
        let steps = [
            GestureStep::Home,
            GestureStep::Sound(ToneStep::bend(400.0, 800.0, 0.5, 10, 10)),
        ];
        assert!(matches!(rig.runner().run(&steps), Err(GestureError::Tone(_))));
        assert!(rig.buzzer.tones().is_empty());
    }

    #[test]
    fn test_sing_uses_controller_clock() {
        let mut rig = rig();
        rig.runner().sing(Song::Mode3).unwrap();

        assert_eq!(rig.ctrl.clock().now_ms(), 50 + 100 + 50 + 80 + 300 + 1);
        assert_eq!(rig.buzzer.tones().len(), 3);
    }
}
