//! # Simulated clock and drivers
//!
//! Stand-ins for the hardware collaborators of the controller. The [`SimClock`] is a virtual
//! monotonic clock in which sleeping simply jumps time forward, so a multi-second gait completes
//! instantly and deterministically. The drivers record everything they are asked to do, stamped
//! with the virtual time, and log it.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, trace};
use std::cell::Cell;
use std::rc::Rc;

use crate::actuator::{ActuatorError, JointDriver, JointId, NUM_JOINTS};
use crate::clock::Clock;
use crate::gesture::{Animation, ExpressionDisplay, Mouth, TonePlayer};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Virtual millisecond clock.
///
/// Clones share the same time, so a driver holding a clone stamps its records with the time the
/// controller sees.
#[derive(Debug, Clone, Default)]
pub struct SimClock {
    now_ms: Rc<Cell<u64>>,
}

/// A joint command received by the [`SimDriver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointCommand {
    pub t_ms: u64,
    pub joint: JointId,
    /// Trimmed angle as received by the driver.
    pub angle_deg: f64,
}

/// Joint driver which records every command.
#[derive(Debug)]
pub struct SimDriver {
    clock: SimClock,

    commands: Vec<JointCommand>,

    attached: [bool; NUM_JOINTS],

    attach_count: usize,
    detach_count: usize,
}

/// Something shown on the simulated display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpressionEvent {
    Mouth(Mouth),
    Frame(Animation, usize),
    Clear,
}

/// Expression display which records what it was asked to show.
#[derive(Debug)]
pub struct SimDisplay {
    clock: SimClock,

    events: Vec<(u64, ExpressionEvent)>,
}

/// A tone played by the [`SimBuzzer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRecord {
    pub start_ms: u64,
    pub freq_hz: f64,
    pub duration_ms: u64,
}

/// Buzzer which records the tones played on it.
#[derive(Debug)]
pub struct SimBuzzer {
    clock: SimClock,

    sounding: Option<(u64, f64)>,

    tones: Vec<ToneRecord>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn sleep_until(&mut self, deadline_ms: u64) {
        if deadline_ms > self.now_ms.get() {
            self.now_ms.set(deadline_ms);
        }
    }
}

impl SimDriver {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            commands: Vec::new(),
            attached: [false; NUM_JOINTS],
            attach_count: 0,
            detach_count: 0,
        }
    }

    /// All commands received so far, in order.
    pub fn commands(&self) -> &[JointCommand] {
        &self.commands
    }

    /// Commands received for a single joint.
    pub fn joint_commands(&self, joint: JointId) -> impl Iterator<Item = &JointCommand> {
        self.commands.iter().filter(move |c| c.joint == joint)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn is_attached(&self, joint: JointId) -> bool {
        self.attached[joint.index()]
    }

    /// Number of individual joint attach operations performed.
    pub fn attach_count(&self) -> usize {
        self.attach_count
    }

    /// Number of individual joint detach operations performed.
    pub fn detach_count(&self) -> usize {
        self.detach_count
    }
}

impl JointDriver for SimDriver {
    fn attach(&mut self, joint: JointId) -> Result<(), ActuatorError> {
        debug!("[sim] attach {:?}", joint);
        self.attached[joint.index()] = true;
        self.attach_count += 1;
        Ok(())
    }

    fn detach(&mut self, joint: JointId) -> Result<(), ActuatorError> {
        debug!("[sim] detach {:?}", joint);
        self.attached[joint.index()] = false;
        self.detach_count += 1;
        Ok(())
    }

    fn write_angle(&mut self, joint: JointId, angle_deg: f64) -> Result<(), ActuatorError> {
        let t_ms = self.clock.now_ms();
        trace!("[sim] {:6} ms {:?} = {:.2}", t_ms, joint, angle_deg);
        self.commands.push(JointCommand {
            t_ms,
            joint,
            angle_deg,
        });
        Ok(())
    }
}

impl SimDisplay {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[(u64, ExpressionEvent)] {
        &self.events
    }

    fn record(&mut self, event: ExpressionEvent) {
        debug!("[sim] display {:?}", event);
        self.events.push((self.clock.now_ms(), event));
    }
}

impl ExpressionDisplay for SimDisplay {
    fn show_mouth(&mut self, mouth: Mouth) {
        self.record(ExpressionEvent::Mouth(mouth));
    }

    fn show_frame(&mut self, animation: Animation, frame: usize) {
        self.record(ExpressionEvent::Frame(animation, frame));
    }

    fn clear(&mut self) {
        self.record(ExpressionEvent::Clear);
    }
}

impl SimBuzzer {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            sounding: None,
            tones: Vec::new(),
        }
    }

    pub fn tones(&self) -> &[ToneRecord] {
        &self.tones
    }
}

impl TonePlayer for SimBuzzer {
    fn tone_on(&mut self, freq_hz: f64) {
        self.tone_off();
        self.sounding = Some((self.clock.now_ms(), freq_hz));
    }

    fn tone_off(&mut self) {
        if let Some((start_ms, freq_hz)) = self.sounding.take() {
            let record = ToneRecord {
                start_ms,
                freq_hz,
                duration_ms: self.clock.now_ms() - start_ms,
            };
            trace!("[sim] tone {:?}", record);
            self.tones.push(record);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sim_clock_shared() {
        let mut clock = SimClock::new();
        let other = clock.clone();

        clock.sleep_until(250);
        assert_eq!(other.now_ms(), 250);

        // Never goes backwards
        clock.sleep_until(100);
        assert_eq!(clock.now_ms(), 250);

        other.advance(5);
        clock.sleep_ms(10);
        assert_eq!(clock.now_ms(), 265);
    }

    #[test]
    fn test_sim_buzzer_durations() {
        let mut clock = SimClock::new();
        let mut buzzer = SimBuzzer::new(clock.clone());

        buzzer.tone_on(440.0);
        clock.sleep_ms(50);
        buzzer.tone_off();
        clock.sleep_ms(30);
        buzzer.tone_off();

        assert_eq!(
            buzzer.tones(),
            &[ToneRecord { start_ms: 0, freq_hz: 440.0, duration_ms: 50 }]
        );
    }
}
