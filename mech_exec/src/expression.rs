//! # Logged expression outputs
//!
//! The robot's mouth display and buzzer are not driven by this executable, so expressions and
//! tones are reported in the log instead.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info};

use biped_lib::gesture::{Animation, ExpressionDisplay, Mouth, TonePlayer};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LogDisplay;

#[derive(Debug, Default)]
pub struct LogBuzzer {
    sounding: Option<f64>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ExpressionDisplay for LogDisplay {
    fn show_mouth(&mut self, mouth: Mouth) {
        info!("Mouth: {:?}", mouth);
    }

    fn show_frame(&mut self, animation: Animation, frame: usize) {
        debug!("Mouth: {:?} frame {}", animation, frame);
    }

    fn clear(&mut self) {
        debug!("Mouth cleared");
    }
}

impl TonePlayer for LogBuzzer {
    fn tone_on(&mut self, freq_hz: f64) {
        self.sounding = Some(freq_hz);
    }

    fn tone_off(&mut self) {
        if let Some(freq_hz) = self.sounding.take() {
            debug!("Tone: {:.0} Hz", freq_hz);
        }
    }
}
