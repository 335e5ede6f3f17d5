//! # Command line interface

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use structopt::{clap::AppSettings, StructOpt};

use biped_lib::{
    gait_lib::GaitCmd,
    gesture::{Gesture, Song},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drive the biped's joints.
#[derive(Debug, StructOpt)]
#[structopt(name = "mech_exec")]
pub struct Opt {
    /// Run against the simulated clock and driver instead of the servo board.
    #[structopt(short, long)]
    pub dry_run: bool,

    /// Minimum log level: info, debug or trace.
    #[structopt(short, long, default_value = "info")]
    pub log_level: String,

    /// Keep the joints driven after the command instead of returning home.
    #[structopt(long)]
    pub hold: bool,

    #[structopt(subcommand)]
    pub cmd: Cmd,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
pub enum Cmd {
    /// Run a gait preset.
    #[structopt(name = "gait")]
    Gait(GaitCmd),

    /// Move to a pose.
    #[structopt(name = "pose", setting = AppSettings::AllowNegativeNumbers)]
    Pose {
        /// Duration of the move in milliseconds.
        duration_ms: u64,

        /// Six joint angles in degrees, in joint order.
        #[structopt(min_values = 6, max_values = 6)]
        angles_deg: Vec<f64>,
    },

    /// Play a gesture.
    #[structopt(name = "gesture")]
    Gesture {
        /// One of happy, super-happy, sad, sleeping, fart, confused, love, angry, fretful, magic,
        /// wave, victory or fail.
        gesture: Gesture,
    },

    /// Play a song on the buzzer.
    #[structopt(name = "sing")]
    Sing { song: Song },

    /// Park the robot.
    #[structopt(name = "home")]
    Home,

    /// Inspect or change the stored joint trims.
    #[structopt(name = "trim")]
    Trim(TrimCmd),
}

#[derive(Debug, StructOpt)]
pub enum TrimCmd {
    /// Print the stored trims.
    #[structopt(name = "get")]
    Get,

    /// Change the trim of a single joint and save.
    #[structopt(name = "set", setting = AppSettings::AllowNegativeNumbers)]
    Set {
        /// Joint index, 0 to 5.
        joint: usize,

        /// Trim in degrees.
        trim_deg: i8,
    },

    /// Save all six trims.
    #[structopt(name = "save", setting = AppSettings::AllowNegativeNumbers)]
    Save {
        #[structopt(min_values = 6, max_values = 6)]
        trims_deg: Vec<i8>,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_gait() {
        let opt = Opt::from_iter(vec!["mech_exec", "--dry-run", "gait", "walk", "4", "1000", "backward"]);
        assert!(opt.dry_run);
        match opt.cmd {
            Cmd::Gait(GaitCmd::Walk { steps, period_ms, .. }) => {
                assert_eq!(steps, 4.0);
                assert_eq!(period_ms, 1000);
            }
            c => panic!("Unexpected command {:?}", c),
        }
    }

    #[test]
    fn test_parse_trim_negative() {
        let opt = Opt::from_iter(vec!["mech_exec", "trim", "set", "3", "-7"]);
        match opt.cmd {
            Cmd::Trim(TrimCmd::Set { joint, trim_deg }) => {
                assert_eq!(joint, 3);
                assert_eq!(trim_deg, -7);
            }
            c => panic!("Unexpected command {:?}", c),
        }
    }

    #[test]
    fn test_parse_gesture() {
        let opt = Opt::from_iter(vec!["mech_exec", "gesture", "super-happy"]);
        assert!(matches!(opt.cmd, Cmd::Gesture { gesture: Gesture::SuperHappy }));
    }

    #[test]
    fn test_parse_pose() {
        let opt = Opt::from_iter(vec!["mech_exec", "pose", "500", "90", "90", "62", "35", "20", "60"]);
        match opt.cmd {
            Cmd::Pose { duration_ms, angles_deg } => {
                assert_eq!(duration_ms, 500);
                assert_eq!(angles_deg, vec![90.0, 90.0, 62.0, 35.0, 20.0, 60.0]);
            }
            c => panic!("Unexpected command {:?}", c),
        }
    }

    #[test]
    fn test_parse_pose_negative_angle() {
        let opt = Opt::from_iter(vec!["mech_exec", "pose", "300", "90", "90", "90", "90", "-5", "90"]);
        match opt.cmd {
            Cmd::Pose { angles_deg, .. } => assert_eq!(angles_deg[4], -5.0),
            c => panic!("Unexpected command {:?}", c),
        }
    }
}
