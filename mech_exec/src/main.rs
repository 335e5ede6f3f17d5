//! # Mechanisms Control Executable
//!
//! This executable drives the joints of the biped. Each invocation performs one command (a gait,
//! a pose move, a gesture, a song, homing or a trim change) and then parks the robot.
//!
//! With `--dry-run` the command runs against the simulated clock and driver, which completes
//! instantly and logs every joint command.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command line interface.
mod cli;

/// Logged stand-ins for the mouth display and buzzer.
mod expression;

/// Parameters for the mechanisms executable.
mod params;

/// Driver used to control servos.
mod servo_ctrl;

/// Trim file storage.
mod trim_store;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{Result, eyre::{WrapErr, eyre}};
use log::info;
use structopt::StructOpt;

// Internal
use biped_lib::{
    actuator::{JointDriver, JointId, Trims, NUM_JOINTS},
    clock::Clock,
    gesture::{ExpressionDisplay, GestureRunner, TonePlayer},
    motion_ctrl::{MotionCtrl, Params},
    pose::Pose,
    sim::{SimBuzzer, SimClock, SimDisplay, SimDriver},
};
use cli::{Cmd, Opt, TrimCmd};
use params::MechExecParams;
use trim_store::TrimStore;
use util::{
    host,
    logger::{logger_init, parse_level},
    session::Session,
    time::millis_to_seconds,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {

    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "mech_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    let level = parse_level(&opt.log_level)
        .ok_or_else(|| eyre!("Unknown log level \"{}\"", opt.log_level))?;
    logger_init(level, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Biped Mechanisms Executable\n");
    info!(
        "Running on: {:#?}",
        host::get_uname().wrap_err("Failed to get host information")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let motion_params = Params::load("motion_ctrl.toml")
        .wrap_err("Could not load motion control params")?;
    let mech_params: MechExecParams = util::params::load("mech_exec.toml")
        .wrap_err("Could not load mechanisms params")?;
    mech_params.are_valid()
        .wrap_err("Invalid mechanisms params")?;

    info!("Parameters loaded");

    let trim_store = trim_store_from_params(&mech_params)?;

    // ---- TRIM COMMANDS ----

    // These only touch the trim file, the joints aren't needed
    if let Cmd::Trim(trim_cmd) = &opt.cmd {
        return run_trim_cmd(&trim_store, trim_cmd)
    }

    let trims = if mech_params.load_trims_at_boot {
        trim_store.load_or_zero().wrap_err("Failed to load trims")?
    }
    else {
        [0; NUM_JOINTS]
    };
    info!("Using trims {:?}", trims);

    // ---- RUN ----

    if opt.dry_run {
        info!("Dry run, using the simulated driver");

        let clock = SimClock::new();
        let mut ctrl = MotionCtrl::new(
            motion_params,
            SimDriver::new(clock.clone()),
            clock.clone()
        ).wrap_err("Failed to initialise motion control")?;
        let mut display = SimDisplay::new(clock.clone());
        let mut buzzer = SimBuzzer::new(clock.clone());

        run_cmd(&mut ctrl, &mut display, &mut buzzer, &opt, trims)?;

        info!(
            "Dry run complete: {:.2} s simulated, {} joint commands, {} tones",
            millis_to_seconds(clock.now_ms()),
            ctrl.bank().driver().commands().len(),
            buzzer.tones().len()
        );
    }
    else {
        run_hardware(motion_params, &mech_params, &opt, trims)?;
    }

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Drive the servo board over the Pi's I2C bus.
#[cfg(target_arch = "arm")]
fn run_hardware(
    motion_params: Params,
    mech_params: &MechExecParams,
    opt: &Opt,
    trims: Trims
) -> Result<()> {
    use biped_lib::clock::SystemClock;
    use expression::{LogBuzzer, LogDisplay};
    use pwm_pca9685::Pca9685;
    use rppal::i2c::I2c;
    use servo_ctrl::{ServoConfig, ServoJointDriver};

    let i2c = I2c::new().wrap_err("Failed to open the I2C bus")?;
    let mut pca = Pca9685::new(i2c, mech_params.i2c_address)
        .map_err(|e| eyre!("Failed to open the PCA9685: {:?}", e))?;
    pca.set_prescale(mech_params.pwm_prescale)
        .map_err(|e| eyre!("Failed to set the PWM prescale: {:?}", e))?;
    pca.enable()
        .map_err(|e| eyre!("Failed to enable the PCA9685: {:?}", e))?;

    info!("Servo board initialised at {:#04x}", mech_params.i2c_address);

    let driver = ServoJointDriver::new(pca, ServoConfig::from_params(mech_params));
    let mut ctrl = MotionCtrl::new(motion_params, driver, SystemClock::new())
        .wrap_err("Failed to initialise motion control")?;

    run_cmd(&mut ctrl, &mut LogDisplay::default(), &mut LogBuzzer::default(), opt, trims)
}

#[cfg(not(target_arch = "arm"))]
fn run_hardware(
    _motion_params: Params,
    _mech_params: &MechExecParams,
    _opt: &Opt,
    _trims: Trims
) -> Result<()> {
    Err(eyre!("The servo board is only available on the Raspberry Pi, use --dry-run"))
}

/// Run a motion command on the controller, then park unless asked to hold.
fn run_cmd<D, C, X, T>(
    ctrl: &mut MotionCtrl<D, C>,
    display: &mut X,
    buzzer: &mut T,
    opt: &Opt,
    trims: Trims
) -> Result<()>
where
    D: JointDriver,
    C: Clock,
    X: ExpressionDisplay,
    T: TonePlayer,
{
    ctrl.set_trims(trims);

    match &opt.cmd {
        Cmd::Gait(gait) => {
            ctrl.perform(gait).wrap_err("Gait failed")?;
        }
        Cmd::Pose { duration_ms, angles_deg } => {
            let mut angles = [0f64; NUM_JOINTS];
            angles.copy_from_slice(angles_deg);
            ctrl.move_to(&Pose::new(angles), *duration_ms)
                .wrap_err("Pose move failed")?;
        }
        Cmd::Gesture { gesture } => {
            GestureRunner::new(ctrl, display, buzzer)
                .play(*gesture)
                .wrap_err("Gesture failed")?;
        }
        Cmd::Sing { song } => {
            GestureRunner::new(ctrl, display, buzzer)
                .sing(*song)
                .wrap_err("Song failed")?;
        }
        Cmd::Home => (),
        Cmd::Trim(_) => return Err(eyre!("Trim commands don't drive the joints")),
    }

    if opt.hold {
        info!("Holding pose {:?}", ctrl.bank().current_pose().angles());
    }
    else {
        ctrl.home().wrap_err("Failed to home")?;
    }

    Ok(())
}

fn run_trim_cmd(store: &TrimStore, cmd: &TrimCmd) -> Result<()> {
    match cmd {
        TrimCmd::Get => {
            let trims = store.load_or_zero().wrap_err("Failed to load trims")?;
            for joint in JointId::ALL.iter() {
                info!("{:?}: {}", joint, trims[joint.index()]);
            }
        }
        TrimCmd::Set { joint, trim_deg } => {
            let joint = JointId::from_index(*joint)?;
            let mut trims = store.load_or_zero().wrap_err("Failed to load trims")?;
            trims[joint.index()] = *trim_deg;
            store.save(&trims).wrap_err("Failed to save trims")?;
        }
        TrimCmd::Save { trims_deg } => {
            let mut trims = [0i8; NUM_JOINTS];
            trims.copy_from_slice(trims_deg);
            store.save(&trims).wrap_err("Failed to save trims")?;
        }
    }

    Ok(())
}

/// Trim file path, relative paths are taken from the software root.
fn trim_store_from_params(params: &MechExecParams) -> Result<TrimStore> {
    let path = std::path::PathBuf::from(&params.trim_file);
    if path.is_absolute() {
        return Ok(TrimStore::new(path))
    }

    let mut root = host::get_sw_root()
        .wrap_err("The software root environment variable (BIPED_SW_ROOT) is not set")?;
    root.push(path);

    Ok(TrimStore::new(root))
}
