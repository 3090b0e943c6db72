//! Main robot executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logging and parameters
//!     - Load the driver station script
//!     - Build the robot around its (simulated) peripherals
//!     - Main loop:
//!         - Run one robot cycle against the driver station
//!         - Sleep for the rest of the cycle period
//!
//! The loop exits when the driver station script ends.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use color_eyre::{Report, eyre::WrapErr};
use structopt::StructOpt;

// Internal
use robot_lib::{
    builder::{RobotBuilder, RobotParams},
    cargo_guide::SolenoidCargoGuide,
    drive::{DriveParams, MecanumDrive},
    driver_station::{DriverStation, ScriptedDriverStation},
    hook::SolenoidHook,
    launcher::{FlywheelLauncher, LauncherParams},
    modes::{AutoParams, TeleopParams},
    params::RobotExecParams,
    sim::{SimChassis, SimMotor, SimSolenoid}};
use util::{
    raise_error,
    logger::{logger_init, LevelFilter},
    session::Session,
    script_interpreter::ScriptInterpreter};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "robot_exec", about = "Robot control executable")]
struct Opts {
    /// Path to the driver station script to replay
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Run without a drive train
    #[structopt(long)]
    null_drive: bool,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "robot_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Robot Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD PARAMETERS ----

    let exec_params: RobotExecParams = util::params::load("robot_exec.toml")
        .wrap_err("Could not load exec params")?;
    let cycle_period = exec_params.cycle_period()
        .wrap_err("Invalid exec params")?;
    let drive_params: DriveParams = util::params::load("drive.toml")
        .wrap_err("Could not load drive params")?;
    let launcher_params: LauncherParams = util::params::load("launcher.toml")
        .wrap_err("Could not load launcher params")?;
    let robot_params = RobotParams {
        auto: util::params::load::<AutoParams>("auto.toml")
            .wrap_err("Could not load autonomous params")?,
        teleop: util::params::load::<TeleopParams>("teleop.toml")
            .wrap_err("Could not load teleoperated params")?,
        diagnostics: exec_params.diagnostics,
    };

    info!("Exec parameters loaded");

    // ---- INITIALISE DRIVER STATION ----

    info!("Loading script from {:?}", opts.script);

    let si = ScriptInterpreter::new(&opts.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} samples\n",
        si.get_duration(),
        si.get_num_samples()
    );

    let mut ds = ScriptedDriverStation::new(si, exec_params.cycle_period_s);

    // ---- BUILD ROBOT ----

    info!("Building robot...");

    let chassis = SimChassis::new(exec_params.sim);

    let builder = RobotBuilder::new()
        .hook(SolenoidHook::new(SimSolenoid::new()))
        .launcher(FlywheelLauncher::new(
            SimMotor::new(),
            SimSolenoid::new(),
            launcher_params
        ))
        .cargo_guide(SolenoidCargoGuide::new(SimSolenoid::new()));

    let builder = if opts.null_drive {
        info!("Using the null drive");
        builder.null_drive()
    }
    else {
        let train = chassis.drive_train();
        builder
            .gyroscope(chassis.gyroscope())
            .drive(|gyro| MecanumDrive::new(train, gyro, drive_params))
    };

    let mut robot = builder.build(robot_params)
        .wrap_err("Failed to build the robot")?;

    info!("Robot build complete\n");

    // ---- MAIN LOOP ----

    let mut num_consec_cycle_overruns: u64 = 0;

    robot.start(&mut ds);

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        if ds.shutdown_requested() {
            info!("Shutdown requested by the driver station, stopping");
            break
        }

        // ---- ROBOT CYCLE ----

        if let Err(e) = robot.step(&mut ds) {
            raise_error!("Fatal configuration error: {}", e);
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match cycle_period.checked_sub(cycle_dur) {
            Some(d) => {
                num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                num_consec_cycle_overruns += 1;
                warn!(
                    "Cycle overran by {:.06} s ({} consecutive)",
                    cycle_dur.as_secs_f64() - cycle_period.as_secs_f64(),
                    num_consec_cycle_overruns
                );
            }
        }
    }

    info!(
        "Robot stopped after {} cycles, chassis travelled {:.1} in",
        robot.num_cycles(),
        chassis.distance_in()
    );

    Ok(())
}
