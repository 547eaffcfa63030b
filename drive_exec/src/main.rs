//! Main drive executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - Input acquisition (controller axes, buttons and heading)
//!         - Drive control processing
//!         - Intake control processing
//!         - Actuation of the drive and intake motors
//!     - Stop all motors once the input is finished
//!
//! On a host the input comes from an input script and the motor demands are
//! written to the log.
//!
//! # Modules
//!
//! All modules (e.g. `drive_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use drive_lib::{
    ctrl_loop::CtrlLoop,
    drive_ctrl,
    eqpt::{LogSink, PortMap, ScriptInput, ThreadPacer},
    intake_ctrl,
    params::DriveExecParams,
};
use util::{
    logger::{logger_init, LevelFilter},
    script_interpreter::ScriptInterpreter,
    session::Session,
};

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

/// Runs the driver control loop against an input script.
#[derive(Debug, StructOpt)]
#[structopt(name = "drive_exec")]
struct Opts {
    /// Path to the input script to replay
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Minimum level of log messages, `info` or more verbose
    #[structopt(long, default_value = "debug")]
    log_level: LevelFilter,
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
    let session = Session::new("drive_exec", "sessions")
        .wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opts.log_level, &session)
        .wrap_err("Failed to initialise logging")?;

    info!("Drive Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let exec_params: DriveExecParams = util::params::load("drive_exec.toml")
        .wrap_err("Could not load exec params")?;
    let drive_params: drive_ctrl::Params = util::params::load("drive_ctrl.toml")
        .wrap_err("Could not load DriveCtrl params")?;
    let intake_params: intake_ctrl::Params = util::params::load("intake_ctrl.toml")
        .wrap_err("Could not load IntakeCtrl params")?;

    info!("Parameters loaded");

    // ---- INITIALISE INPUT ----

    info!("Loading script from {:?}", opts.script);

    let si = ScriptInterpreter::new(&opts.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} frames\n",
        si.get_duration(),
        si.get_num_frames()
    );

    let mut input = ScriptInput::new(si);

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ctrl_loop = CtrlLoop::new(exec_params.tick_period(), drive_params, intake_params)
        .wrap_err("Failed to initialise the control loop")?;

    info!("Module initialisation complete\n");

    // ---- INITIALISE ACTUATION ----

    let port_map = PortMap::new(
        &exec_params.ports,
        ctrl_loop.drive_groups(),
        ctrl_loop.num_intake_motors(),
    ).wrap_err("Invalid motor port configuration")?;

    let mut sink = LogSink::new(port_map);

    // ---- MAIN LOOP ----

    ctrl_loop.run(&mut input, &mut sink, &mut ThreadPacer);

    // ---- SHUTDOWN ----

    info!(
        "{} demand batches sent, {} cycles overran",
        sink.num_batches(),
        ctrl_loop.ds.num_cycle_overruns
    );
    info!("End of execution");

    Ok(())
}
