//! # Input script interpreter module
//!
//! This module provides an interpreter for input scripts, which describe the
//! state of the controller and orientation sensor over time. Scripts let the
//! control loop be driven without the physical controller attached.
//!
//! Each frame in a script is written on one line as
//!
//! ```text
//! <time_s>: <JSON InputFrame>;
//! ```
//!
//! Any line not matching this pattern is ignored, so comments can be written
//! freely. A frame stays active until the next frame's time is reached.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use eqpt_if::ctrl::{InputFrame, FrameParseError};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An input frame which is scripted to become active at a specific time.
#[derive(Debug, Clone)]
pub struct TimedFrame {
    /// The time the frame becomes active, relative to the start of the script
    pub start_time_s: f64,

    /// The controller state from this time onwards
    pub frame: InputFrame
}

/// A script interpreter.
///
/// After loading a script use `.frame_at` to get the input frame active at a
/// given time.
pub struct ScriptInterpreter {
    script_path: PathBuf,
    frames: Vec<TimedFrame>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script frame at {0} s is earlier than the frame before it")]
    OutOfOrder(f64),

    #[error("Script contains an invalid frame at {0} s: {1}")]
    InvalidFrame(f64, FrameParseError)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut interp = Self::from_script_str(&script)?;
        interp.script_path = path;

        Ok(interp)
    }

    /// Create a new interpreter from the text of a script.
    pub fn from_script_str(script: &str) -> Result<Self, ScriptError> {

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .expect("Script regex is invalid");

        let mut frames: Vec<TimedFrame> = vec![];

        for cap in re.captures_iter(script) {
            // Group 1 and 3 are not optional in the pattern, so are present
            // in every match.
            let time_str = cap.get(1).map_or("", |m| m.as_str());
            let payload = cap.get(3).map_or("", |m| m.as_str());

            // Parse the start time
            let start_time_s: f64 = time_str.parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            if let Some(last) = frames.last() {
                if start_time_s < last.start_time_s {
                    return Err(ScriptError::OutOfOrder(start_time_s));
                }
            }

            // Parse the frame from the payload. The scripts contain JSON only.
            let frame = InputFrame::from_json(payload)
                .map_err(|e| ScriptError::InvalidFrame(start_time_s, e))?;

            frames.push(TimedFrame {
                start_time_s,
                frame
            });
        }

        if frames.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter {
            script_path: PathBuf::new(),
            frames
        })
    }

    /// Get the frame active at the given time, or `None` if the time is
    /// before the first frame of the script.
    pub fn frame_at(&self, time_s: f64) -> Option<&InputFrame> {
        // Number of frames which have started by this time
        let num_started = self.frames
            .partition_point(|f| f.start_time_s <= time_s);

        match num_started {
            0 => None,
            n => Some(&self.frames[n - 1].frame)
        }
    }

    /// Get the number of frames in the script
    pub fn get_num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.frames.last() {
            Some(f) => f.start_time_s,
            None => 0f64
        }
    }

    /// Get the path the script was loaded from, empty if it was built from a
    /// string.
    pub fn script_path(&self) -> &Path {
        &self.script_path
    }
}
