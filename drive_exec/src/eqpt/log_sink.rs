//! # Logging actuation sink
//!
//! Stands in for the motor driver when running on a host. Each demand is
//! fanned out to the physical motor ports of its actuator, with reversed
//! motors (negative ports) receiving the negated velocity.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use eqpt_if::mech::{ActId, MechDems, WheelGroup};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

use super::ActuationSink;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Highest smart port number on the robot brain.
pub const MAX_PORT: u8 = 21;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Motor ports of each wheel group and of the intake.
///
/// Ports are numbered from 1, a negative port marks a reversed motor. Groups
/// not used by the drivetrain may be left empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortParams {
    pub front_left: Vec<i8>,
    pub front_right: Vec<i8>,
    pub mid_left: Vec<i8>,
    pub mid_right: Vec<i8>,
    pub back_left: Vec<i8>,
    pub back_right: Vec<i8>,

    /// Intake motor ports, in the order of the intake profiles.
    pub intake: Vec<i8>,
}

/// Validated mapping from actuators to signed motor ports.
#[derive(Debug, Clone)]
pub struct PortMap {
    ports: BTreeMap<ActId, Vec<i8>>,
}

/// Simulated motor driver which logs every port write.
pub struct LogSink {
    port_map: PortMap,

    /// Last velocity written to each port, reversal applied.
    last_rpm: BTreeMap<u8, f64>,

    num_batches: u64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PortMapError {
    #[error("Wheel group {0:?} is driven but has no motor ports")]
    EmptyGroup(WheelGroup),

    #[error("Motor port {0} is out of range, expected 1 to {} (negated if reversed)", MAX_PORT)]
    PortOutOfRange(i8),

    #[error("Motor port {0} is used more than once")]
    DuplicatePort(u8),

    #[error("Expected {expected} intake ports to match the intake profiles, found {found}")]
    IntakeCount {
        expected: usize,
        found: usize,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PortParams {
    fn group(&self, group: WheelGroup) -> &[i8] {
        match group {
            WheelGroup::FrontLeft => &self.front_left,
            WheelGroup::FrontRight => &self.front_right,
            WheelGroup::MidLeft => &self.mid_left,
            WheelGroup::MidRight => &self.mid_right,
            WheelGroup::BackLeft => &self.back_left,
            WheelGroup::BackRight => &self.back_right,
        }
    }
}

impl PortMap {
    /// Build the port map for a drivetrain driving the given groups and an
    /// intake with `num_intake` motors.
    pub fn new(
        params: &PortParams,
        drive_groups: &[WheelGroup],
        num_intake: usize,
    ) -> Result<Self, PortMapError> {
        let mut ports = BTreeMap::new();
        let mut used = BTreeSet::new();

        for group in drive_groups.iter() {
            let group_ports = params.group(*group);
            if group_ports.is_empty() {
                return Err(PortMapError::EmptyGroup(*group));
            }
            ports.insert(ActId::Drv(*group), group_ports.to_vec());
        }

        if params.intake.len() != num_intake {
            return Err(PortMapError::IntakeCount {
                expected: num_intake,
                found: params.intake.len(),
            });
        }
        for (i, port) in params.intake.iter().enumerate() {
            ports.insert(ActId::Intake(i), vec![*port]);
        }

        for port in ports.values().flatten() {
            let num = port_num(*port)?;
            if !used.insert(num) {
                return Err(PortMapError::DuplicatePort(num));
            }
        }

        Ok(Self { ports })
    }

    /// The signed ports of an actuator.
    pub fn ports(&self, id: ActId) -> Option<&[i8]> {
        self.ports.get(&id).map(|p| p.as_slice())
    }
}

impl LogSink {
    pub fn new(port_map: PortMap) -> Self {
        Self {
            port_map,
            last_rpm: BTreeMap::new(),
            num_batches: 0,
        }
    }

    /// Last velocity written to a port.
    ///
    /// Units: rpm
    pub fn last_rpm(&self, port: u8) -> Option<f64> {
        self.last_rpm.get(&port).copied()
    }

    /// Number of batches applied so far.
    pub fn num_batches(&self) -> u64 {
        self.num_batches
    }
}

impl ActuationSink for LogSink {
    fn send_demands(&mut self, dems: &MechDems) {
        for (id, speed_rpm) in dems.speed_rpm.iter() {
            let ports = match self.port_map.ports(*id) {
                Some(p) => p,
                None => {
                    warn!("No motor ports mapped to {:?}, demand dropped", id);
                    continue;
                }
            };

            for port in ports.iter() {
                let rpm = if *port < 0 { -speed_rpm } else { *speed_rpm };
                let num = port.abs() as u8;

                debug!("Port {:2} <- {:8.2} rpm ({:?})", num, rpm, id);
                self.last_rpm.insert(num, rpm);
            }
        }

        self.num_batches += 1;
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Get the unsigned port number of a signed port.
fn port_num(port: i8) -> Result<u8, PortMapError> {
    let num = (port as i16).abs();

    if num < 1 || num > MAX_PORT as i16 {
        Err(PortMapError::PortOutOfRange(port))
    }
    else {
        Ok(num as u8)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ROBOT_REL_GROUPS: [WheelGroup; 4] = [
        WheelGroup::FrontLeft,
        WheelGroup::FrontRight,
        WheelGroup::BackLeft,
        WheelGroup::BackRight,
    ];

    fn port_params() -> PortParams {
        PortParams {
            front_left: vec![1, -2, 3],
            front_right: vec![4, -5, 6],
            back_left: vec![7, -8, 9],
            back_right: vec![10, -11],
            intake: vec![13, 14, 15, 16, -17],
            ..Default::default()
        }
    }

    #[test]
    fn test_port_map() {
        let map = PortMap::new(&port_params(), &ROBOT_REL_GROUPS, 5).unwrap();

        assert_eq!(map.ports(ActId::Drv(WheelGroup::BackRight)), Some(&[10, -11][..]));
        assert_eq!(map.ports(ActId::Intake(4)), Some(&[-17][..]));
        assert_eq!(map.ports(ActId::Drv(WheelGroup::MidLeft)), None);
    }

    #[test]
    fn test_port_map_errors() {
        let groups = [WheelGroup::FrontLeft, WheelGroup::MidLeft];
        assert!(matches!(
            PortMap::new(&port_params(), &groups, 5),
            Err(PortMapError::EmptyGroup(WheelGroup::MidLeft))
        ));

        assert!(matches!(
            PortMap::new(&port_params(), &ROBOT_REL_GROUPS, 4),
            Err(PortMapError::IntakeCount { expected: 4, found: 5 })
        ));

        let mut p = port_params();
        p.back_right.push(-22);
        assert!(matches!(
            PortMap::new(&p, &ROBOT_REL_GROUPS, 5),
            Err(PortMapError::PortOutOfRange(-22))
        ));

        let mut p = port_params();
        p.front_left.push(0);
        assert!(matches!(
            PortMap::new(&p, &ROBOT_REL_GROUPS, 5),
            Err(PortMapError::PortOutOfRange(0))
        ));

        let mut p = port_params();
        p.intake[0] = -9;
        assert!(matches!(
            PortMap::new(&p, &ROBOT_REL_GROUPS, 5),
            Err(PortMapError::DuplicatePort(9))
        ));
    }

    #[test]
    fn test_port_params_from_toml() {
        let p: PortParams = util::params::from_str(
            r#"
                front_left = [1, -2]
                front_right = [3]
                intake = [-20]
            "#,
        ).unwrap();

        assert_eq!(p.front_left, vec![1, -2]);
        assert!(p.mid_left.is_empty());
        assert_eq!(p.intake, vec![-20]);
    }

    #[test]
    fn test_reversed_motors_negated() {
        let map = PortMap::new(&port_params(), &ROBOT_REL_GROUPS, 5).unwrap();
        let mut sink = LogSink::new(map);

        let mut dems = MechDems::default();
        dems.set(ActId::Drv(WheelGroup::FrontLeft), 75.0);
        dems.set(ActId::Intake(4), 600.0);
        sink.send_demands(&dems);

        assert_eq!(sink.last_rpm(1), Some(75.0));
        assert_eq!(sink.last_rpm(2), Some(-75.0));
        assert_eq!(sink.last_rpm(3), Some(75.0));
        assert_eq!(sink.last_rpm(17), Some(-600.0));
        assert_eq!(sink.last_rpm(4), None);
        assert_eq!(sink.num_batches(), 1);
    }

    #[test]
    fn test_unmapped_demand_dropped() {
        let map = PortMap::new(&port_params(), &ROBOT_REL_GROUPS, 5).unwrap();
        let mut sink = LogSink::new(map);

        let mut dems = MechDems::default();
        dems.set(ActId::Drv(WheelGroup::MidRight), 100.0);
        dems.set(ActId::Intake(0), 100.0);
        sink.send_demands(&dems);

        assert_eq!(sink.last_rpm(13), Some(100.0));
        assert_eq!(sink.num_batches(), 1);
    }
}
