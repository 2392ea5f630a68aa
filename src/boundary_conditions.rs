use std::fmt;
use std::str::FromStr;

use crate::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryKind {
    /// No-flux: normal velocity is held at zero on the edge.
    Wall,

    /// The edge wraps around to the opposite edge.
    Periodic,
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryKind::Wall => write!(f, "wall"),
            BoundaryKind::Periodic => write!(f, "periodic"),
        }
    }
}

impl FromStr for BoundaryKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wall" => Ok(BoundaryKind::Wall),
            "periodic" => Ok(BoundaryKind::Periodic),
            other => Err(SimulationError::configuration(format!(
                "unknown boundary kind '{}', expected 'wall' or 'periodic'",
                other
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryConditions {
    pub north: BoundaryKind,
    pub east: BoundaryKind,
    pub south: BoundaryKind,
    pub west: BoundaryKind,
}

impl Default for BoundaryConditions {
    fn default() -> Self {
        BoundaryConditions::all_wall()
    }
}

impl BoundaryConditions {
    pub fn new(
        north: BoundaryKind,
        east: BoundaryKind,
        south: BoundaryKind,
        west: BoundaryKind,
    ) -> Self {
        BoundaryConditions {
            north,
            east,
            south,
            west,
        }
    }

    pub fn all_wall() -> Self {
        Self::new(
            BoundaryKind::Wall,
            BoundaryKind::Wall,
            BoundaryKind::Wall,
            BoundaryKind::Wall,
        )
    }

    pub fn all_periodic() -> Self {
        Self::new(
            BoundaryKind::Periodic,
            BoundaryKind::Periodic,
            BoundaryKind::Periodic,
            BoundaryKind::Periodic,
        )
    }

    pub fn periodic_north_south() -> Self {
        Self::new(
            BoundaryKind::Periodic,
            BoundaryKind::Wall,
            BoundaryKind::Periodic,
            BoundaryKind::Wall,
        )
    }

    pub fn periodic_east_west() -> Self {
        Self::new(
            BoundaryKind::Wall,
            BoundaryKind::Periodic,
            BoundaryKind::Wall,
            BoundaryKind::Periodic,
        )
    }

    /// Opposite sides must agree: a side cannot wrap onto a wall.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.north != self.south {
            return Err(SimulationError::configuration(format!(
                "north ({}) and south ({}) boundaries must match",
                self.north, self.south
            )));
        }

        if self.east != self.west {
            return Err(SimulationError::configuration(format!(
                "east ({}) and west ({}) boundaries must match",
                self.east, self.west
            )));
        }

        Ok(())
    }

    pub fn is_periodic_north_south(&self) -> bool {
        self.north == BoundaryKind::Periodic && self.south == BoundaryKind::Periodic
    }

    pub fn is_periodic_east_west(&self) -> bool {
        self.east == BoundaryKind::Periodic && self.west == BoundaryKind::Periodic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_configurations_are_valid() {
        for bc in &[
            BoundaryConditions::all_wall(),
            BoundaryConditions::all_periodic(),
            BoundaryConditions::periodic_north_south(),
            BoundaryConditions::periodic_east_west(),
        ] {
            assert!(bc.validate().is_ok(), "{:?}", bc);
        }
    }

    #[test]
    fn mismatched_pairs_are_rejected() {
        let bc = BoundaryConditions::new(
            BoundaryKind::Periodic,
            BoundaryKind::Wall,
            BoundaryKind::Wall,
            BoundaryKind::Wall,
        );
        assert!(matches!(
            bc.validate(),
            Err(SimulationError::Configuration(_))
        ));

        let bc = BoundaryConditions::new(
            BoundaryKind::Wall,
            BoundaryKind::Wall,
            BoundaryKind::Wall,
            BoundaryKind::Periodic,
        );
        assert!(bc.validate().is_err());
    }

    #[test]
    fn parses_kinds_from_strings() {
        assert_eq!("Wall".parse::<BoundaryKind>().unwrap(), BoundaryKind::Wall);
        assert_eq!(
            " periodic ".parse::<BoundaryKind>().unwrap(),
            BoundaryKind::Periodic
        );
        assert!("open".parse::<BoundaryKind>().is_err());
    }
}
