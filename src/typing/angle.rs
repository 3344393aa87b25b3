//! # Angle Resolver
//!
//! Converts a stick position into whole degrees and resolves it against a
//! zone partition.
//!
//! Angles are measured counter-clockwise from the positive X axis in raw
//! device coordinates, normalized into `0..=360` (rounding can land on 360).

use super::zones::{Partition, Zone, ZoneTable};

/// Computes the angle of `(x, y)` in whole degrees.
///
/// `atan2` is recomputed from the inputs every call, so identical inputs
/// always give identical results. `(0, 0)` yields 0. Halfway values round
/// to the even neighbour.
///
/// # Examples
///
/// ```
/// use stick_typer::typing::angle::position_degrees;
///
/// assert_eq!(position_degrees(100, 0), 0);
/// assert_eq!(position_degrees(0, 100), 90);
/// assert_eq!(position_degrees(-100, 0), 180);
/// assert_eq!(position_degrees(0, -100), 270);
/// assert_eq!(position_degrees(0, 0), 0);
/// ```
#[must_use]
pub fn position_degrees(x: i32, y: i32) -> u16 {
    let mut theta = f64::from(y).atan2(f64::from(x)).to_degrees();
    if theta < 0.0 {
        theta += 360.0;
    }
    theta.round_ties_even() as u16
}

/// Resolves `(x, y)` to a sector of the requested partition.
///
/// # Examples
///
/// ```
/// use stick_typer::typing::angle::resolve;
/// use stick_typer::typing::zones::{Partition, ZoneTable};
///
/// let table = ZoneTable::standard();
/// assert_eq!(resolve(&table, Partition::Row, -100, 0).map(|z| z.id()), Some(0));
/// assert!(resolve(&table, Partition::Index, 50, 50).is_none());
/// ```
#[must_use]
pub fn resolve(table: &ZoneTable, partition: Partition, x: i32, y: i32) -> Option<Zone> {
    table.resolve(partition, position_degrees(x, y))
}
