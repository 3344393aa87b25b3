//! # Zone Table
//!
//! Fixed partitions of a stick's 360° range into angular sectors.
//!
//! ## Row Partition
//!
//! Resolved from the row stick. Each sector carries a 7-slot symbol row:
//! five characters, an editing key and a modifier. Some slots are empty.
//!
//! | Id | Degrees | Slots 0-6 |
//! |----|---------|-----------|
//! | 0 | 180-224 | a b c d e backspace left-click |
//! | 1 | 225-269 | f g h i j ctrl - |
//! | 2 | 270-314 | k l m n o tab shift |
//! | 3 | 315-360 | p q r s t alt - |
//! | 4 | 0-44 | u v w x y space right-click |
//! | 5 | 45-89 | z / ' - , delete num |
//! | 6 | 90-134 | 0 9 8 7 6 enter mouse |
//! | 7 | 135-179 | 5 4 3 2 1 - cap |
//!
//! ## Index Partition
//!
//! Resolved from the index stick. The sector id selects a slot in the row.
//!
//! | Id | Name | Degrees |
//! |----|------|---------|
//! | 0 | orange | 180-223 |
//! | 1 | yellow | 225-269 |
//! | 2 | green | 270-314 |
//! | 3 | blue | 315-360 |
//! | 4 | purple | 0-44 |
//! | 6 | black | 90-134 |
//!
//! Ids 5 (45-89) and 7 (135-179) have no entry, so angles there resolve to
//! nothing. The sector widths are uneven (some span 44°, 224 is outside the
//! index partition, 360 is inside both); they follow the angle distribution
//! measured on real hardware and must not be normalized.

use super::symbol::Symbol;

/// Number of symbol slots in every row.
pub const ROW_SLOTS: usize = 7;

/// Id of the index entry used when the row stick re-centers.
pub const FALLBACK_INDEX_ID: u8 = 6;

/// One angular sector with an inclusive `[start, end]` range in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneEntry<P> {
    pub id: u8,
    pub start: u16,
    pub end: u16,
    pub payload: P,
}

impl<P> ZoneEntry<P> {
    /// Checks whether `degrees` lies within this sector.
    #[must_use]
    pub fn contains(&self, degrees: u16) -> bool {
        degrees >= self.start && degrees <= self.end
    }
}

/// Row sector: a fixed sequence of optional symbols.
pub type RowZone = ZoneEntry<[Option<Symbol>; ROW_SLOTS]>;

/// Index sector: the payload is the slot number, i.e. the id itself.
pub type IndexZone = ZoneEntry<&'static str>;

impl IndexZone {
    /// Slot selected by this sector within a row.
    #[must_use]
    pub fn slot(&self) -> usize {
        self.id as usize
    }

    /// Display name of the sector.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.payload
    }
}

/// Which of the two partitions to resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Row,
    Index,
}

/// A resolved sector from either partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Row(&'static RowZone),
    Index(&'static IndexZone),
}

impl Zone {
    /// Id of the resolved sector.
    #[must_use]
    pub fn id(&self) -> u8 {
        match self {
            Zone::Row(zone) => zone.id,
            Zone::Index(zone) => zone.id,
        }
    }
}

const fn ch(c: char) -> Option<Symbol> {
    Some(Symbol::Char(c))
}

const fn key(symbol: Symbol) -> Option<Symbol> {
    Some(symbol)
}

const fn row(id: u8, start: u16, end: u16, payload: [Option<Symbol>; ROW_SLOTS]) -> RowZone {
    ZoneEntry { id, start, end, payload }
}

const fn index(id: u8, name: &'static str, start: u16, end: u16) -> IndexZone {
    ZoneEntry { id, start, end, payload: name }
}

/// Row partition.
pub static ROW_ZONES: [RowZone; 8] = [
    row(0, 180, 224, [ch('a'), ch('b'), ch('c'), ch('d'), ch('e'), key(Symbol::Backspace), key(Symbol::LeftClick)]),
    row(1, 225, 269, [ch('f'), ch('g'), ch('h'), ch('i'), ch('j'), key(Symbol::Ctrl), None]),
    row(2, 270, 314, [ch('k'), ch('l'), ch('m'), ch('n'), ch('o'), key(Symbol::Tab), key(Symbol::Shift)]),
    row(3, 315, 360, [ch('p'), ch('q'), ch('r'), ch('s'), ch('t'), key(Symbol::Alt), None]),
    row(4, 0, 44, [ch('u'), ch('v'), ch('w'), ch('x'), ch('y'), key(Symbol::Space), key(Symbol::RightClick)]),
    row(5, 45, 89, [ch('z'), ch('/'), ch('\''), ch('-'), ch(','), key(Symbol::Delete), key(Symbol::Num)]),
    row(6, 90, 134, [ch('0'), ch('9'), ch('8'), ch('7'), ch('6'), key(Symbol::Enter), key(Symbol::Mouse)]),
    row(7, 135, 179, [ch('5'), ch('4'), ch('3'), ch('2'), ch('1'), None, key(Symbol::Cap)]),
];

/// Index partition. Ids 5 and 7 are intentionally missing.
pub static INDEX_ZONES: [IndexZone; 6] = [
    index(0, "orange", 180, 223),
    index(1, "yellow", 225, 269),
    index(2, "green", 270, 314),
    index(3, "blue", 315, 360),
    index(4, "purple", 0, 44),
    index(FALLBACK_INDEX_ID, "black", 90, 134),
];

/// Linear scan for the sector containing `degrees`.
pub fn lookup<P>(zones: &[ZoneEntry<P>], degrees: u16) -> Option<&ZoneEntry<P>> {
    zones.iter().find(|zone| zone.contains(degrees))
}

/// Read-only view over both partitions.
///
/// # Examples
///
/// ```
/// use stick_typer::typing::zones::{Partition, ZoneTable};
///
/// let table = ZoneTable::standard();
/// assert_eq!(table.row_at(200).map(|z| z.id), Some(0));
/// assert!(table.index_at(60).is_none()); // unassigned sector
/// assert_eq!(table.resolve(Partition::Index, 100).map(|z| z.id()), Some(6));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ZoneTable {
    rows: &'static [RowZone],
    indexes: &'static [IndexZone],
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ZoneTable {
    /// The reference layout.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rows: &ROW_ZONES,
            indexes: &INDEX_ZONES,
        }
    }

    /// Row sector containing `degrees`, if any.
    #[must_use]
    pub fn row_at(&self, degrees: u16) -> Option<&'static RowZone> {
        lookup(self.rows, degrees)
    }

    /// Index sector containing `degrees`, if any.
    #[must_use]
    pub fn index_at(&self, degrees: u16) -> Option<&'static IndexZone> {
        lookup(self.indexes, degrees)
    }

    /// Index sector with the given id, if it exists.
    #[must_use]
    pub fn index_by_id(&self, id: u8) -> Option<&'static IndexZone> {
        self.indexes.iter().find(|zone| zone.id == id)
    }

    /// Index sector assigned after the row stick re-centers.
    #[must_use]
    pub fn fallback_index(&self) -> Option<&'static IndexZone> {
        self.index_by_id(FALLBACK_INDEX_ID)
    }

    /// Resolves `degrees` against either partition.
    #[must_use]
    pub fn resolve(&self, partition: Partition, degrees: u16) -> Option<Zone> {
        match partition {
            Partition::Row => self.row_at(degrees).map(Zone::Row),
            Partition::Index => self.index_at(degrees).map(Zone::Index),
        }
    }
}
