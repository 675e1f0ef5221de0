use serde::{Deserialize, Serialize};

/// One rotation state of a shape: exactly 4 cell offsets relative to the
/// piece anchor, `(dx, dy)` with x rightward and y downward.
pub type RotationState = [(i8, i8); 4];

/// A falling piece: a shape, a rotation index, and an anchor position.
///
/// Pieces are immutable; movement and rotation return new `Piece` values and
/// validation against the board happens at the call site. Rotation indices
/// wrap modulo the shape's rotation-state count, which varies per shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    rotation: u8,
    x: i16,
    y: i16,
}

impl Piece {
    /// Column every piece spawns at.
    pub const SPAWN_X: i16 = 3;
    /// Row every piece spawns at.
    pub const SPAWN_Y: i16 = 0;

    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: Self::SPAWN_X,
            y: Self::SPAWN_Y,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Current rotation index, always below `kind().rotation_states().len()`.
    #[must_use]
    pub fn rotation(&self) -> usize {
        usize::from(self.rotation)
    }

    #[must_use]
    pub fn x(&self) -> i16 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i16 {
        self.y
    }

    /// The cell offsets of the current rotation state.
    #[must_use]
    pub fn cells(&self) -> &'static RotationState {
        &self.kind.rotation_states()[usize::from(self.rotation)]
    }

    /// Absolute positions of the piece's cells at its current location.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.cells()
            .iter()
            .map(move |&(dx, dy)| (self.x + i16::from(dx), self.y + i16::from(dy)))
    }

    #[must_use]
    pub fn left(&self) -> Self {
        Self {
            x: self.x - 1,
            ..*self
        }
    }

    #[must_use]
    pub fn right(&self) -> Self {
        Self {
            x: self.x + 1,
            ..*self
        }
    }

    #[must_use]
    pub fn down(&self) -> Self {
        Self {
            y: self.y + 1,
            ..*self
        }
    }

    /// Rotates one step forward in catalog order, wrapping at the end.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let len = self.kind.num_rotations();
        Self {
            rotation: (self.rotation + 1) % len,
            ..*self
        }
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#rotation@x,y" (e.g. "T#2@3,0")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation,
            self.x,
            self.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let err = || serde::de::Error::custom(format!("expected 'kind#rotation@x,y', got '{s}'"));

        let (kind_str, rest) = s.split_once('#').ok_or_else(err)?;
        let (rotation_str, position_str) = rest.split_once('@').ok_or_else(err)?;
        let (x_str, y_str) = position_str.split_once(',').ok_or_else(err)?;

        let mut kind_chars = kind_str.chars();
        let kind = kind_chars
            .next()
            .filter(|_| kind_chars.next().is_none())
            .and_then(ShapeKind::from_char)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid piece kind: {kind_str}")))?;
        let rotation: u8 = rotation_str.parse().map_err(|e| {
            serde::de::Error::custom(format!("invalid rotation: {rotation_str} ({e})"))
        })?;
        if rotation >= kind.num_rotations() {
            return Err(serde::de::Error::custom(format!(
                "rotation {rotation} out of range for {}",
                kind.as_char()
            )));
        }
        let x: i16 = x_str
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid x: {x_str} ({e})")))?;
        let y: i16 = y_str
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid y: {y_str} ({e})")))?;

        Ok(Piece {
            kind,
            rotation,
            x,
            y,
        })
    }
}

/// Enum identifying the seven shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    I = 0,
    O = 1,
    T = 2,
    S = 3,
    Z = 4,
    J = 5,
    L = 6,
}

impl ShapeKind {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    /// All shapes, in catalog order.
    pub const ALL: [ShapeKind; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// The ordered rotation states of this shape.
    ///
    /// Lists differ in length per shape (I and the skew pieces have 2 states,
    /// O has 1, T/J/L have 4); indices wrap modulo the length.
    #[must_use]
    pub fn rotation_states(self) -> &'static [RotationState] {
        match self {
            ShapeKind::I => &I_STATES,
            ShapeKind::O => &O_STATES,
            ShapeKind::T => &T_STATES,
            ShapeKind::S => &S_STATES,
            ShapeKind::Z => &Z_STATES,
            ShapeKind::J => &J_STATES,
            ShapeKind::L => &L_STATES,
        }
    }

    #[must_use]
    pub fn num_rotations(self) -> u8 {
        u8::try_from(self.rotation_states().len()).unwrap()
    }

    /// Single-character representation of this shape.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
        }
    }

    /// Parses a shape from its single-character representation.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'T' => Some(ShapeKind::T),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            'J' => Some(ShapeKind::J),
            'L' => Some(ShapeKind::L),
            _ => None,
        }
    }
}

// Rotation tables. Each state lists its 4 cell offsets row by row; the
// catalog order of states is the order rotation steps through them.
const I_STATES: [RotationState; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_STATES: [RotationState; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_STATES: [RotationState; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_STATES: [RotationState; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_STATES: [RotationState; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_STATES: [RotationState; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [RotationState; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_state_counts() {
        assert_eq!(ShapeKind::I.rotation_states().len(), 2);
        assert_eq!(ShapeKind::O.rotation_states().len(), 1);
        assert_eq!(ShapeKind::T.rotation_states().len(), 4);
        assert_eq!(ShapeKind::S.rotation_states().len(), 2);
        assert_eq!(ShapeKind::Z.rotation_states().len(), 2);
        assert_eq!(ShapeKind::J.rotation_states().len(), 4);
        assert_eq!(ShapeKind::L.rotation_states().len(), 4);
    }

    #[test]
    fn every_state_has_four_cells_in_bounds() {
        for kind in ShapeKind::ALL {
            for state in kind.rotation_states() {
                for &(dx, dy) in state {
                    assert!((0..4).contains(&dx), "{kind:?} dx out of range");
                    assert!((0..4).contains(&dy), "{kind:?} dy out of range");
                }
            }
        }
    }

    #[test]
    fn rotation_wraps_modulo_state_count() {
        let piece = Piece::new(ShapeKind::S);
        assert_eq!(piece.rotation(), 0);
        assert_eq!(piece.rotated().rotation(), 1);
        assert_eq!(piece.rotated().rotated().rotation(), 0);

        let o = Piece::new(ShapeKind::O);
        assert_eq!(o.rotated().rotation(), 0);
    }

    #[test]
    fn movement_shifts_anchor() {
        let piece = Piece::new(ShapeKind::T);
        assert_eq!((piece.x(), piece.y()), (3, 0));
        assert_eq!(piece.left().x(), 2);
        assert_eq!(piece.right().x(), 4);
        assert_eq!(piece.down().y(), 1);
    }

    #[test]
    fn occupied_positions_offset_by_anchor() {
        let piece = Piece::new(ShapeKind::O);
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, vec![(3, 0), (4, 0), (3, 1), (4, 1)]);
    }

    #[test]
    fn piece_serialization_round_trip() {
        let piece = Piece::new(ShapeKind::T).rotated().rotated().left().down();
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"T#2@2,1\"");

        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn piece_deserialization_error_cases() {
        assert!(serde_json::from_str::<Piece>("\"T2@3,0\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"X#0@3,0\"").is_err());
        // O has a single rotation state; index 1 is out of range.
        assert!(serde_json::from_str::<Piece>("\"O#1@3,0\"").is_err());
        assert!(serde_json::from_str::<Piece>("\"T#2@a,0\"").is_err());
    }

    #[test]
    fn shape_char_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(ShapeKind::from_char('x'), None);
    }
}
