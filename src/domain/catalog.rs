//! Static tile catalog
//!
//! The catalog is generated once per process and shared by `&'static`
//! reference. Every tile instance in a selection points back into it, so an
//! instance can never reference a tile that does not exist.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Relative path of the blank placeholder drawn for spacers
pub const SPACER_IMAGE_PATH: &str = "tiles/Mpu00.png";

/// Tile family
///
/// Declaration order is the sort order: p → s → m → honors → flowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Circles (p), 1–9
    Pin,
    /// Bamboo (s), 1–9
    Sou,
    /// Characters (m), 1–9
    Man,
    /// Winds and dragons (z), 1–7
    Honor,
    /// Flowers and seasons (q), 1–8, single copy
    Flower,
}

/// All suits in catalog and sort order
pub const SUIT_ORDER: [Suit; 5] = [Suit::Pin, Suit::Sou, Suit::Man, Suit::Honor, Suit::Flower];

impl Suit {
    /// Single-letter code used in ids and file names
    pub fn code(self) -> char {
        match self {
            Suit::Pin => 'p',
            Suit::Sou => 's',
            Suit::Man => 'm',
            Suit::Honor => 'z',
            Suit::Flower => 'q',
        }
    }

    /// Parses a suit code, case insensitive
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'p' => Some(Suit::Pin),
            's' => Some(Suit::Sou),
            'm' => Some(Suit::Man),
            'z' => Some(Suit::Honor),
            'q' => Some(Suit::Flower),
            _ => None,
        }
    }

    /// Position of this suit in [`SUIT_ORDER`]
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Highest value in this suit
    pub fn max_value(self) -> u8 {
        match self {
            Suit::Pin | Suit::Sou | Suit::Man => 9,
            Suit::Honor => 7,
            Suit::Flower => 8,
        }
    }

    /// Copies of each tile a selection may hold
    pub fn max_copies(self) -> usize {
        match self {
            Suit::Flower => 1,
            _ => 4,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One entry of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDefinition {
    /// Stable identifier, e.g. `Mpu5z`
    pub id: String,
    pub suit: Suit,
    pub value: u8,
    pub max_copies: usize,
    /// Display label, e.g. `5Z`
    pub name: String,
    /// Image path relative to the asset root
    pub image_path: String,
}

impl TileDefinition {
    fn new(suit: Suit, value: u8) -> Self {
        let code = suit.code();
        Self {
            id: format!("Mpu{value}{code}"),
            suit,
            value,
            max_copies: suit.max_copies(),
            name: format!("{value}{}", code.to_ascii_uppercase()),
            image_path: format!("tiles/Mpu{value}{code}.png"),
        }
    }
}

/// Immutable tile table with id and name lookup
#[derive(Debug)]
pub struct Catalog {
    tiles: Vec<TileDefinition>,
    by_id: HashMap<String, usize>,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

/// Returns the process-wide catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    fn build() -> Self {
        let tiles: Vec<TileDefinition> = SUIT_ORDER
            .iter()
            .flat_map(|&suit| {
                (1..=suit.max_value()).map(move |value| TileDefinition::new(suit, value))
            })
            .collect();

        let by_id = tiles
            .iter()
            .enumerate()
            .map(|(idx, tile)| (tile.id.clone(), idx))
            .collect();

        Self { tiles, by_id }
    }

    /// All definitions in suit order, value ascending
    pub fn tiles(&self) -> &[TileDefinition] {
        &self.tiles
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Looks up a definition by exact id
    pub fn get(&self, id: &str) -> Option<&TileDefinition> {
        self.by_id.get(id).map(|&idx| &self.tiles[idx])
    }

    /// Resolves user input to a definition
    ///
    /// Accepts an id (`Mpu3p`, any case) or a name (`3P`, `3p`). The value
    /// must be a single digit with no sign.
    pub fn resolve(&self, input: &str) -> Option<&TileDefinition> {
        let input = input.trim();
        if let Some(tile) = self.get(input) {
            return Some(tile);
        }

        let lowered = input.to_ascii_lowercase();
        let short = lowered.strip_prefix("mpu").unwrap_or(&lowered);
        let mut chars = short.chars();
        let suit = chars.next_back().and_then(Suit::from_code)?;
        let [digit] = chars.as_str().as_bytes() else {
            return None;
        };
        if !digit.is_ascii_digit() {
            return None;
        }
        let value = digit - b'0';
        self.get(&format!("Mpu{value}{}", suit.code()))
    }

    /// Definitions of one suit, value ascending
    pub fn by_suit(&self, suit: Suit) -> impl Iterator<Item = &TileDefinition> {
        self.tiles.iter().filter(move |tile| tile.suit == suit)
    }
}

/// Total order used when sorting a selection: suit rank, then value
pub fn compare_tiles(a: &TileDefinition, b: &TileDefinition) -> Ordering {
    a.suit
        .rank()
        .cmp(&b.suit.rank())
        .then_with(|| a.value.cmp(&b.value))
}
