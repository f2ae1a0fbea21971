//! Lookup tables held in the coprocessor's mask ROM.
//!
//! The creeper tables are generated at compile time from their defining
//! property (cycle mean = selector / 10). The translator tables ship with a
//! built-in image and can be replaced by a dumped one.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Creeper tables
// ---------------------------------------------------------------------------

pub const CREEPER_TABLE_COUNT: usize = 41;

/// Terminates every creeper sequence.
pub const CREEPER_SENTINEL: u8 = 0xFF;

/// Longest cycle (10 entries) plus the sentinel.
pub const CREEPER_TABLE_LEN: usize = 11;

const fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Table `s` spreads `s` tenths per frame over the shortest whole cycle,
/// spacing the larger steps evenly.
const fn build_creeper_tables() -> [[u8; CREEPER_TABLE_LEN]; CREEPER_TABLE_COUNT] {
    let mut tables = [[CREEPER_SENTINEL; CREEPER_TABLE_LEN]; CREEPER_TABLE_COUNT];
    let mut selector = 0;
    while selector < CREEPER_TABLE_COUNT {
        let g = gcd(selector, 10);
        let len = 10 / g;
        let total = selector / g;
        let mut i = 0;
        while i < len {
            tables[selector][i] = ((i + 1) * total / len - i * total / len) as u8;
            i += 1;
        }
        selector += 1;
    }
    tables
}

pub static CREEPER_TABLES: [[u8; CREEPER_TABLE_LEN]; CREEPER_TABLE_COUNT] = build_creeper_tables();

/// One full cycle of creeper table `selector`, without the sentinel.
pub fn creeper_cycle(selector: usize) -> &'static [u8] {
    let table = &CREEPER_TABLES[selector];
    let len = table
        .iter()
        .position(|&v| v == CREEPER_SENTINEL)
        .unwrap_or(CREEPER_TABLE_LEN);
    &table[..len]
}

// ---------------------------------------------------------------------------
// Translator tables
// ---------------------------------------------------------------------------

pub const TRANSLATOR_TABLE_COUNT: usize = 5;
pub const TRANSLATOR_TABLE_LEN: usize = 256;

/// Size of a raw translator table image: five tables back to back.
pub const TRANSLATOR_IMAGE_SIZE: usize = TRANSLATOR_TABLE_COUNT * TRANSLATOR_TABLE_LEN;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableImageError {
    #[error("translator image must be 1280 bytes, got {0}")]
    WrongSize(usize),
}

/// Built-in image: identity, bit reversal, nibble swap, binary to BCD
/// (mod 100) and one's complement.
const fn build_translator_tables() -> [[u8; TRANSLATOR_TABLE_LEN]; TRANSLATOR_TABLE_COUNT] {
    let mut tables = [[0u8; TRANSLATOR_TABLE_LEN]; TRANSLATOR_TABLE_COUNT];
    let mut i = 0;
    while i < TRANSLATOR_TABLE_LEN {
        let v = i as u8;
        let bcd = (i % 100) as u8;
        tables[0][i] = v;
        tables[1][i] = v.reverse_bits();
        tables[2][i] = v.rotate_left(4);
        tables[3][i] = ((bcd / 10) << 4) | (bcd % 10);
        tables[4][i] = !v;
        i += 1;
    }
    tables
}

const DEFAULT_TRANSLATOR_TABLES: [[u8; TRANSLATOR_TABLE_LEN]; TRANSLATOR_TABLE_COUNT] =
    build_translator_tables();

/// The five 256-entry tables the translators index into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorTables {
    tables: [[u8; TRANSLATOR_TABLE_LEN]; TRANSLATOR_TABLE_COUNT],
}

impl TranslatorTables {
    /// Build from a raw image of exactly [`TRANSLATOR_IMAGE_SIZE`] bytes.
    pub fn from_image(image: &[u8]) -> Result<Self, TableImageError> {
        if image.len() != TRANSLATOR_IMAGE_SIZE {
            return Err(TableImageError::WrongSize(image.len()));
        }
        let mut tables = [[0u8; TRANSLATOR_TABLE_LEN]; TRANSLATOR_TABLE_COUNT];
        for (table, chunk) in tables.iter_mut().zip(image.chunks_exact(TRANSLATOR_TABLE_LEN)) {
            table.copy_from_slice(chunk);
        }
        Ok(Self { tables })
    }

    /// Look up `index` in table `selector`. Selectors past the last table
    /// read the last table.
    pub fn lookup(&self, selector: u8, index: u8) -> u8 {
        let selector = (selector as usize).min(TRANSLATOR_TABLE_COUNT - 1);
        self.tables[selector][index as usize]
    }

    pub fn table(&self, selector: usize) -> &[u8; TRANSLATOR_TABLE_LEN] {
        &self.tables[selector]
    }
}

impl Default for TranslatorTables {
    fn default() -> Self {
        Self {
            tables: DEFAULT_TRANSLATOR_TABLES,
        }
    }
}
