//! Shared-memory layout and handshake values.
//!
//! Every cell the coprocessor touches lives at a fixed address. Addresses
//! below 0x004 are the raw input banks; everything else sits in the 1KB
//! shared window at 0xC00-0xFFF.

// ---------------------------------------------------------------------------
// Raw input banks (read-only)
// ---------------------------------------------------------------------------

pub const BANK_P1: u16 = 0x000;
pub const BANK_P2: u16 = 0x001;
pub const BANK_DIP_A: u16 = 0x002;
pub const BANK_DIP_B: u16 = 0x003;
pub const BANK_COUNT: usize = 4;

// ---------------------------------------------------------------------------
// Handshake and command cells
// ---------------------------------------------------------------------------

pub const IRQ_READY: u16 = 0xC00;
pub const DELAY_MARKER: u16 = 0xC01;
pub const RESET_COMMAND: u16 = 0xC02;
pub const DIAG_GATE: u16 = 0xC03;

pub const IRQ_READY_MARKER: u8 = 0x47;
pub const WARM_RESET_MARKER: u8 = 0x4A;
pub const DIAG_GATE_MARKER: u8 = 0x42;

// ---------------------------------------------------------------------------
// Input mirrors
// ---------------------------------------------------------------------------

pub const CABINET_MIRROR: u16 = 0xC08;
pub const BANK_MIRRORS: u16 = 0xC09; // four consecutive cells

// ---------------------------------------------------------------------------
// Credits and lockout
// ---------------------------------------------------------------------------

pub const PHONY_CREDITS: u16 = 0xC10;
pub const CREDITS_CHANGED: u16 = 0xC11;
pub const LOCKOUT_COMMAND: u16 = 0xC13;

pub const LOCKOUT_CMD_ENGAGE: u8 = 0x01;
pub const LOCKOUT_CMD_DISENGAGE: u8 = 0xFF;

// ---------------------------------------------------------------------------
// Abandoned controllers: (command, output) pairs
// ---------------------------------------------------------------------------

pub const CREDIT_CTL_A: ControllerCells = ControllerCells {
    command: 0xC18,
    output: 0xC19,
};
pub const CREDIT_CTL_B: ControllerCells = ControllerCells {
    command: 0xC1A,
    output: 0xC1B,
};
pub const LEVEL_CTL: ControllerCells = ControllerCells {
    command: 0xC1C,
    output: 0xC1D,
};

#[derive(Clone, Copy, Debug)]
pub struct ControllerCells {
    pub command: u16,
    pub output: u16,
}

// ---------------------------------------------------------------------------
// Players and beasties
// ---------------------------------------------------------------------------

pub const PLAYER_COUNT: usize = 2;
pub const BEASTIE_COUNT: usize = 7;

/// Per-player state cells.
#[derive(Clone, Copy, Debug)]
pub struct PlayerCells {
    pub liveness: u16,
    pub y: u16,
    pub x: u16,
    pub kill_request: u16,
    pub kill_cause: u16,
    /// First of `BEASTIE_COUNT` four-byte output records.
    pub outputs: u16,
}

pub const PLAYERS: [PlayerCells; PLAYER_COUNT] = [
    PlayerCells {
        liveness: 0xC20,
        y: 0xC21,
        x: 0xC22,
        kill_request: 0xC23,
        kill_cause: 0xC24,
        outputs: 0xC48,
    },
    PlayerCells {
        liveness: 0xC28,
        y: 0xC29,
        x: 0xC2A,
        kill_request: 0xC2B,
        kill_cause: 0xC2C,
        outputs: 0xC68,
    },
];

/// Seven three-byte records: life stage, y, x.
pub const BEASTIE_RECORDS: u16 = 0xC30;

pub const fn beastie_record(index: usize) -> u16 {
    BEASTIE_RECORDS + 3 * index as u16
}

/// Output record for one beastie as seen by one player:
/// vertical code, horizontal code, vertical distance, horizontal distance.
#[derive(Clone, Copy, Debug)]
pub struct BeastieOutputCells {
    pub vertical_code: u16,
    pub horizontal_code: u16,
    pub vertical_distance: u16,
    pub horizontal_distance: u16,
}

impl PlayerCells {
    pub const fn beastie_output(&self, index: usize) -> BeastieOutputCells {
        let base = self.outputs + 4 * index as u16;
        BeastieOutputCells {
            vertical_code: base,
            horizontal_code: base + 1,
            vertical_distance: base + 2,
            horizontal_distance: base + 3,
        }
    }
}

pub const KILL_REQUESTED: u8 = 0x01;

// ---------------------------------------------------------------------------
// Creepers
// ---------------------------------------------------------------------------

pub const CREEPER_COUNT: usize = 4;
pub const CREEPER_SELECTORS: u16 = 0xC90;
pub const CREEPER_OUTPUTS: u16 = 0xC94;

// ---------------------------------------------------------------------------
// Small timers and toggles
// ---------------------------------------------------------------------------

pub const CLOCK_ACTIVE: u16 = 0xCA0;
pub const CLOCK_COUNT_LO: u16 = 0xCA1;
pub const CLOCK_COUNT_HI: u16 = 0xCA2;
pub const CLOCK_COMPLETE: u16 = 0xCA3;

pub const MISCHIEF_ENABLE: u16 = 0xCA8;
pub const MISCHIEF_ENABLE_MARKER: u8 = 0x0D;
pub const MISCHIEF_LEVEL: u8 = 0x0C;
pub const MISCHIEF_CREDITS: u8 = 42;

pub const EXTEND_SELECTOR: u16 = 0xCA9;
pub const EXTEND_PERIOD: u8 = 6;

// ---------------------------------------------------------------------------
// Translators
// ---------------------------------------------------------------------------

pub const TRANSLATOR_COUNT: usize = 3;

pub const TRANSLATOR_ARMED: u8 = 0x01;
pub const TRANSLATOR_DONE: u8 = 0xFF;

/// Control cells of one translator slot plus its fixed output window.
#[derive(Clone, Copy, Debug)]
pub struct TranslatorCells {
    pub status: u16,
    pub table: u16,
    pub index: u16,
    pub offset: u16,
    pub output_base: u16,
}

pub const TRANSLATORS: [TranslatorCells; TRANSLATOR_COUNT] = [
    TranslatorCells {
        status: 0xCB0,
        table: 0xCB1,
        index: 0xCB2,
        offset: 0xCB3,
        output_base: 0xD00,
    },
    TranslatorCells {
        status: 0xCB4,
        table: 0xCB5,
        index: 0xCB6,
        offset: 0xCB7,
        output_base: 0xE00,
    },
    TranslatorCells {
        status: 0xCB8,
        table: 0xCB9,
        index: 0xCBA,
        offset: 0xCBB,
        output_base: 0xF00,
    },
];
